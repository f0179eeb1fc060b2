//! Student route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use modart_core::content::{StudentKey, list_students, resolve_student};
use tracing::instrument;

use super::log_rejected;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{HeaderView, PortfolioView, StudentCard};

/// Student index template.
#[derive(Template, WebTemplate)]
#[template(path = "students/index.html")]
pub struct StudentsIndexTemplate {
    pub header: HeaderView,
    pub students: Vec<StudentCard>,
}

/// Student portfolio template.
#[derive(Template, WebTemplate)]
#[template(path = "students/show.html")]
pub struct StudentShowTemplate {
    pub header: HeaderView,
    pub student: PortfolioView,
}

/// Display the student index.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let students = list_students(state.content()).await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch students: {e}");
            Vec::new()
        },
        |listing| {
            log_rejected("students", &listing.rejected);
            listing
                .items
                .iter()
                .map(|summary| StudentCard::new(&state, summary))
                .collect()
        },
    );

    StudentsIndexTemplate {
        header: HeaderView::page(&state, "/etudiants"),
        students,
    }
}

/// Display a student portfolio, addressed by slug or ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StudentShowTemplate> {
    let parsed = StudentKey::parse(&key).map_err(|_| AppError::NotFound(format!("student {key}")))?;
    let student = resolve_student(state.content(), &parsed).await?;

    Ok(StudentShowTemplate {
        header: HeaderView::page(&state, &format!("/etudiants/{}", student.student.slug)),
        student: PortfolioView::new(&state, &student),
    })
}
