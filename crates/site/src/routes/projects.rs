//! Project route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use modart_core::content::resolve_project;
use modart_core::types::ProjectId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{HeaderView, ProjectView};

/// Project page template.
#[derive(Template, WebTemplate)]
#[template(path = "projects/show.html")]
pub struct ProjectShowTemplate {
    pub header: HeaderView,
    pub project: ProjectView,
}

/// Display a project with its gallery and author.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProjectShowTemplate> {
    let id: ProjectId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("project {id}")))?;
    let project = resolve_project(state.content(), id).await?;

    Ok(ProjectShowTemplate {
        header: HeaderView::page(&state, &format!("/projets/{id}")),
        project: ProjectView::new(&state, &project),
    })
}
