//! Display data for templates.
//!
//! Handlers convert resolved content into these flat shapes so templates
//! never touch IDs, file references or optional relations directly.

use chrono::{DateTime, NaiveDate, Utc};
use modart_core::content::{
    Event, Project, ProjectWithRelations, SocialNetwork, StudentSummary, StudentWithRelations,
};
use modart_core::navigation::{MenuState, NAV_LINKS, NavEvent, NavState, ScrollState};
use modart_core::types::EventStatus;

use crate::state::AppState;

/// Width requested for card thumbnails.
const CARD_WIDTH: u32 = 600;

/// Width requested for full-size gallery images.
const GALLERY_WIDTH: u32 = 1600;

/// Width requested for student avatars.
const AVATAR_WIDTH: u32 = 320;

// =============================================================================
// Header
// =============================================================================

/// The site header in a given navigation state.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub state: NavState,
    /// Path of the page the header is rendered on.
    pub path: String,
    /// Absolute URL for `<link rel="canonical">`.
    pub canonical: Option<String>,
}

/// A single menu link.
#[derive(Debug, Clone)]
pub struct NavLinkView {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl HeaderView {
    /// Header for a freshly loaded page.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        Self::with_state(NavState::INITIAL.apply(NavEvent::RouteChanged), path)
    }

    /// Header for a full page served at `path`.
    #[must_use]
    pub fn page(app: &AppState, path: &str) -> Self {
        Self {
            canonical: app.canonical_url(path),
            ..Self::for_path(path)
        }
    }

    #[must_use]
    pub fn with_state(state: NavState, path: &str) -> Self {
        Self {
            state,
            path: path.to_owned(),
            canonical: None,
        }
    }

    #[must_use]
    pub fn links(&self) -> Vec<NavLinkView> {
        NAV_LINKS
            .iter()
            .map(|route| NavLinkView {
                href: route.href(),
                label: route.label(),
                active: route.is_active(&self.path),
            })
            .collect()
    }

    #[must_use]
    pub const fn mode_class(&self) -> &'static str {
        self.state.header_mode().css_class()
    }

    #[must_use]
    pub const fn menu_open(&self) -> bool {
        self.state.menu_open()
    }

    /// Menu axis as sent back by the navigation script.
    #[must_use]
    pub const fn menu_param(&self) -> &'static str {
        match self.state.menu {
            MenuState::Closed => "closed",
            MenuState::Open => "open",
        }
    }

    /// Scroll axis as sent back by the navigation script.
    #[must_use]
    pub const fn scroll_param(&self) -> &'static str {
        match self.state.scroll {
            ScrollState::AtTop => "at_top",
            ScrollState::Scrolled => "scrolled",
        }
    }
}

// =============================================================================
// Students
// =============================================================================

/// Student card on the index page.
#[derive(Debug, Clone)]
pub struct StudentCard {
    pub href: String,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl StudentCard {
    #[must_use]
    pub fn new(state: &AppState, summary: &StudentSummary) -> Self {
        Self {
            href: format!("/etudiants/{}", summary.student.slug),
            name: summary.full_name(),
            bio: summary.student.bio.clone(),
            avatar_url: summary
                .avatar
                .map(|file| state.asset_url(file.id, Some(AVATAR_WIDTH))),
        }
    }
}

/// A social link on a portfolio.
#[derive(Debug, Clone)]
pub struct SocialLinkView {
    pub label: String,
    pub url: String,
}

impl From<&SocialNetwork> for SocialLinkView {
    fn from(link: &SocialNetwork) -> Self {
        Self {
            label: link.platform.label().to_owned(),
            url: link.link.clone(),
        }
    }
}

/// A student portfolio page.
#[derive(Debug, Clone)]
pub struct PortfolioView {
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub projects: Vec<ProjectLink>,
    pub social_links: Vec<SocialLinkView>,
}

/// A project listed on a portfolio.
#[derive(Debug, Clone)]
pub struct ProjectLink {
    pub href: String,
    pub title: String,
    pub year: i32,
}

impl From<&Project> for ProjectLink {
    fn from(project: &Project) -> Self {
        use chrono::Datelike;
        Self {
            href: format!("/projets/{}", project.id),
            title: project.title.clone(),
            year: project.audit.date_created.year(),
        }
    }
}

impl PortfolioView {
    #[must_use]
    pub fn new(state: &AppState, student: &StudentWithRelations) -> Self {
        Self {
            name: student.full_name(),
            bio: student.student.bio.clone(),
            avatar_url: student
                .avatar
                .map(|file| state.asset_url(file.id, Some(AVATAR_WIDTH))),
            projects: student.projects.iter().map(ProjectLink::from).collect(),
            social_links: student
                .social_networks
                .iter()
                .map(SocialLinkView::from)
                .collect(),
        }
    }
}

// =============================================================================
// Projects
// =============================================================================

/// Image display data for templates.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Project card in the landing page gallery.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub href: String,
    pub title: String,
    pub student_name: Option<String>,
    pub cover: Option<ImageView>,
}

impl ProjectCard {
    #[must_use]
    pub fn new(state: &AppState, project: &ProjectWithRelations) -> Self {
        Self {
            href: format!("/projets/{}", project.project.id),
            title: project.project.title.clone(),
            student_name: project.student.as_ref().map(StudentWithRelations::full_name),
            cover: project.cover().map(|image| ImageView {
                url: state.asset_url(image.image, Some(CARD_WIDTH)),
                alt: project.project.title.clone(),
            }),
        }
    }
}

/// A project page.
#[derive(Debug, Clone)]
pub struct ProjectView {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub created: NaiveDate,
    pub student_name: Option<String>,
    pub student_href: Option<String>,
    pub images: Vec<ImageView>,
}

impl ProjectView {
    #[must_use]
    pub fn new(state: &AppState, project: &ProjectWithRelations) -> Self {
        let title = &project.project.title;
        let images = project
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| ImageView {
                url: state.asset_url(image.image, Some(GALLERY_WIDTH)),
                alt: format!("{title} - image {}", index + 1),
            })
            .collect();

        Self {
            title: title.clone(),
            description: project.project.description.clone(),
            link: project.project.link.clone(),
            created: project.project.audit.date_created.date_naive(),
            student_name: project.student.as_ref().map(StudentWithRelations::full_name),
            student_href: project
                .student
                .as_ref()
                .map(|s| format!("/etudiants/{}", s.student.slug)),
            images,
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Event card on listings.
#[derive(Debug, Clone)]
pub struct EventCard {
    pub href: String,
    pub title: String,
    pub start: NaiveDate,
    /// Last day, for events spanning several days.
    pub end: Option<NaiveDate>,
    pub location: Option<String>,
    pub status_label: &'static str,
    pub cancelled: bool,
}

impl From<&Event> for EventCard {
    fn from(event: &Event) -> Self {
        Self {
            href: format!("/evenements/{}", event.id),
            title: event.title.clone(),
            start: event.start_date.date_naive(),
            end: (!event.is_single_day()).then(|| event.end_date.date_naive()),
            location: event.location.clone(),
            status_label: event.status.label(),
            cancelled: event.status == EventStatus::Cancelled,
        }
    }
}

/// Split events into upcoming and past.
///
/// An event is past once its backend status says so or once it has ended.
/// Upcoming events keep start order; past events are most recent first.
#[must_use]
pub fn split_events(events: &[Event], now: DateTime<Utc>) -> (Vec<EventCard>, Vec<EventCard>) {
    let (past, upcoming): (Vec<&Event>, Vec<&Event>) = events
        .iter()
        .partition(|event| event.status == EventStatus::Past || event.end_date < now);

    let upcoming = upcoming.into_iter().map(EventCard::from).collect();
    let past = past.into_iter().rev().map(EventCard::from).collect();
    (upcoming, past)
}
