//! Header navigation state.
//!
//! The header has two independent axes: whether the mobile menu is open and
//! whether the page has scrolled past [`SCROLL_THRESHOLD`]. Both live in one
//! [`NavState`] and change only through [`NavState::apply`], which is total:
//! every event is accepted in every state.

use serde::{Deserialize, Serialize};

/// Vertical offset, in CSS pixels, past which the header turns solid.
pub const SCROLL_THRESHOLD: f64 = 10.0;

/// Mobile menu visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// Scroll position relative to [`SCROLL_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    #[default]
    AtTop,
    Scrolled,
}

impl ScrollState {
    /// Classify a scroll offset.
    ///
    /// Only a finite offset strictly above the threshold counts as scrolled.
    /// Negative offsets (overscroll bounce) and NaN are at the top.
    #[must_use]
    pub fn from_offset(offset: f64) -> Self {
        if offset.is_finite() && offset > SCROLL_THRESHOLD {
            Self::Scrolled
        } else {
            Self::AtTop
        }
    }
}

/// Input to the header state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// The page scrolled to `offset` pixels from the top.
    Scrolled { offset: f64 },
    /// The menu button was pressed.
    MenuToggled,
    /// The user navigated to another page.
    RouteChanged,
}

/// How the header bar is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderMode {
    /// Over the hero image: transparent background, light text.
    Transparent,
    /// Past the threshold: opaque background, dark text.
    Solid,
}

impl HeaderMode {
    /// CSS modifier class for the header element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Transparent => "header--transparent",
            Self::Solid => "header--solid",
        }
    }
}

/// Complete header state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NavState {
    pub menu: MenuState,
    pub scroll: ScrollState,
}

impl NavState {
    /// Menu closed, page at the top.
    pub const INITIAL: Self = Self {
        menu: MenuState::Closed,
        scroll: ScrollState::AtTop,
    };

    /// Apply one event.
    ///
    /// Scrolling only moves the scroll axis. Toggling only flips the menu.
    /// A route change closes the menu and leaves the scroll axis alone.
    #[must_use]
    pub fn apply(self, event: NavEvent) -> Self {
        match event {
            NavEvent::Scrolled { offset } => Self {
                scroll: ScrollState::from_offset(offset),
                ..self
            },
            NavEvent::MenuToggled => Self {
                menu: self.menu.toggled(),
                ..self
            },
            NavEvent::RouteChanged => Self {
                menu: MenuState::Closed,
                ..self
            },
        }
    }

    #[must_use]
    pub const fn header_mode(self) -> HeaderMode {
        match self.scroll {
            ScrollState::AtTop => HeaderMode::Transparent,
            ScrollState::Scrolled => HeaderMode::Solid,
        }
    }

    /// Whether the mobile menu panel is rendered.
    #[must_use]
    pub const fn menu_open(self) -> bool {
        matches!(self.menu, MenuState::Open)
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Pages listed in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Students,
    Events,
    About,
    Contact,
}

/// Header links in menu order.
pub const NAV_LINKS: [Route; 5] = [
    Route::Home,
    Route::Students,
    Route::Events,
    Route::About,
    Route::Contact,
];

impl Route {
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Students => "/etudiants",
            Self::Events => "/evenements",
            Self::About => "/a-propos",
            Self::Contact => "/contact",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Accueil",
            Self::Students => "Étudiants",
            Self::Events => "Événements",
            Self::About => "À propos",
            Self::Contact => "Contact",
        }
    }

    /// Whether this link is highlighted on `path`.
    ///
    /// Matching is exact: a student portfolio under `/etudiants/...` does
    /// not highlight "Étudiants".
    #[must_use]
    pub fn is_active(self, path: &str) -> bool {
        self.href() == path
    }

    /// The header route whose href is exactly `path`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        NAV_LINKS.into_iter().find(|route| route.is_active(path))
    }
}
