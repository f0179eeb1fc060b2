//! Enumerated fields of Directus records.

use serde::{Deserialize, Serialize};

/// Directus account status (`directus_users.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Invited,
    Draft,
    Suspended,
    Archived,
}

impl UserStatus {
    /// Whether the account may currently act on content.
    ///
    /// Every status other than `active` revokes the account's role.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Invited => write!(f, "invited"),
            Self::Draft => write!(f, "draft"),
            Self::Suspended => write!(f, "suspended"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "invited" => Ok(Self::Invited),
            "draft" => Ok(Self::Draft),
            "suspended" => Ok(Self::Suspended),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid user status: {s}")),
        }
    }
}

/// Event lifecycle status (`events.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Past,
    Cancelled,
}

impl EventStatus {
    /// French label shown on event cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "À venir",
            Self::Past => "Passé",
            Self::Cancelled => "Annulé",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Past => write!(f, "past"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid event status: {s}")),
        }
    }
}

/// Social network a student links to.
///
/// Directus stores the platform as free text; well-known names are
/// recognised case-insensitively and anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    TikTok,
    LinkedIn,
    Behance,
    Pinterest,
    Facebook,
    X,
    YouTube,
    Website,
    Other(String),
}

impl Platform {
    /// Parse a free-text platform label. Never fails.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "instagram" => Self::Instagram,
            "tiktok" => Self::TikTok,
            "linkedin" => Self::LinkedIn,
            "behance" => Self::Behance,
            "pinterest" => Self::Pinterest,
            "facebook" => Self::Facebook,
            "x" | "twitter" => Self::X,
            "youtube" => Self::YouTube,
            "website" | "site" | "site web" | "portfolio" => Self::Website,
            _ => Self::Other(label.trim().to_owned()),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Instagram => "Instagram",
            Self::TikTok => "TikTok",
            Self::LinkedIn => "LinkedIn",
            Self::Behance => "Behance",
            Self::Pinterest => "Pinterest",
            Self::Facebook => "Facebook",
            Self::X => "X",
            Self::YouTube => "YouTube",
            Self::Website => "Site web",
            Self::Other(label) => label,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
