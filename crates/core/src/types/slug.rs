//! URL-safe student slug.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `a-z`, `0-9` and `-`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
    /// The input contains two hyphens in a row.
    #[error("slug cannot contain consecutive hyphens")]
    DoubleHyphen,
}

/// Human-readable identifier used in student URLs (`/etudiants/{slug}`).
///
/// ## Constraints
///
/// - Length: 1-96 characters
/// - Only lowercase ASCII letters, digits and hyphens
/// - No leading, trailing or consecutive hyphens
///
/// ## Examples
///
/// ```
/// use modart_core::Slug;
///
/// assert!(Slug::parse("emma-laurent").is_ok());
/// assert!(Slug::parse("chloe-moreau-2").is_ok());
///
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("Emma Laurent").is_err());
/// assert!(Slug::parse("-emma").is_err());
/// assert!(Slug::parse("emma--laurent").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 96;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains anything
    /// other than `a-z`, `0-9` and `-`, or misplaces a hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        if s.contains("--") {
            return Err(SlugError::DoubleHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("emma-laurent").is_ok());
        assert!(Slug::parse("a").is_ok());
        assert!(Slug::parse("thomas-dubois-2024").is_ok());
        assert!(Slug::parse("does-not-exist").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Slug::MAX_LENGTH + 1);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_parse_rejects_uppercase_and_spaces() {
        assert_eq!(
            Slug::parse("Emma"),
            Err(SlugError::InvalidCharacter('E'))
        );
        assert_eq!(
            Slug::parse("emma laurent"),
            Err(SlugError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_parse_rejects_accents() {
        assert_eq!(
            Slug::parse("chloé"),
            Err(SlugError::InvalidCharacter('é'))
        );
    }

    #[test]
    fn test_parse_hyphen_placement() {
        assert_eq!(Slug::parse("-emma"), Err(SlugError::EdgeHyphen));
        assert_eq!(Slug::parse("emma-"), Err(SlugError::EdgeHyphen));
        assert_eq!(Slug::parse("emma--laurent"), Err(SlugError::DoubleHyphen));
    }

    #[test]
    fn test_deserialize_validates() {
        let slug: Slug = serde_json::from_str("\"emma-laurent\"").unwrap();
        assert_eq!(slug.as_str(), "emma-laurent");

        assert!(serde_json::from_str::<Slug>("\"Emma Laurent\"").is_err());
    }
}
