//! Validated location identifiers.
//!
//! A [`LocationKey`] names the place a quality score is requested for: a
//! postal code, a `"lat,lon"` pair, or a short place name. Keys are trimmed
//! and restricted to a conservative character set so they can be embedded in
//! cache keys and file names without escaping.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted key, in bytes.
pub const MAX_LOCATION_KEY_LEN: usize = 64;

/// Errors returned by [`LocationKey::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationKeyError {
    /// No key was supplied, or it was only whitespace.
    #[error("location key is required")]
    Missing,
    /// The key exceeded [`MAX_LOCATION_KEY_LEN`] bytes.
    #[error("location key must be at most {max} bytes, found {len}")]
    TooLong {
        /// Length of the trimmed key.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// The key contained a character outside the accepted set.
    #[error("location key contains unsupported character {found:?}")]
    InvalidCharacter {
        /// First offending character.
        found: char,
    },
    /// The key started with a separator rather than a letter or digit.
    #[error("location key must start with a letter, digit or sign")]
    LeadingSeparator,
}

/// Trimmed, validated location identifier.
///
/// # Examples
/// ```
/// use afterglow_core::LocationKey;
///
/// # fn main() -> Result<(), afterglow_core::LocationKeyError> {
/// let key = LocationKey::parse("  11201 ")?;
/// assert_eq!(key.as_str(), "11201");
/// assert!(LocationKey::parse("../etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationKey(String);

impl LocationKey {
    /// Validate and normalise a raw key.
    ///
    /// Accepted characters are ASCII letters and digits plus space, `-`,
    /// `_`, `,` and `.`. The first character must be a letter, a digit or a
    /// `-` sign so negative coordinates remain expressible.
    ///
    /// # Errors
    /// Returns [`LocationKeyError`] when the key is empty, too long, or
    /// contains unsupported characters.
    pub fn parse(raw: &str) -> Result<Self, LocationKeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocationKeyError::Missing);
        }
        if trimmed.len() > MAX_LOCATION_KEY_LEN {
            return Err(LocationKeyError::TooLong {
                len: trimmed.len(),
                max: MAX_LOCATION_KEY_LEN,
            });
        }
        if let Some(found) = trimmed.chars().find(|ch| !is_key_char(*ch)) {
            return Err(LocationKeyError::InvalidCharacter { found });
        }
        if trimmed
            .chars()
            .next()
            .is_some_and(|first| !(first.is_ascii_alphanumeric() || first == '-'))
        {
            return Err(LocationKeyError::LeadingSeparator);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '-' | '_' | ',' | '.')
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for LocationKey {
    type Err = LocationKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocationKey {
    type Error = LocationKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocationKey> for String {
    fn from(key: LocationKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("11201", "11201")]
    #[case(" 90210\n", "90210")]
    #[case("40.6782,-73.9442", "40.6782,-73.9442")]
    #[case("-33.86,151.21", "-33.86,151.21")]
    #[case("Brooklyn, New York", "Brooklyn, New York")]
    fn accepts_common_location_forms(#[case] raw: &str, #[case] expected: &str) {
        let key = LocationKey::parse(raw).expect("key should be accepted");
        assert_eq!(key.as_str(), expected);
    }

    #[rstest]
    #[case("", LocationKeyError::Missing)]
    #[case("   ", LocationKeyError::Missing)]
    #[case("a/b", LocationKeyError::InvalidCharacter { found: '/' })]
    #[case("sunset_quality:1", LocationKeyError::InvalidCharacter { found: ':' })]
    #[case("..", LocationKeyError::LeadingSeparator)]
    #[case(",12345", LocationKeyError::LeadingSeparator)]
    fn rejects_malformed_keys(#[case] raw: &str, #[case] expected: LocationKeyError) {
        assert_eq!(LocationKey::parse(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_keys() {
        let raw = "9".repeat(MAX_LOCATION_KEY_LEN + 1);
        assert!(matches!(
            LocationKey::parse(&raw),
            Err(LocationKeyError::TooLong { .. })
        ));
    }

    #[rstest]
    fn deserialising_validates() {
        let ok: LocationKey = serde_json::from_str("\"11201\"").expect("valid key");
        assert_eq!(ok.as_str(), "11201");
        let err = serde_json::from_str::<LocationKey>("\"\"");
        assert!(err.is_err());
    }
}
