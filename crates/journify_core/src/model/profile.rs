//! Session display name.
//!
//! The name lives only for the session; it is never persisted.

use crate::model::validation::ValidationError;
use std::fmt::{Display, Formatter};

const FALLBACK_NAME: &str = "User";

/// Trimmed, non-empty name shown on the dashboard greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dashboard greeting, falling back to a generic name.
pub fn greeting(name: Option<&DisplayName>) -> String {
    let name = name.map_or(FALLBACK_NAME, DisplayName::as_str);
    format!("Hello, {name}")
}

#[cfg(test)]
mod tests {
    use super::{greeting, DisplayName};

    #[test]
    fn parse_trims_and_rejects_blank() {
        let name = DisplayName::parse("  Ada ").expect("valid name");
        assert_eq!(name.as_str(), "Ada");
        assert!(DisplayName::parse("   ").is_err());
    }

    #[test]
    fn greeting_falls_back_to_user() {
        assert_eq!(greeting(None), "Hello, User");
        let name = DisplayName::parse("Ada").expect("valid name");
        assert_eq!(greeting(Some(&name)), "Hello, Ada");
    }
}
