//! Write-path validation errors.
//!
//! # Invariants
//! - Every variant is raised before any storage write is attempted.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for a mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date input is missing or not a canonical `YYYY-MM-DD` calendar day.
    InvalidDate(String),
    /// Task or habit text is blank after trim.
    EmptyText,
    /// Slider dimension outside the inclusive `1..=5` range.
    DimensionOutOfRange { dimension: &'static str, value: i64 },
    /// Record id differs from the key it is stored under.
    IdMismatch { key: String, record_id: String },
    /// Display name is blank after trim.
    EmptyDisplayName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::EmptyText => write!(f, "text must not be blank"),
            Self::DimensionOutOfRange { dimension, value } => {
                write!(f, "{dimension} must be within 1..=5, got {value}")
            }
            Self::IdMismatch { key, record_id } => {
                write!(f, "record id `{record_id}` does not match key `{key}`")
            }
            Self::EmptyDisplayName => write!(f, "display name must not be blank"),
        }
    }
}

impl Error for ValidationError {}
