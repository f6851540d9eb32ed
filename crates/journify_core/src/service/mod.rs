//! Core use-case services.
//!
//! # Responsibility
//! - Turn UI-level requests (date strings, raw text) into validated store
//!   mutations.
//! - Keep the presentation layer decoupled from storage details.

pub mod companion;
pub mod journal_service;
pub mod mood_service;
pub mod productivity_service;
