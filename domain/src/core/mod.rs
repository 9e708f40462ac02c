//! Core domain concepts shared across all subdomains.
//!
//! - [`case::CaseInput`] — a validated case description submitted to the panel
//! - [`error::DomainError`] — domain-level errors

pub mod case;
pub mod error;
