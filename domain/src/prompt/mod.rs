//! Prompt domain
//!
//! Deterministic resolution of task templates into the concrete prompts
//! sent to the generation backend.

mod template;

pub use template::{identity_preamble, resolve_prompt};
