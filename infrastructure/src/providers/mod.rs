//! Generation provider adapters

pub mod openrouter;

pub use openrouter::OpenRouterGenerator;
