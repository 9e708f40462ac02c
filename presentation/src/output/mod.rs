//! Output formatting for case reports

pub mod console;
pub mod formatter;
