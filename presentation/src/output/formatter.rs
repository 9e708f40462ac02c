//! Output formatter trait

use consilium_domain::CaseReport;

/// Trait for formatting case reports
pub trait OutputFormatter {
    /// Format the complete report with every opinion
    fn format(&self, report: &CaseReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &CaseReport) -> String;

    /// Format the decision only (concise output)
    fn format_decision_only(&self, report: &CaseReport) -> String;
}
