//! Console output formatter for case reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use consilium_domain::CaseReport;

/// Formats case reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &CaseReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Panel Report"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Case:".cyan().bold(), report.case));

        let roster: Vec<&str> = report
            .opinions
            .iter()
            .map(|opinion| opinion.role.as_str())
            .collect();
        output.push_str(&format!(
            "{} {}\n",
            "Panel:".cyan().bold(),
            roster.join(", ")
        ));

        output.push_str(&Self::section_header("Specialist Opinions"));
        for opinion in &report.opinions {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", opinion.role).yellow().bold(),
                opinion.content
            ));
        }

        output.push_str(&Self::section_header("Final Decision"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Decision maker: {}", report.decision.role)
                .yellow()
                .bold(),
            report.decision.content
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &CaseReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the decision only (concise output)
    pub fn format_decision_only(report: &CaseReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Panel Decision ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Case:".bold(), report.case));
        output.push_str(report.final_text());
        output.push('\n');

        output
    }

    /// Human-readable summary for a failed run
    pub fn format_failure(role: &str, kind: &str, detail: &str) -> String {
        format!(
            "{} {} failed ({}): {}",
            "Run failed:".red().bold(),
            role.yellow().bold(),
            kind,
            detail
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &CaseReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &CaseReport) -> String {
        Self::format_json(report)
    }

    fn format_decision_only(&self, report: &CaseReport) -> String {
        Self::format_decision_only(report)
    }
}
