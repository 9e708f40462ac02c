//! Prompt resolution
//!
//! Turns an immutable [`TaskSpec`] plus one case submission into the
//! concrete prompt text for the generation backend. Resolution is pure:
//! the same spec, case, and upstream outputs always produce byte-identical
//! text, and the shared spec is never written.

use crate::core::case::CaseInput;
use crate::core::error::DomainError;
use crate::panel::{TaskId, TaskSpec, Worker};

/// Placeholder substituted with the case description
const CASE_PLACEHOLDER: &str = "{case}";

/// Fixed identity preamble injected ahead of every task prompt.
///
/// Used as the system prompt for the worker's generation call.
pub fn identity_preamble(worker: &Worker) -> String {
    format!(
        "You are {role}. {backstory}\nYour goal: {goal}.",
        role = worker.role(),
        backstory = worker.backstory(),
        goal = worker.goal(),
    )
}

/// Resolve a task spec into the concrete prompt for one case.
///
/// The case is substituted into the template's `{case}` placeholder (or
/// prepended as a labeled block when the template carries none). Upstream
/// outputs are appended labeled by originating task, in the spec's
/// `depends_on` declaration order regardless of the order they are passed
/// in, so completion timing can never change the prompt. The
/// expected-output contract is appended verbatim.
///
/// Fails with [`DomainError::MissingUpstreamOutput`] if a declared
/// dependency has no output in `upstream`.
pub fn resolve_prompt(
    spec: &TaskSpec,
    case: &CaseInput,
    upstream: &[(TaskId, String)],
) -> Result<String, DomainError> {
    let mut prompt = if spec.prompt_template().contains(CASE_PLACEHOLDER) {
        spec.prompt_template()
            .replace(CASE_PLACEHOLDER, case.content())
    } else {
        format!("Case:\n{}\n\n{}", case.content(), spec.prompt_template())
    };

    if !spec.depends_on().is_empty() {
        prompt.push_str("\n\nInputs from prior tasks:\n");
        for dep in spec.depends_on() {
            let output = upstream
                .iter()
                .find(|(id, _)| id == dep)
                .map(|(_, text)| text.as_str())
                .ok_or_else(|| DomainError::MissingUpstreamOutput(dep.to_string()))?;
            prompt.push_str(&format!("\n--- {} ---\n{}\n", dep, output));
        }
    }

    prompt.push_str(&format!(
        "\n\nExpected output:\n{}",
        spec.expected_output()
    ));

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker() -> Worker {
        Worker::new(
            "Internist",
            "Assess internal medicine conditions",
            "Specializes in the comprehensive care of adults.",
        )
    }

    #[test]
    fn test_identity_preamble() {
        let preamble = identity_preamble(&worker());
        assert_eq!(
            preamble,
            "You are Internist. Specializes in the comprehensive care of adults.\n\
             Your goal: Assess internal medicine conditions."
        );
    }

    #[test]
    fn test_case_substitution() {
        let spec = TaskSpec::new(
            "internist",
            "Given the patient case: \"{case}\", discuss internal medicine aspects.",
            "A numbered list",
            worker(),
        );
        let prompt = resolve_prompt(&spec, &"test-case-1".into(), &[]).unwrap();
        assert!(prompt.contains("Given the patient case: \"test-case-1\""));
        assert!(prompt.ends_with("Expected output:\nA numbered list"));
        assert!(!prompt.contains("Inputs from prior tasks"));
    }

    #[test]
    fn test_template_without_placeholder_gets_case_block() {
        let spec = TaskSpec::new("internist", "Discuss the case.", "A list", worker());
        let prompt = resolve_prompt(&spec, &"test-case-1".into(), &[]).unwrap();
        assert!(prompt.starts_with("Case:\ntest-case-1\n\nDiscuss the case."));
    }

    #[test]
    fn test_upstream_folded_in_declaration_order() {
        let spec = TaskSpec::new("director", "Decide on \"{case}\".", "Final decision", worker())
            .with_depends_on(vec!["a".into(), "b".into()]);

        // Passed in completion order (b first); declaration order must win.
        let upstream = vec![
            (TaskId::new("b"), "opinion-B".to_string()),
            (TaskId::new("a"), "opinion-A".to_string()),
        ];
        let prompt = resolve_prompt(&spec, &"test-case-1".into(), &upstream).unwrap();

        let pos_a = prompt.find("opinion-A").unwrap();
        let pos_b = prompt.find("opinion-B").unwrap();
        assert!(pos_a < pos_b);
        assert!(prompt.contains("--- a ---"));
        assert!(prompt.contains("--- b ---"));
    }

    #[test]
    fn test_missing_upstream_output_fails() {
        let spec = TaskSpec::new("director", "Decide on {case}.", "Decision", worker())
            .with_depends_on(vec!["a".into()]);
        let result = resolve_prompt(&spec, &"case".into(), &[]);
        assert!(matches!(
            result,
            Err(DomainError::MissingUpstreamOutput(_))
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let spec = TaskSpec::new("director", "Decide on \"{case}\".", "Decision", worker())
            .with_depends_on(vec!["a".into()]);
        let upstream = vec![(TaskId::new("a"), "opinion-A".to_string())];

        let first = resolve_prompt(&spec, &"test-case-1".into(), &upstream).unwrap();
        let second = resolve_prompt(&spec, &"test-case-1".into(), &upstream).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_contract_appended_verbatim() {
        let contract = "A. Diagnosis\nB. Primary team";
        let spec = TaskSpec::new("internist", "Discuss {case}.", contract, worker());
        let prompt = resolve_prompt(&spec, &"case".into(), &[]).unwrap();
        assert!(prompt.ends_with(&format!("Expected output:\n{}", contract)));
    }
}
