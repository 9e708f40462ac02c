//! Built-in panel definitions

use crate::panel::graph::PanelGraph;
use crate::panel::task_spec::{TaskId, TaskSpec};
use crate::panel::worker::Worker;

const SPECIALIST_CONTRACT: &str = "A. Most likely diagnosis\n\
B. Most appropriate primary team\n\
C. Other treating teams\n\
D. Numbered list of treatment plan";

const DECISION_CONTRACT: &str =
    "Final Decision: A. Diagnosis, B. Primary team, C. Treating teams, D. Treatment plan";

fn specialist(id: &str, role: &str, goal: &str, backstory: &str, specialty: &str) -> TaskSpec {
    TaskSpec::new(
        id,
        format!(
            "Given the patient case: \"{{case}}\", discuss relevant {} aspects.",
            specialty
        ),
        SPECIALIST_CONTRACT,
        Worker::new(role, goal, backstory),
    )
}

/// The default panel: six medical specialists feeding a hospital director.
///
/// Every specialist is a leaf and runs concurrently; the director is the
/// single decision task, with the specialists' opinions folded into its
/// prompt in the order listed here.
pub fn medical_board() -> PanelGraph {
    let specialists = vec![
        specialist(
            "emergency_physician",
            "Emergency Physician",
            "Determine emergency care requirements",
            "Experienced in rapid assessment and treatment of acute conditions.",
            "emergency care",
        ),
        specialist(
            "internist",
            "Internist",
            "Assess and manage internal medicine conditions",
            "Specializes in the comprehensive care of adults, managing complex illnesses.",
            "internal medicine",
        ),
        specialist(
            "surgeon",
            "Surgeon",
            "Evaluate the need for surgical intervention",
            "Expert in performing surgical procedures to treat various conditions.",
            "surgical intervention",
        ),
        specialist(
            "gynaecologist",
            "Gynaecologist",
            "Address gynecological aspects of the patient case",
            "Focuses on women's reproductive health and related surgical treatments.",
            "gynecological care",
        ),
        specialist(
            "obstetrician",
            "Obstetrician",
            "Consider obstetric care in the patient case",
            "Specializes in pregnancy, childbirth, and the postpartum period.",
            "obstetric care",
        ),
        specialist(
            "psychiatrist",
            "Psychiatrist",
            "Assess mental health aspects of the patient case",
            "Expert in the diagnosis, treatment, and prevention of mental illness.",
            "mental health",
        ),
    ];

    let deps: Vec<TaskId> = specialists.iter().map(|spec| spec.id().clone()).collect();

    let director = TaskSpec::new(
        "hospital_director",
        "Given all specialist inputs for the patient case: \"{case}\", \
         make the final decision on patient care.",
        DECISION_CONTRACT,
        Worker::new(
            "Hospital Director",
            "Make final decisions on diagnosis and management plan",
            "Oversees the integration of different specialties for optimal patient care.",
        ),
    )
    .with_depends_on(deps);

    let mut specs = specialists;
    specs.push(director);

    // The built-in panel is statically well-formed.
    PanelGraph::new(specs).expect("built-in medical board must be a valid panel")
}
