//! Panel dependency graph
//!
//! [`PanelGraph`] owns the fixed, ordered set of [`TaskSpec`]s and the
//! execution plan derived from their `depends_on` declarations. All
//! structural validation happens once, in [`PanelGraph::new`], before the
//! orchestrator accepts any submission: a malformed graph is a fatal
//! configuration error, never a runtime surprise.
//!
//! The plan is a list of topological layers. A layer holds every task
//! whose dependencies are satisfied by earlier layers; members of one
//! layer are independent of each other and always run concurrently.

use crate::panel::task_spec::{TaskId, TaskSpec};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors detected while validating a panel definition
///
/// All variants are fatal at startup; a panel that fails validation
/// never accepts case submissions.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Panel has no tasks")]
    EmptyPanel,

    #[error("Duplicate task id: {0}")]
    DuplicateTask(TaskId),

    #[error("Task {task} depends on unknown task {dependency}")]
    UnknownDependency { task: TaskId, dependency: TaskId },

    #[error("Dependency cycle involving tasks: {0:?}")]
    CyclicDependency(Vec<TaskId>),

    #[error("Panel has no decision task (every task has dependents)")]
    NoDecisionTask,

    #[error("Panel has multiple terminal tasks: {0:?} (exactly one decision task required)")]
    MultipleDecisionTasks(Vec<TaskId>),
}

/// The fixed panel: ordered task specs plus their execution plan
#[derive(Debug, Clone)]
pub struct PanelGraph {
    specs: Vec<TaskSpec>,
    layers: Vec<Vec<TaskId>>,
    decision: TaskId,
}

impl PanelGraph {
    /// Validate the task set and compute the topological execution plan.
    ///
    /// Invariants enforced here:
    /// - task ids are unique and every dependency references a known task
    /// - the dependency graph is acyclic
    /// - exactly one task is a sink (no other task depends on it); that
    ///   task is the decision task and its output is the run result
    pub fn new(specs: Vec<TaskSpec>) -> Result<Self, ConfigurationError> {
        if specs.is_empty() {
            return Err(ConfigurationError::EmptyPanel);
        }

        let mut known: HashSet<&TaskId> = HashSet::new();
        for spec in &specs {
            if !known.insert(spec.id()) {
                return Err(ConfigurationError::DuplicateTask(spec.id().clone()));
            }
        }

        for spec in &specs {
            for dep in spec.depends_on() {
                if !known.contains(dep) {
                    return Err(ConfigurationError::UnknownDependency {
                        task: spec.id().clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let layers = Self::compute_layers(&specs)?;
        let decision = Self::find_decision_task(&specs)?;

        Ok(Self {
            specs,
            layers,
            decision,
        })
    }

    /// Topological layers via Kahn-style peeling.
    ///
    /// Each pass collects every not-yet-placed task whose dependencies are
    /// all already placed; an empty pass with tasks remaining means the
    /// remainder forms a cycle.
    fn compute_layers(specs: &[TaskSpec]) -> Result<Vec<Vec<TaskId>>, ConfigurationError> {
        let mut placed: HashSet<&TaskId> = HashSet::new();
        let mut remaining: Vec<&TaskSpec> = specs.iter().collect();
        let mut layers = Vec::new();

        while !remaining.is_empty() {
            let ready: Vec<TaskId> = remaining
                .iter()
                .filter(|spec| spec.depends_on().iter().all(|dep| placed.contains(dep)))
                .map(|spec| spec.id().clone())
                .collect();

            if ready.is_empty() {
                let stuck = remaining.iter().map(|spec| spec.id().clone()).collect();
                return Err(ConfigurationError::CyclicDependency(stuck));
            }

            remaining.retain(|spec| !ready.contains(spec.id()));
            for spec in specs {
                if ready.contains(spec.id()) {
                    placed.insert(spec.id());
                }
            }
            layers.push(ready);
        }

        Ok(layers)
    }

    /// The single sink: the one task no other task depends on.
    fn find_decision_task(specs: &[TaskSpec]) -> Result<TaskId, ConfigurationError> {
        let mut dependents: HashMap<&TaskId, usize> =
            specs.iter().map(|spec| (spec.id(), 0)).collect();
        for spec in specs {
            for dep in spec.depends_on() {
                if let Some(count) = dependents.get_mut(dep) {
                    *count += 1;
                }
            }
        }

        let sinks: Vec<TaskId> = specs
            .iter()
            .filter(|spec| dependents[spec.id()] == 0)
            .map(|spec| spec.id().clone())
            .collect();

        match sinks.as_slice() {
            [] => Err(ConfigurationError::NoDecisionTask),
            [single] => Ok(single.clone()),
            _ => Err(ConfigurationError::MultipleDecisionTasks(sinks)),
        }
    }

    /// Task specs in declaration order
    pub fn specs(&self) -> &[TaskSpec] {
        &self.specs
    }

    /// Execution plan: layers in ascending dependency order.
    ///
    /// Ids within each layer follow panel declaration order.
    pub fn layers(&self) -> &[Vec<TaskId>] {
        &self.layers
    }

    /// Id of the decision task (the single sink)
    pub fn decision_task(&self) -> &TaskId {
        &self.decision
    }

    /// Look up a spec by id
    pub fn get(&self, id: &TaskId) -> Option<&TaskSpec> {
        self.specs.iter().find(|spec| spec.id() == id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
