//! Run Case use case
//!
//! Orchestrates one case submission across the panel: fan out each
//! dependency layer concurrently, hold a barrier until the whole layer is
//! terminal, fold outputs into dependent prompts in declaration order, and
//! return the decision task's output as the run result.

use crate::config::ExecutionParams;
use crate::ports::generator::{GenerationError, Generator};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use consilium_domain::{
    identity_preamble, resolve_prompt, CaseInput, CaseReport, Decision, DomainError, Opinion,
    PanelGraph, TaskId, TaskInstance,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can terminate a case run
#[derive(Error, Debug)]
pub enum RunCaseError {
    /// The decision task itself failed
    #[error("{role} failed: {source}")]
    TaskFailed {
        task: TaskId,
        role: String,
        source: GenerationError,
    },

    /// An upstream task failed, so the decision task was never dispatched
    #[error("{blocked} never ran: {role} failed: {source}")]
    DependencyFailure {
        blocked: TaskId,
        failed: TaskId,
        role: String,
        source: GenerationError,
    },

    #[error("scheduler join error: {0}")]
    Join(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RunCaseError {
    /// Role of the specialist whose failure terminated the run, if any
    pub fn failed_role(&self) -> Option<&str> {
        match self {
            RunCaseError::TaskFailed { role, .. }
            | RunCaseError::DependencyFailure { role, .. } => Some(role),
            _ => None,
        }
    }

    /// Category of the underlying generation failure, if any
    pub fn failure_kind(&self) -> Option<&'static str> {
        match self {
            RunCaseError::TaskFailed { source, .. }
            | RunCaseError::DependencyFailure { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Use case for running one case through the panel
///
/// The panel graph and the generation capability are shared read-only
/// state; every invocation of [`run`](Self::run) owns its instances and
/// outputs exclusively, so concurrent submissions never interact.
pub struct RunCaseUseCase<G: Generator + 'static> {
    panel: Arc<PanelGraph>,
    generator: Arc<G>,
    params: ExecutionParams,
}

impl<G: Generator + 'static> RunCaseUseCase<G> {
    pub fn new(panel: Arc<PanelGraph>, generator: Arc<G>) -> Self {
        Self {
            panel,
            generator,
            params: ExecutionParams::default(),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the run with default (no-op) progress
    pub async fn run(&self, case: CaseInput) -> Result<CaseReport, RunCaseError> {
        self.run_with_progress(case, &NoProgress).await
    }

    /// Execute the run with progress callbacks
    pub async fn run_with_progress(
        &self,
        case: CaseInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<CaseReport, RunCaseError> {
        info!(
            tasks = self.panel.len(),
            layers = self.panel.layers().len(),
            "Starting case run"
        );

        let mut instances: HashMap<TaskId, TaskInstance> = self
            .panel
            .specs()
            .iter()
            .map(|spec| (spec.id().clone(), TaskInstance::new(spec.id().clone())))
            .collect();
        let mut outputs: HashMap<TaskId, String> = HashMap::new();
        let mut failures: HashMap<TaskId, GenerationError> = HashMap::new();

        let layer_count = self.panel.layers().len();
        for (layer_index, layer) in self.panel.layers().iter().enumerate() {
            self.run_layer(layer_index, layer, &case, &mut instances, &outputs, progress, &mut failures)
                .await?;
            progress.on_layer_complete(layer_index);

            // Barrier has passed: surface the first-declared failure, if any.
            if let Some(failed_id) = layer.iter().find(|id| failures.contains_key(*id)) {
                let source = failures
                    .remove(failed_id)
                    .ok_or_else(|| DomainError::UnknownTask(failed_id.to_string()))?;
                let role = self.role_of(failed_id);
                warn!(task = %failed_id, role = %role, "Case run failed");
                progress.on_run_complete(false);

                let is_sink = failed_id == self.panel.decision_task();
                return Err(if is_sink {
                    RunCaseError::TaskFailed {
                        task: failed_id.clone(),
                        role,
                        source,
                    }
                } else {
                    RunCaseError::DependencyFailure {
                        blocked: self.panel.decision_task().clone(),
                        failed: failed_id.clone(),
                        role,
                        source,
                    }
                });
            }

            for id in layer {
                if let Some(instance) = instances.get(id) {
                    if let Some(output) = instance.output() {
                        outputs.insert(id.clone(), output.to_string());
                    }
                }
            }
            debug!(layer = layer_index, of = layer_count, "Layer complete");
        }

        progress.on_run_complete(true);
        self.assemble_report(case, outputs)
    }

    /// Dispatch one layer concurrently and block until every member is
    /// terminal. Failures are recorded, never raised mid-layer: siblings
    /// already in flight always run to completion.
    #[allow(clippy::too_many_arguments)]
    async fn run_layer(
        &self,
        layer_index: usize,
        layer: &[TaskId],
        case: &CaseInput,
        instances: &mut HashMap<TaskId, TaskInstance>,
        outputs: &HashMap<TaskId, String>,
        progress: &dyn ProgressNotifier,
        failures: &mut HashMap<TaskId, GenerationError>,
    ) -> Result<(), RunCaseError> {
        progress.on_layer_start(layer_index, layer.len());

        let mut join_set = JoinSet::new();

        for id in layer {
            let spec = self
                .panel
                .get(id)
                .ok_or_else(|| DomainError::UnknownTask(id.to_string()))?
                .clone();

            let upstream: Vec<(TaskId, String)> = spec
                .depends_on()
                .iter()
                .filter_map(|dep| outputs.get(dep).map(|text| (dep.clone(), text.clone())))
                .collect();
            let prompt = resolve_prompt(&spec, case, &upstream)?;

            if let Some(instance) = instances.get_mut(id) {
                instance.start(prompt.clone());
            }

            let generator = Arc::clone(&self.generator);
            let deadline = self.params.task_deadline;
            let task_id = id.clone();

            join_set.spawn(async move {
                let system_prompt = identity_preamble(spec.worker());
                let call = generator.generate(spec.worker(), &system_prompt, &prompt);
                let result = match deadline {
                    Some(limit) => match tokio::time::timeout(limit, call).await {
                        Ok(result) => result,
                        Err(_) => Err(GenerationError::Timeout),
                    },
                    None => call.await,
                };
                (task_id, result)
            });
        }

        let mut join_error = None;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, Ok(output))) => {
                    debug!(task = %id, "Task done");
                    progress.on_task_complete(layer_index, &self.role_of(&id), true);
                    if let Some(instance) = instances.get_mut(&id) {
                        instance.complete(output);
                    }
                }
                Ok((id, Err(error))) => {
                    warn!(task = %id, error = %error, "Task failed");
                    progress.on_task_complete(layer_index, &self.role_of(&id), false);
                    if let Some(instance) = instances.get_mut(&id) {
                        instance.fail(error.to_string());
                    }
                    failures.insert(id, error);
                }
                Err(error) => {
                    warn!(error = %error, "Task join error");
                    join_error = Some(error.to_string());
                }
            }
        }

        match join_error {
            Some(error) => Err(RunCaseError::Join(error)),
            None => Ok(()),
        }
    }

    fn assemble_report(
        &self,
        case: CaseInput,
        mut outputs: HashMap<TaskId, String>,
    ) -> Result<CaseReport, RunCaseError> {
        let decision_id = self.panel.decision_task();
        let decision_text = outputs
            .remove(decision_id)
            .ok_or_else(|| DomainError::MissingUpstreamOutput(decision_id.to_string()))?;
        let decision = Decision::new(self.role_of(decision_id), decision_text);

        let mut opinions = Vec::new();
        for spec in self.panel.specs() {
            if spec.id() == decision_id {
                continue;
            }
            let content = outputs
                .remove(spec.id())
                .ok_or_else(|| DomainError::MissingUpstreamOutput(spec.id().to_string()))?;
            opinions.push(Opinion::new(
                spec.id().as_str(),
                spec.worker().role(),
                content,
            ));
        }

        info!("Case run complete");
        Ok(CaseReport::new(case.into_content(), opinions, decision))
    }

    fn role_of(&self, id: &TaskId) -> String {
        self.panel
            .get(id)
            .map(|spec| spec.worker().role().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use consilium_domain::{TaskSpec, Worker};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    // ==================== Test Doubles ====================

    #[derive(Clone, Copy)]
    enum Behavior {
        Reply(&'static str),
        SlowReply(u64, &'static str),
        SlowFailNetwork(u64),
        FailTimeout,
        FailNetwork,
        /// Fail only when the resolved prompt mentions the given marker,
        /// otherwise answer normally.
        FailOnCase(&'static str, &'static str),
    }

    struct RecordedCall {
        role: String,
        prompt: String,
        started_at: Instant,
    }

    /// Deterministic stand-in for the generation backend, scripted per role.
    struct ScriptedGenerator {
        scripts: HashMap<&'static str, Behavior>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl ScriptedGenerator {
        fn new(scripts: Vec<(&'static str, Behavior)>) -> Self {
            Self {
                scripts: scripts.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls_for(&self, role: &str) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.role == role)
                .map(|call| call.prompt.clone())
                .collect()
        }

        fn start_times(&self, role: &str) -> Vec<Instant> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.role == role)
                .map(|call| call.started_at)
                .collect()
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(
            &self,
            identity: &Worker,
            _system_prompt: &str,
            prompt: &str,
        ) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(RecordedCall {
                role: identity.role().to_string(),
                prompt: prompt.to_string(),
                started_at: Instant::now(),
            });

            let behavior = self
                .scripts
                .get(identity.role())
                .copied()
                .unwrap_or(Behavior::Reply("unscripted"));

            match behavior {
                Behavior::Reply(text) => Ok(text.to_string()),
                Behavior::SlowReply(ms, text) => {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    Ok(text.to_string())
                }
                Behavior::SlowFailNetwork(ms) => {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    Err(GenerationError::Network("connection reset".into()))
                }
                Behavior::FailTimeout => Err(GenerationError::Timeout),
                Behavior::FailNetwork => Err(GenerationError::Network("connection refused".into())),
                Behavior::FailOnCase(marker, text) => {
                    if prompt.contains(marker) {
                        Err(GenerationError::Network("connection refused".into()))
                    } else {
                        Ok(text.to_string())
                    }
                }
            }
        }
    }

    fn spec(id: &str, role: &str, deps: &[&str]) -> TaskSpec {
        TaskSpec::new(
            id,
            format!("Given the case: \"{{case}}\", give the {} view.", role),
            "A structured opinion",
            Worker::new(role, "evaluate the case", "seasoned specialist"),
        )
        .with_depends_on(deps.iter().map(|dep| TaskId::new(*dep)).collect())
    }

    /// Two leaves feeding one decision task: {A, B} -> C
    fn panel_abc() -> Arc<PanelGraph> {
        Arc::new(
            PanelGraph::new(vec![
                spec("a", "WorkerA", &[]),
                spec("b", "WorkerB", &[]),
                spec("c", "WorkerC", &["a", "b"]),
            ])
            .unwrap(),
        )
    }

    fn use_case(
        panel: Arc<PanelGraph>,
        generator: ScriptedGenerator,
    ) -> (RunCaseUseCase<ScriptedGenerator>, Arc<ScriptedGenerator>) {
        let generator = Arc::new(generator);
        (
            RunCaseUseCase::new(panel, Arc::clone(&generator)),
            generator,
        )
    }

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_end_to_end_fan_in() {
        let (uc, generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::Reply("opinion-A")),
                ("WorkerB", Behavior::Reply("opinion-B")),
                ("WorkerC", Behavior::Reply("final-decision")),
            ]),
        );

        let report = uc.run("test-case-1".into()).await.unwrap();

        assert_eq!(report.final_text(), "final-decision");
        assert_eq!(report.case, "test-case-1");
        let roles: Vec<&str> = report.opinions.iter().map(|o| o.role.as_str()).collect();
        assert_eq!(roles, ["WorkerA", "WorkerB"]);

        let decision_prompts = generator.calls_for("WorkerC");
        assert_eq!(decision_prompts.len(), 1);
        let prompt = &decision_prompts[0];
        assert!(prompt.contains("test-case-1"));
        let pos_a = prompt.find("opinion-A").unwrap();
        let pos_b = prompt.find("opinion-B").unwrap();
        assert!(pos_a < pos_b);
    }

    #[tokio::test]
    async fn test_leaves_dispatch_concurrently_and_exactly_once() {
        let (uc, generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::SlowReply(100, "opinion-A")),
                ("WorkerB", Behavior::SlowReply(100, "opinion-B")),
                ("WorkerC", Behavior::Reply("decision")),
            ]),
        );

        let started = Instant::now();
        uc.run("test-case-1".into()).await.unwrap();
        let elapsed = started.elapsed();

        // Serial execution would need >= 200ms; concurrent needs ~100ms.
        assert!(
            elapsed < Duration::from_millis(180),
            "leaves did not run concurrently: {elapsed:?}"
        );
        assert_eq!(generator.calls_for("WorkerA").len(), 1);
        assert_eq!(generator.calls_for("WorkerB").len(), 1);
        assert_eq!(generator.start_times("WorkerC").len(), 1);
    }

    #[tokio::test]
    async fn test_context_order_ignores_completion_order() {
        // A finishes last, B first; the decision prompt must still list
        // A's opinion before B's.
        let (uc, generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::SlowReply(80, "opinion-A")),
                ("WorkerB", Behavior::Reply("opinion-B")),
                ("WorkerC", Behavior::Reply("decision")),
            ]),
        );

        uc.run("test-case-1".into()).await.unwrap();

        let prompt = &generator.calls_for("WorkerC")[0];
        let pos_a = prompt.find("opinion-A").unwrap();
        let pos_b = prompt.find("opinion-B").unwrap();
        assert!(pos_a < pos_b, "declaration order was not preserved");
    }

    #[tokio::test]
    async fn test_leaf_failure_blocks_decision() {
        let (uc, generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::FailTimeout),
                ("WorkerB", Behavior::Reply("opinion-B")),
                ("WorkerC", Behavior::Reply("decision")),
            ]),
        );

        let error = uc.run("test-case-1".into()).await.unwrap_err();

        match &error {
            RunCaseError::DependencyFailure {
                blocked,
                failed,
                role,
                source,
            } => {
                assert_eq!(blocked.as_str(), "c");
                assert_eq!(failed.as_str(), "a");
                assert_eq!(role, "WorkerA");
                assert!(matches!(source, GenerationError::Timeout));
            }
            other => panic!("expected DependencyFailure, got {other:?}"),
        }
        assert_eq!(error.failed_role(), Some("WorkerA"));
        assert_eq!(error.failure_kind(), Some("timeout"));
        assert!(generator.calls_for("WorkerC").is_empty());
    }

    #[tokio::test]
    async fn test_deadline_surfaces_as_timeout() {
        let (uc, _generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::SlowReply(5_000, "too late")),
                ("WorkerB", Behavior::Reply("opinion-B")),
            ]),
        );
        let uc = uc.with_params(
            ExecutionParams::default().with_task_deadline(Some(Duration::from_millis(50))),
        );

        let error = uc.run("test-case-1".into()).await.unwrap_err();
        assert_eq!(error.failed_role(), Some("WorkerA"));
        assert_eq!(error.failure_kind(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_first_declared_failure_wins() {
        // B fails immediately, A fails later; the surfaced error must
        // still name A, the first failing task in declaration order.
        let (uc, _generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::SlowFailNetwork(60)),
                ("WorkerB", Behavior::FailTimeout),
            ]),
        );

        let error = uc.run("test-case-1".into()).await.unwrap_err();
        assert_eq!(error.failed_role(), Some("WorkerA"));
        assert_eq!(error.failure_kind(), Some("network"));
    }

    #[tokio::test]
    async fn test_decision_failure_is_task_failed() {
        let (uc, _generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::Reply("opinion-A")),
                ("WorkerB", Behavior::Reply("opinion-B")),
                ("WorkerC", Behavior::FailNetwork),
            ]),
        );

        let error = uc.run("test-case-1".into()).await.unwrap_err();
        match error {
            RunCaseError::TaskFailed { task, role, source } => {
                assert_eq!(task.as_str(), "c");
                assert_eq!(role, "WorkerC");
                assert!(matches!(source, GenerationError::Network(_)));
            }
            other => panic!("expected TaskFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_isolated() {
        let (uc, _generator) = use_case(
            panel_abc(),
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::FailOnCase("case-bad", "opinion-A")),
                ("WorkerB", Behavior::Reply("opinion-B")),
                ("WorkerC", Behavior::Reply("decision")),
            ]),
        );

        let (bad, good) = futures::join!(uc.run("case-bad".into()), uc.run("case-good".into()));

        assert!(bad.is_err());
        let report = good.unwrap();
        assert_eq!(report.final_text(), "decision");
    }

    #[tokio::test]
    async fn test_three_layer_chain() {
        let panel = Arc::new(
            PanelGraph::new(vec![
                spec("a", "WorkerA", &[]),
                spec("b", "WorkerB", &["a"]),
                spec("c", "WorkerC", &["a", "b"]),
            ])
            .unwrap(),
        );
        let (uc, generator) = use_case(
            panel,
            ScriptedGenerator::new(vec![
                ("WorkerA", Behavior::Reply("opinion-A")),
                ("WorkerB", Behavior::Reply("opinion-B")),
                ("WorkerC", Behavior::Reply("decision")),
            ]),
        );

        let report = uc.run("test-case-1".into()).await.unwrap();
        assert_eq!(report.final_text(), "decision");

        let b_prompt = &generator.calls_for("WorkerB")[0];
        assert!(b_prompt.contains("opinion-A"));

        let c_prompt = &generator.calls_for("WorkerC")[0];
        assert!(c_prompt.contains("opinion-A"));
        assert!(c_prompt.contains("opinion-B"));
    }
}
