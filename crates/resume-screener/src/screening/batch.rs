use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

use super::document::DocumentRef;
use super::extraction::{ContentExtractor, ExtractionError, TextExtractor};
use super::matching::{Qualification, QualificationMatcher};
use super::result::EvaluationResult;
use super::routing::{ClassificationRouter, RoutingError};

/// Lifecycle of the evaluator's most recent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Message delivered from the worker to the caller, in input order.
///
/// Every run ends with exactly one `Completed` or `Failed`.
#[derive(Debug)]
pub enum BatchEvent {
    Evaluated(EvaluationResult),
    Completed(RunSummary),
    Failed(RunFailure),
}

impl BatchEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BatchEvent::Evaluated(_))
    }
}

/// Totals reported once every document has been filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub unreadable: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    fn start(started_at: DateTime<Utc>) -> Self {
        Self {
            total: 0,
            approved: 0,
            rejected: 0,
            unreadable: 0,
            started_at,
            finished_at: started_at,
        }
    }

    fn record(&mut self, result: &EvaluationResult) {
        self.total += 1;
        if result.verdict.is_approved() {
            self.approved += 1;
        } else {
            self.rejected += 1;
        }
        if result.is_unreadable() {
            self.unreadable += 1;
        }
    }

    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

/// Terminal payload for a run aborted because a document could not be filed.
#[derive(Debug)]
pub struct RunFailure {
    pub index: usize,
    pub document: DocumentRef,
    pub error: RoutingError,
}

/// Input rejected before any document is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("no documents selected")]
    NoDocuments,
    #[error("no qualifications defined")]
    NoQualifications,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("a screening run is already in progress")]
    AlreadyRunning,
    #[error("document {index} ({}) could not be filed: {source}", .path.display())]
    Routing {
        index: usize,
        path: PathBuf,
        #[source]
        source: RoutingError,
    },
}

impl From<RunFailure> for BatchError {
    fn from(failure: RunFailure) -> Self {
        Self::Routing {
            index: failure.index,
            path: failure.document.path,
            source: failure.error,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("no document at index {index} in the last run ({available} available)")]
    NoSuchDocument { index: usize, available: usize },
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Snapshot of a run taken when it starts.
struct RunPlan {
    documents: Vec<DocumentRef>,
    matcher: QualificationMatcher,
    started_at: DateTime<Utc>,
}

struct Shared<E> {
    extractor: E,
    router: ClassificationRouter,
    state: Mutex<RunState>,
    last_run: Mutex<Vec<DocumentRef>>,
}

/// Extracts, matches, and files a batch of documents one at a time.
///
/// Cloning is cheap and every clone shares state, so at most one run is
/// active across all clones.
pub struct BatchEvaluator<E = ContentExtractor> {
    shared: Arc<Shared<E>>,
}

impl<E> Clone for BatchEvaluator<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl BatchEvaluator<ContentExtractor> {
    pub fn new(router: ClassificationRouter) -> Self {
        Self::with_extractor(ContentExtractor::new(), router)
    }
}

impl<E> BatchEvaluator<E>
where
    E: TextExtractor + 'static,
{
    pub fn with_extractor(extractor: E, router: ClassificationRouter) -> Self {
        Self {
            shared: Arc::new(Shared {
                extractor,
                router,
                state: Mutex::new(RunState::Idle),
                last_run: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> RunState {
        *self.shared.state.lock().expect("run state mutex poisoned")
    }

    /// Documents of the most recent run, in input order.
    pub fn last_run(&self) -> Vec<DocumentRef> {
        self.shared
            .last_run
            .lock()
            .expect("last run mutex poisoned")
            .clone()
    }

    /// Runs the batch on the calling thread, handing each result to `on_result`.
    pub fn run<F>(
        &self,
        paths: Vec<PathBuf>,
        qualifications: Vec<Qualification>,
        on_result: F,
    ) -> Result<RunSummary, BatchError>
    where
        F: FnMut(EvaluationResult),
    {
        let plan = self.begin(paths, qualifications)?;
        self.execute(plan, on_result).map_err(BatchError::from)
    }

    /// Starts the batch on a blocking worker and returns the event feed.
    ///
    /// Input is validated before the worker starts. Must be called from within
    /// a tokio runtime.
    pub fn spawn(
        &self,
        paths: Vec<PathBuf>,
        qualifications: Vec<Qualification>,
    ) -> Result<BatchRun, BatchError> {
        let plan = self.begin(paths, qualifications)?;
        let (sender, events) = mpsc::unbounded_channel();
        let evaluator = self.clone();

        let worker = tokio::task::spawn_blocking(move || {
            let outcome = evaluator.execute(plan, |result| {
                let _ = sender.send(BatchEvent::Evaluated(result));
            });
            let terminal = match outcome {
                Ok(summary) => BatchEvent::Completed(summary),
                Err(failure) => BatchEvent::Failed(failure),
            };
            let _ = sender.send(terminal);
        });

        Ok(BatchRun { events, worker })
    }

    /// Re-extracts document `index` of the last run for display.
    pub fn preview(&self, index: usize) -> Result<String, PreviewError> {
        let document = {
            let last_run = self.shared.last_run.lock().expect("last run mutex poisoned");
            last_run
                .get(index)
                .cloned()
                .ok_or(PreviewError::NoSuchDocument {
                    index,
                    available: last_run.len(),
                })?
        };

        Ok(self.shared.extractor.extract(&document.path)?)
    }

    fn begin(
        &self,
        paths: Vec<PathBuf>,
        qualifications: Vec<Qualification>,
    ) -> Result<RunPlan, BatchError> {
        if paths.is_empty() {
            return Err(InvalidInput::NoDocuments.into());
        }
        if qualifications.is_empty() {
            return Err(InvalidInput::NoQualifications.into());
        }

        let mut state = self.shared.state.lock().expect("run state mutex poisoned");
        if *state == RunState::Running {
            return Err(BatchError::AlreadyRunning);
        }

        let documents: Vec<DocumentRef> = paths.into_iter().map(DocumentRef::new).collect();
        *self.shared.last_run.lock().expect("last run mutex poisoned") = documents.clone();
        *state = RunState::Running;

        info!(
            documents = documents.len(),
            qualifications = qualifications.len(),
            "screening run started"
        );

        Ok(RunPlan {
            documents,
            matcher: QualificationMatcher::new(&qualifications),
            started_at: Utc::now(),
        })
    }

    fn execute<F>(&self, plan: RunPlan, mut on_result: F) -> Result<RunSummary, RunFailure>
    where
        F: FnMut(EvaluationResult),
    {
        let RunPlan {
            documents,
            matcher,
            started_at,
        } = plan;
        let mut summary = RunSummary::start(started_at);
        let _release = ReleaseOnPanic {
            state: &self.shared.state,
        };

        for (index, document) in documents.into_iter().enumerate() {
            match self.evaluate_one(index, document, &matcher) {
                Ok(result) => {
                    summary.record(&result);
                    on_result(result);
                }
                Err(failure) => {
                    error!(
                        index = failure.index,
                        file = %failure.document.display_name,
                        error = %failure.error,
                        "screening run aborted"
                    );
                    self.finish(RunState::Failed);
                    return Err(failure);
                }
            }
        }

        summary.finished_at = Utc::now();
        self.finish(RunState::Completed);
        info!(
            total = summary.total,
            approved = summary.approved,
            rejected = summary.rejected,
            unreadable = summary.unreadable,
            "screening run completed"
        );
        Ok(summary)
    }

    fn evaluate_one(
        &self,
        index: usize,
        document: DocumentRef,
        matcher: &QualificationMatcher,
    ) -> Result<EvaluationResult, RunFailure> {
        let outcome = match self.shared.extractor.extract(&document.path) {
            Ok(text) => Ok(matcher.evaluate(&text)),
            Err(err) => {
                warn!(file = %document.display_name, error = %err, "could not read document");
                Err(err.to_string())
            }
        };

        let passed = matches!(&outcome, Ok(matched) if matched.passed());
        let destination = match self.shared.router.route(&document.path, passed) {
            Ok(destination) => destination,
            Err(error) => {
                return Err(RunFailure {
                    index,
                    document,
                    error,
                })
            }
        };

        let result = match outcome {
            Ok(matched) => EvaluationResult::from_match(index, document, matched, destination),
            Err(reason) => {
                EvaluationResult::extraction_failed(index, document, reason, destination)
            }
        };

        info!(
            index,
            file = %result.document.display_name,
            format = result.document.format().label(),
            verdict = result.verdict.label(),
            findings = result.findings.len(),
            "document screened"
        );
        Ok(result)
    }

    fn finish(&self, next: RunState) {
        *self.shared.state.lock().expect("run state mutex poisoned") = next;
    }
}

/// Marks the run `Failed` if the worker unwinds mid-run.
struct ReleaseOnPanic<'a> {
    state: &'a Mutex<RunState>,
}

impl Drop for ReleaseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            error!("screening run aborted by a panic");
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *state = RunState::Failed;
        }
    }
}

/// Handle to a run executing on the background worker.
pub struct BatchRun {
    events: mpsc::UnboundedReceiver<BatchEvent>,
    worker: JoinHandle<()>,
}

impl BatchRun {
    /// Next event in input order; `None` once the worker has exited.
    pub async fn next_event(&mut self) -> Option<BatchEvent> {
        self.events.recv().await
    }

    /// Drains every remaining event and waits for the worker.
    pub async fn collect(mut self) -> Result<Vec<BatchEvent>, JoinError> {
        let mut collected = Vec::new();
        while let Some(event) = self.events.recv().await {
            collected.push(event);
        }
        self.worker.await?;
        Ok(collected)
    }

    pub async fn join(self) -> Result<(), JoinError> {
        self.worker.await
    }
}
