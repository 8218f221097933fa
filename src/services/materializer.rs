//! Instance materialization service.
//!
//! The daily batch entry point: expands every active, due task definition
//! into per-assignee task instances for one calendar date. The reference
//! date is an explicit parameter so the engine stays a pure function of
//! (state, date); resolving "today" is the caller's job.
//!
//! Invocation is not assumed to be exactly-once. The whole run is
//! idempotent: the instance store's unique key on
//! `(definition_id, personnel_id, deadline)` makes re-runs and concurrent
//! workers converge on the same set of rows.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::config::MaterializerSettings;
use crate::domain::models::run_report::{RunItemError, RunReport};
use crate::domain::models::task_definition::TaskDefinition;
use crate::domain::models::task_instance::TaskInstance;
use crate::domain::ports::definition_repository::DefinitionRepository;
use crate::domain::ports::exception_store::ExceptionStore;
use crate::domain::ports::instance_repository::{InsertOutcome, InstanceRepository};
use crate::domain::ports::notification_sink::NotificationSink;
use crate::domain::ports::personnel_directory::PersonnelDirectory;
use crate::services::assignee_resolver::AssigneeResolver;
use crate::services::exception_resolver::{ExceptionOutcome, ExceptionResolver};
use crate::services::notifier::DispatchNotifier;

/// Configuration for the materializer.
#[derive(Debug, Clone)]
pub struct MaterializerConfig {
    /// Maximum concurrent assignee workers across all definitions.
    pub max_concurrency: usize,
    /// Independent timeout for a single assignee's unit of work, so one
    /// stalled directory or store call cannot starve the whole batch.
    pub assignee_timeout: Duration,
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            assignee_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&MaterializerSettings> for MaterializerConfig {
    fn from(settings: &MaterializerSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency,
            assignee_timeout: Duration::from_secs(settings.assignee_timeout_secs),
        }
    }
}

/// Result of one assignee's unit of work.
enum AssigneeOutcome {
    Created { notified: bool },
    AlreadyMaterialized,
    Suppressed,
    Errored { personnel_id: Uuid, message: String },
}

/// Counters for one processed definition, merged into the run report.
#[derive(Default)]
struct DefinitionSummary {
    skipped_day: bool,
    created: usize,
    suppressed: usize,
    already_materialized: usize,
    notifications_sent: usize,
    notifications_failed: usize,
    errors: Vec<RunItemError>,
}

impl DefinitionSummary {
    fn record(&mut self, definition_id: Uuid, outcome: AssigneeOutcome) {
        match outcome {
            AssigneeOutcome::Created { notified } => {
                self.created += 1;
                if notified {
                    self.notifications_sent += 1;
                } else {
                    self.notifications_failed += 1;
                }
            }
            AssigneeOutcome::AlreadyMaterialized => self.already_materialized += 1,
            AssigneeOutcome::Suppressed => self.suppressed += 1,
            AssigneeOutcome::Errored { personnel_id, message } => {
                self.errors.push(RunItemError::assignee(definition_id, personnel_id, message));
            }
        }
    }
}

/// Orchestrates one daily materialization run.
#[derive(Clone)]
pub struct Materializer {
    definitions: Arc<dyn DefinitionRepository>,
    instances: Arc<dyn InstanceRepository>,
    assignees: AssigneeResolver,
    exceptions: ExceptionResolver,
    notifier: DispatchNotifier,
    config: MaterializerConfig,
}

impl Materializer {
    pub fn new(
        definitions: Arc<dyn DefinitionRepository>,
        directory: Arc<dyn PersonnelDirectory>,
        exceptions: Arc<dyn ExceptionStore>,
        instances: Arc<dyn InstanceRepository>,
        sink: Arc<dyn NotificationSink>,
        config: MaterializerConfig,
    ) -> Self {
        Self {
            definitions,
            instances,
            assignees: AssigneeResolver::new(directory),
            exceptions: ExceptionResolver::new(exceptions),
            notifier: DispatchNotifier::new(sink),
            config,
        }
    }

    /// Materialize task instances for one calendar date.
    ///
    /// Per-item failures are collected in the report, never propagated; the
    /// only fatal error is failing to list the active definitions at all.
    pub async fn run(&self, today: NaiveDate) -> DomainResult<RunReport> {
        let definitions = self.definitions.list_active().await?;

        let mut report = RunReport::new(today);
        report.definitions_evaluated = definitions.len();
        info!(
            date = %today,
            definitions = definitions.len(),
            "Starting materialization run"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut definition_ids = Vec::new();
        let mut handles = Vec::new();

        for definition in definitions {
            // Not due today: terminal, no side effects, no log noise.
            if !definition.recurrence.fires_on(today) {
                continue;
            }
            report.definitions_due += 1;

            let worker = self.clone();
            let semaphore = semaphore.clone();
            definition_ids.push(definition.id);
            handles.push(tokio::spawn(async move {
                worker.process_definition(definition, today, semaphore).await
            }));
        }

        let results = futures::future::join_all(handles).await;
        for (definition_id, result) in definition_ids.into_iter().zip(results) {
            match result {
                Ok(summary) => {
                    if summary.skipped_day {
                        report.definitions_skipped += 1;
                    }
                    report.instances_created += summary.created;
                    report.assignees_suppressed += summary.suppressed;
                    report.already_materialized += summary.already_materialized;
                    report.notifications_sent += summary.notifications_sent;
                    report.notifications_failed += summary.notifications_failed;
                    report.errors.extend(summary.errors);
                }
                Err(err) => {
                    warn!(definition_id = %definition_id, error = %err, "Definition worker aborted");
                    report.errors.push(RunItemError::definition(
                        definition_id,
                        format!("Worker aborted: {}", err),
                    ));
                }
            }
        }

        info!(
            date = %today,
            due = report.definitions_due,
            created = report.instances_created,
            suppressed = report.assignees_suppressed,
            already_materialized = report.already_materialized,
            errors = report.errors.len(),
            "Materialization run finished"
        );
        Ok(report)
    }

    /// Process one due definition: skip-date check, assignee expansion, and
    /// the per-assignee fan-out.
    async fn process_definition(
        &self,
        definition: TaskDefinition,
        today: NaiveDate,
        semaphore: Arc<Semaphore>,
    ) -> DefinitionSummary {
        let mut summary = DefinitionSummary::default();

        // The skip date is definition-wide: checked once here, before any
        // assignee expansion, and it overrides every leave date.
        match self.exceptions.day_skipped(definition.id, today).await {
            Ok(true) => {
                debug!(definition_id = %definition.id, date = %today, "Skip date present; no generation");
                summary.skipped_day = true;
                return summary;
            }
            Ok(false) => {}
            Err(err) => {
                summary.errors.push(RunItemError::definition(definition.id, err.to_string()));
                return summary;
            }
        }

        let candidates = match self
            .assignees
            .resolve(&definition.assignment, definition.organization_id)
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => {
                summary.errors.push(RunItemError::definition(definition.id, err.to_string()));
                return summary;
            }
        };

        if candidates.is_empty() {
            debug!(definition_id = %definition.id, "No assignees resolved");
            return summary;
        }

        let definition = Arc::new(definition);
        let mut handles = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                // The semaphore only closes on shutdown; record and stop.
                summary.errors.push(RunItemError::assignee(
                    definition.id,
                    candidate,
                    "Worker pool closed".to_string(),
                ));
                continue;
            };

            let worker = self.clone();
            let definition = Arc::clone(&definition);
            let assignee_timeout = self.config.assignee_timeout;
            let handle = tokio::spawn(async move {
                let _permit = permit;
                let work = worker.process_assignee(&definition, today, candidate);
                match timeout(assignee_timeout, work).await {
                    Ok(outcome) => outcome,
                    Err(_) => AssigneeOutcome::Errored {
                        personnel_id: candidate,
                        message: DomainError::WorkerTimeout { secs: assignee_timeout.as_secs() }
                            .to_string(),
                    },
                }
            });
            handles.push((candidate, handle));
        }

        for (candidate, handle) in handles {
            match handle.await {
                Ok(outcome) => summary.record(definition.id, outcome),
                Err(err) => summary.errors.push(RunItemError::assignee(
                    definition.id,
                    candidate,
                    format!("Worker aborted: {}", err),
                )),
            }
        }

        summary
    }

    /// One assignee's independent read-check-write unit of work.
    async fn process_assignee(
        &self,
        definition: &TaskDefinition,
        today: NaiveDate,
        candidate: Uuid,
    ) -> AssigneeOutcome {
        let outcome = match self
            .exceptions
            .resolve_assignee(definition.id, today, candidate)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                return AssigneeOutcome::Errored {
                    personnel_id: candidate,
                    message: err.to_string(),
                }
            }
        };

        let final_assignee = match outcome {
            ExceptionOutcome::Proceed(id) => id,
            ExceptionOutcome::Redirect(delegate) => {
                debug!(
                    definition_id = %definition.id,
                    from = %candidate,
                    to = %delegate,
                    "Leave date redirects generation to delegate"
                );
                delegate
            }
            ExceptionOutcome::Suppress => {
                debug!(
                    definition_id = %definition.id,
                    personnel_id = %candidate,
                    "Leave date without delegate; assignee suppressed"
                );
                return AssigneeOutcome::Suppressed;
            }
        };

        // Fast path for re-runs; the insert below still guards the race.
        match self.instances.exists(definition.id, final_assignee, today).await {
            Ok(true) => return AssigneeOutcome::AlreadyMaterialized,
            Ok(false) => {}
            Err(err) => {
                return AssigneeOutcome::Errored {
                    personnel_id: final_assignee,
                    message: err.to_string(),
                }
            }
        }

        let instance = TaskInstance::materialize(definition, final_assignee, today);
        match self.instances.insert(&instance).await {
            Ok(InsertOutcome::Created) => {
                let notified = self.notifier.task_assigned(definition, &instance).await;
                AssigneeOutcome::Created { notified }
            }
            // A concurrent worker won the race for the idempotency key.
            Ok(InsertOutcome::Duplicate) => AssigneeOutcome::AlreadyMaterialized,
            Err(err) => AssigneeOutcome::Errored {
                personnel_id: final_assignee,
                message: err.to_string(),
            },
        }
    }
}
