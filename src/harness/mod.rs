//! Ordered step runner
//!
//! A run is setup (login, see [`Session::open`]), then a list of [`Step`]s
//! executed one at a time in ascending `order`, then teardown
//! ([`Session::close`]). Steps share a [`FixtureState`] that is passed to each
//! one explicitly.
//!
//! Failure handling:
//! - an assertion or decode failure fails that step and the run continues
//! - a transport failure fails that step, skips the rest, and still tears down
//! - nothing is retried, and fixture state is never repaired

pub mod assert;
pub mod report;

use crate::client::{FoodyClient, Session};
use crate::config::HarnessConfig;
use crate::error::{HarnessError, StepResult};
use crate::metrics;
use futures::future::BoxFuture;
use std::time::Instant;
use tracing::Instrument;

pub use report::{RunReport, StepOutcome, StepReport};

/// Data produced by one step and consumed by later ones
#[derive(Debug, Clone, Default)]
pub struct FixtureState {
    /// Id captured by the create step
    pub created_food_id: Option<String>,
    /// Name applied by the edit step
    pub edited_name: Option<String>,
}

impl FixtureState {
    /// The created id, or `""` when create did not produce one.
    ///
    /// An absent id is not an error here: the dependent request goes out with
    /// an empty id and that step's own assertions report the failure.
    pub fn food_id(&self) -> &str {
        match self.created_food_id.as_deref() {
            Some(id) => id,
            None => {
                tracing::warn!("No created food id in fixture state; using empty id");
                ""
            }
        }
    }
}

/// Step body: borrows the shared client and the fixture state for one await
pub type StepFn = for<'a> fn(&'a FoodyClient, &'a mut FixtureState) -> BoxFuture<'a, StepResult>;

/// One ordered test step
#[derive(Clone)]
pub struct Step {
    pub order: u32,
    pub name: &'static str,
    run: StepFn,
}

impl Step {
    pub fn new(order: u32, name: &'static str, run: StepFn) -> Self {
        Self { order, name, run }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("order", &self.order)
            .field("name", &self.name)
            .finish()
    }
}

/// Executes steps strictly in ascending order
#[derive(Debug)]
pub struct Runner {
    steps: Vec<Step>,
}

impl Runner {
    /// Sort steps by order; two steps with the same order are rejected
    pub fn new(mut steps: Vec<Step>) -> Result<Self, HarnessError> {
        steps.sort_by_key(|s| s.order);
        for pair in steps.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(HarnessError::DuplicateStepOrder {
                    order: pair[0].order,
                    first: pair[0].name.to_string(),
                    second: pair[1].name.to_string(),
                });
            }
        }
        Ok(Self { steps })
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step against `client`, threading `fixture` through them
    pub async fn run(&self, client: &FoodyClient, fixture: &mut FixtureState) -> RunReport {
        let mut report = RunReport::default();

        for step in &self.steps {
            if let Some(reason) = &report.aborted {
                let outcome = StepOutcome::Skipped(format!("run aborted: {}", reason));
                metrics::record_step(step.name, outcome.label());
                report.steps.push(StepReport {
                    order: step.order,
                    name: step.name,
                    outcome,
                    elapsed: Default::default(),
                });
                continue;
            }

            let span = tracing::info_span!(
                "step",
                step.order = step.order,
                step.name = step.name
            );
            let started = Instant::now();
            let result = (step.run)(client, &mut *fixture)
                .instrument(span.clone())
                .await;
            let elapsed = started.elapsed();

            let outcome = match result {
                Ok(()) => {
                    span.in_scope(|| {
                        tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "step passed")
                    });
                    StepOutcome::Passed
                }
                Err(err) => {
                    span.in_scope(|| tracing::error!(error = %err, "step failed"));
                    if err.is_fatal() {
                        report.aborted = Some(err.to_string());
                    }
                    StepOutcome::Failed(err.to_string())
                }
            };

            metrics::record_step(step.name, outcome.label());
            report.steps.push(StepReport {
                order: step.order,
                name: step.name,
                outcome,
                elapsed,
            });
        }

        report
    }
}

/// Setup, ordered steps, teardown
pub struct Harness {
    config: HarnessConfig,
    runner: Runner,
}

impl Harness {
    pub fn new(config: HarnessConfig, steps: Vec<Step>) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self {
            config,
            runner: Runner::new(steps)?,
        })
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Log in once, run all steps, then release the session.
    ///
    /// Returns `Err` only when setup fails; step failures live in the report.
    pub async fn run(&self) -> Result<RunReport, HarnessError> {
        let session = Session::open(&self.config).await?;

        let mut fixture = FixtureState::default();
        let report = self.runner.run(session.client(), &mut fixture).await;

        session.close();

        tracing::info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Run finished"
        );
        Ok(report)
    }
}
