//! Run report

use std::fmt;
use std::time::Duration;

/// Result of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl StepOutcome {
    /// Label used for metrics and summaries
    pub fn label(&self) -> &'static str {
        match self {
            StepOutcome::Passed => "passed",
            StepOutcome::Failed(_) => "failed",
            StepOutcome::Skipped(_) => "skipped",
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, StepOutcome::Passed)
    }
}

/// Outcome of a single step, in execution order
#[derive(Debug, Clone)]
pub struct StepReport {
    pub order: u32,
    pub name: &'static str,
    pub outcome: StepOutcome,
    pub elapsed: Duration,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    /// Set when a transport failure stopped the run early
    pub aborted: Option<String>,
}

impl RunReport {
    /// True when every step passed and the run was not aborted
    pub fn success(&self) -> bool {
        self.aborted.is_none() && self.steps.iter().all(|s| s.outcome.is_passed())
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped(_)))
    }

    /// Look up a step's report by name
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// One-line summary, e.g. `7 passed, 0 failed, 0 skipped`
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.outcome)).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(
                f,
                "[{:>2}] {:<28} {:<7} {:>6}ms",
                step.order,
                step.name,
                step.outcome.label().to_uppercase(),
                step.elapsed.as_millis()
            )?;
            match &step.outcome {
                StepOutcome::Passed => writeln!(f)?,
                StepOutcome::Failed(reason) | StepOutcome::Skipped(reason) => {
                    writeln!(f, "  {}", reason)?
                }
            }
        }
        if let Some(reason) = &self.aborted {
            writeln!(f, "Run aborted: {}", reason)?;
        }
        write!(f, "{}", self.summary())
    }
}
