use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::workflow::Workflow;

/// When a workflow run is anchored in time.
///
/// Strings are parsed with `"%Y-%m-%d %H:%M:%S"` first, then `"%Y-%m-%d"`;
/// the first successful parse wins.
#[derive(Debug, Clone, Default)]
pub enum Runtime {
  /// The current local time.
  #[default]
  Now,
  /// A string to parse at run time.
  Text(String),
  /// An explicit timestamp.
  At(NaiveDateTime),
}

impl From<&str> for Runtime {
  fn from(value: &str) -> Self {
    Runtime::Text(value.to_string())
  }
}

impl From<String> for Runtime {
  fn from(value: String) -> Self {
    Runtime::Text(value)
  }
}

impl From<NaiveDateTime> for Runtime {
  fn from(value: NaiveDateTime) -> Self {
    Runtime::At(value)
  }
}

/// Immutable execution context handed to every job of one run.
///
/// Built fresh per `run`/`run_job` call; all jobs within a single `run`
/// share the same instance.
#[derive(Debug, Clone)]
pub struct JobContext<'w> {
  /// Unique id of this run, for tracing and log correlation.
  pub execution_id: Uuid,
  /// The run's logical timestamp.
  pub runtime: NaiveDateTime,
  /// The runtime as received, or rendered with `"%Y-%m-%d %H:%M:%S"`.
  pub runtime_as_str: String,
  /// The workflow this run belongs to.
  pub workflow: &'w Workflow,
}
