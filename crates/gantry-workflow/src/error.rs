//! Workflow errors.

use gantry_graph::GraphError;
use thiserror::Error;

/// Boxed error type produced by job implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or running a workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
  /// No job in the definition carries the requested id.
  #[error("job '{job_id}' not found in workflow")]
  JobNotFound { job_id: String },

  /// The runtime string matched none of the recognized formats.
  #[error("unable to parse runtime {value:?}")]
  UnparseableRuntime { value: String },

  /// The job only exposes the legacy `run(runtime)` API.
  #[error("job '{job_id}' uses the legacy run(runtime) API, migrate it to execute(context)")]
  LegacyJobApi { job_id: String },

  /// A job failed during execution.
  #[error("job '{job_id}' failed")]
  JobFailed {
    job_id: String,
    #[source]
    source: BoxError,
  },

  /// The definition's dependency graph is invalid.
  #[error(transparent)]
  Graph(#[from] GraphError),
}
