use thiserror::Error;

use crate::name::JobName;

/// Errors raised while validating a job graph.
#[derive(Debug, Error)]
pub enum GraphError {
  /// The dependency graph contains a cycle; the named job sits on it.
  #[error("found cyclic dependency on job {name}")]
  CyclicDependency { name: JobName },
}
