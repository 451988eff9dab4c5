use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use gantry_graph::JobName;

use crate::context::JobContext;
use crate::error::BoxError;

/// Attempts an external scheduler should make per job, unless overridden.
pub const DEFAULT_RETRIES: u32 = 3;

/// Pause between attempts, unless overridden.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// A unit of work with a stable identity.
///
/// `retries` and `retry_delay` are advisory metadata for the external
/// scheduler; the engine itself never retries.
pub trait Job: Send + Sync {
  /// Stable identifier, used as the graph-name fallback and as the lookup
  /// key for single-job runs.
  fn id(&self) -> &str;

  fn retries(&self) -> u32 {
    DEFAULT_RETRIES
  }

  fn retry_delay(&self) -> Duration {
    DEFAULT_RETRY_DELAY
  }

  /// Run the job. Failures propagate to the caller with the source intact.
  fn execute(&self, context: &JobContext<'_>) -> Result<(), BoxError>;
}

/// The drifted job API that predates [`JobContext`].
///
/// Jobs still on this surface participate in graphs and DAG generation,
/// but executing one is a hard error rather than a silent fallback; see
/// [`WorkflowError::LegacyJobApi`](crate::WorkflowError::LegacyJobApi).
pub trait LegacyJob: Send + Sync {
  fn id(&self) -> &str;

  /// Old entrypoint taking the rendered runtime string.
  fn run(&self, runtime: &str) -> Result<(), BoxError>;
}

/// Which API surface a wrapped job exposes, resolved once at wrap time.
#[derive(Clone)]
pub enum JobApi {
  Modern(Arc<dyn Job>),
  Legacy(Arc<dyn LegacyJob>),
}

/// A named graph-node wrapper around a job.
///
/// The `name` — not the wrapped job's `id` — is the node identity; equality
/// and hashing are defined purely on it. Immutable once constructed.
#[derive(Clone)]
pub struct WorkflowJob {
  name: JobName,
  api: JobApi,
}

impl WorkflowJob {
  pub fn new(name: impl Into<JobName>, job: Arc<dyn Job>) -> Self {
    Self {
      name: name.into(),
      api: JobApi::Modern(job),
    }
  }

  /// Wrap a job still on the legacy `run(runtime)` surface.
  pub fn legacy(name: impl Into<JobName>, job: Arc<dyn LegacyJob>) -> Self {
    Self {
      name: name.into(),
      api: JobApi::Legacy(job),
    }
  }

  pub fn name(&self) -> &JobName {
    &self.name
  }

  /// The wrapped job's own id.
  pub fn id(&self) -> &str {
    match &self.api {
      JobApi::Modern(job) => job.id(),
      JobApi::Legacy(job) => job.id(),
    }
  }

  pub fn api(&self) -> &JobApi {
    &self.api
  }

  pub fn retries(&self) -> u32 {
    match &self.api {
      JobApi::Modern(job) => job.retries(),
      JobApi::Legacy(_) => DEFAULT_RETRIES,
    }
  }

  pub fn retry_delay(&self) -> Duration {
    match &self.api {
      JobApi::Modern(job) => job.retry_delay(),
      JobApi::Legacy(_) => DEFAULT_RETRY_DELAY,
    }
  }
}

impl From<Arc<dyn Job>> for WorkflowJob {
  /// Wraps the job under its own id.
  fn from(job: Arc<dyn Job>) -> Self {
    let name = JobName::from(job.id().to_string());
    Self::new(name, job)
  }
}

impl PartialEq for WorkflowJob {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Eq for WorkflowJob {}

impl Hash for WorkflowJob {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state);
  }
}

impl fmt::Debug for WorkflowJob {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WorkflowJob")
      .field("name", &self.name)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use std::hash::{DefaultHasher, Hash, Hasher};

  use super::*;

  struct NamedJob(&'static str);

  impl Job for NamedJob {
    fn id(&self) -> &str {
      self.0
    }

    fn execute(&self, _context: &JobContext<'_>) -> Result<(), BoxError> {
      Ok(())
    }
  }

  fn hash_of(job: &WorkflowJob) -> u64 {
    let mut hasher = DefaultHasher::new();
    job.hash(&mut hasher);
    hasher.finish()
  }

  #[test]
  fn equality_and_hash_use_the_name_only() {
    let first = WorkflowJob::new("node", Arc::new(NamedJob("first")));
    let second = WorkflowJob::new("node", Arc::new(NamedJob("second")));

    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
    assert_ne!(first.id(), second.id());
  }

  #[test]
  fn jobs_with_different_names_differ() {
    let job: Arc<dyn Job> = Arc::new(NamedJob("same"));
    let first = WorkflowJob::new("one", Arc::clone(&job));
    let second = WorkflowJob::new("two", job);
    assert_ne!(first, second);
  }

  #[test]
  fn from_job_names_the_node_by_id() {
    let wrapped = WorkflowJob::from(Arc::new(NamedJob("extract")) as Arc<dyn Job>);
    assert_eq!(wrapped.name().to_string(), "extract");
  }

  #[test]
  fn retry_metadata_defaults_apply() {
    let wrapped = WorkflowJob::new("node", Arc::new(NamedJob("job")));
    assert_eq!(wrapped.retries(), DEFAULT_RETRIES);
    assert_eq!(wrapped.retry_delay(), DEFAULT_RETRY_DELAY);
  }

  #[test]
  fn debug_renders_the_name() {
    let wrapped = WorkflowJob::new("node", Arc::new(NamedJob("job")));
    assert!(format!("{wrapped:?}").contains("node"));
  }
}
