//! Workflow execution.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::context::{JobContext, Runtime};
use crate::definition::Definition;
use crate::error::WorkflowError;
use crate::job::{JobApi, WorkflowJob};
use crate::log::LogConfig;
use crate::schedule::{DEFAULT_SCHEDULE_INTERVAL, StartTimeFactory, daily_start_time};

/// Formats accepted for runtime strings. The first one also renders
/// `runtime_as_str` when the runtime arrives as a timestamp.
const RUNTIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

/// Top-level workflow: one validated [`Definition`] plus the schedule
/// metadata external deployment tooling reads off it.
#[derive(Debug, Clone)]
pub struct Workflow {
  workflow_id: String,
  definition: Definition,
  schedule_interval: String,
  start_time_factory: StartTimeFactory,
  log_config: Option<LogConfig>,
}

impl Workflow {
  pub fn new(workflow_id: impl Into<String>, definition: Definition) -> Self {
    Self {
      workflow_id: workflow_id.into(),
      definition,
      schedule_interval: DEFAULT_SCHEDULE_INTERVAL.to_string(),
      start_time_factory: daily_start_time,
      log_config: None,
    }
  }

  pub fn with_schedule_interval(mut self, schedule_interval: impl Into<String>) -> Self {
    self.schedule_interval = schedule_interval.into();
    self
  }

  pub fn with_start_time_factory(mut self, start_time_factory: StartTimeFactory) -> Self {
    self.start_time_factory = start_time_factory;
    self
  }

  pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
    self.log_config = Some(log_config);
    self
  }

  pub fn workflow_id(&self) -> &str {
    &self.workflow_id
  }

  pub fn definition(&self) -> &Definition {
    &self.definition
  }

  pub fn schedule_interval(&self) -> &str {
    &self.schedule_interval
  }

  pub fn start_time_factory(&self) -> StartTimeFactory {
    self.start_time_factory
  }

  pub fn log_config(&self) -> Option<&LogConfig> {
    self.log_config.as_ref()
  }

  /// Execute every job in sequential order.
  ///
  /// All jobs of one run share a single [`JobContext`]. The first failure
  /// stops the loop and propagates; later jobs do not run.
  pub fn run(&self, runtime: impl Into<Runtime>) -> Result<(), WorkflowError> {
    let context = self.make_job_context(runtime.into())?;
    info!(
      workflow_id = %self.workflow_id,
      execution_id = %context.execution_id,
      runtime = %context.runtime_as_str,
      "workflow_started"
    );

    for job in self.build_sequential_order() {
      if let Err(e) = self.execute_job(job, &context) {
        error!(
          workflow_id = %self.workflow_id,
          execution_id = %context.execution_id,
          error = %e,
          "workflow_failed"
        );
        return Err(e);
      }
    }

    info!(
      workflow_id = %self.workflow_id,
      execution_id = %context.execution_id,
      "workflow_completed"
    );
    Ok(())
  }

  /// Execute exactly one job, matched by the wrapped job's id, with a
  /// freshly built context.
  pub fn run_job(&self, job_id: &str, runtime: impl Into<Runtime>) -> Result<(), WorkflowError> {
    let context = self.make_job_context(runtime.into())?;
    let job = self.find_job(job_id)?;
    self.execute_job(job, &context)
  }

  /// First node in sequential order whose wrapped job id matches.
  pub fn find_job(&self, job_id: &str) -> Result<&WorkflowJob, WorkflowError> {
    self
      .build_sequential_order()
      .into_iter()
      .find(|job| job.id() == job_id)
      .ok_or_else(|| WorkflowError::JobNotFound {
        job_id: job_id.to_string(),
      })
  }

  /// The resolved sequential run order.
  pub fn build_sequential_order(&self) -> Vec<&WorkflowJob> {
    self.definition.sequential_order()
  }

  /// Hand every node with its parents to `consumer`, parents first.
  ///
  /// External DAG-generation tooling uses this to emit one task descriptor
  /// per node with correct upstream links.
  pub fn call_on_graph_nodes<F>(&self, consumer: F)
  where
    F: FnMut(&WorkflowJob, &[&WorkflowJob]),
  {
    self.definition.call_on_graph_nodes(consumer);
  }

  fn make_job_context(&self, runtime: Runtime) -> Result<JobContext<'_>, WorkflowError> {
    let (runtime, runtime_as_str) = match runtime {
      Runtime::Text(value) => {
        let parsed = parse_runtime_str(&value)?;
        (parsed, value)
      }
      Runtime::At(timestamp) => (timestamp, format_runtime(timestamp)),
      Runtime::Now => {
        let now = Local::now().naive_local();
        (now, format_runtime(now))
      }
    };

    Ok(JobContext {
      execution_id: Uuid::new_v4(),
      runtime,
      runtime_as_str,
      workflow: self,
    })
  }

  fn execute_job(&self, job: &WorkflowJob, context: &JobContext<'_>) -> Result<(), WorkflowError> {
    info!(
      workflow_id = %self.workflow_id,
      execution_id = %context.execution_id,
      job_id = %job.id(),
      "job_started"
    );

    let result = match job.api() {
      JobApi::Modern(inner) => inner
        .execute(context)
        .map_err(|source| WorkflowError::JobFailed {
          job_id: inner.id().to_string(),
          source,
        }),
      JobApi::Legacy(inner) => {
        warn!(
          job_id = %inner.id(),
          "legacy run(runtime) API in use, migrate to execute(context)"
        );
        Err(WorkflowError::LegacyJobApi {
          job_id: inner.id().to_string(),
        })
      }
    };

    match &result {
      Ok(()) => info!(
        workflow_id = %self.workflow_id,
        execution_id = %context.execution_id,
        job_id = %job.id(),
        "job_completed"
      ),
      Err(e) => error!(
        workflow_id = %self.workflow_id,
        execution_id = %context.execution_id,
        job_id = %job.id(),
        error = %e,
        "job_failed"
      ),
    }

    result
  }
}

fn parse_runtime_str(value: &str) -> Result<NaiveDateTime, WorkflowError> {
  if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, RUNTIME_FORMATS[0]) {
    return Ok(timestamp);
  }
  if let Ok(date) = NaiveDate::parse_from_str(value, RUNTIME_FORMATS[1]) {
    return Ok(date.and_time(NaiveTime::MIN));
  }
  Err(WorkflowError::UnparseableRuntime {
    value: value.to_string(),
  })
}

fn format_runtime(timestamp: NaiveDateTime) -> String {
  timestamp.format(RUNTIME_FORMATS[0]).to_string()
}
