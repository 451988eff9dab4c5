//! Gantry Workflow
//!
//! Workflow definition and execution runtime.
//!
//! # Architecture
//!
//! ```text
//! Workflow
//! ├── new(workflow_id, definition) - schedule metadata around one Definition
//! ├── run(runtime) - one JobContext, every job in sequential order
//! ├── run_job(job_id, runtime) - one job, matched by id
//! └── call_on_graph_nodes(consumer) - node + parents, parents first
//!
//! Definition
//! ├── from_sequence / from_chain - linear chain, one job after another
//! ├── from_graph - explicit source -> targets adjacency
//! └── validates the graph at construction; a cycle is fatal
//!
//! WorkflowJob
//! └── JobApi::{Modern, Legacy} resolved once at wrap time
//! ```
//!
//! Execution is synchronous and sequential. Job failures propagate to the
//! caller with their source error intact; `retries`/`retry_delay` are
//! advisory metadata for an external scheduler, never acted on here.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use gantry_workflow::{Definition, Runtime, Workflow};
//!
//! let definition = Definition::from_sequence(vec![extract, transform, load])?;
//! let workflow = Workflow::new("nightly_etl", definition)
//!   .with_schedule_interval("@daily");
//!
//! workflow.run(Runtime::Now)?;
//! workflow.run_job("transform", "2020-06-27 15:00:00")?;
//! ```

mod context;
mod definition;
mod error;
mod job;
mod log;
mod schedule;
mod workflow;

pub use context::{JobContext, Runtime};
pub use definition::Definition;
pub use error::{BoxError, WorkflowError};
pub use gantry_graph::{GraphError, JobName};
pub use job::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, Job, JobApi, LegacyJob, WorkflowJob};
pub use log::LogConfig;
pub use schedule::{
  DEFAULT_SCHEDULE_INTERVAL, StartTimeFactory, daily_start_time, hourly_start_time,
};
pub use workflow::Workflow;
