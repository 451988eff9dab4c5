//! Logging configuration carried on a workflow.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::BoxError;

/// Read-only logging attribute consumed when generating deployment
/// artifacts; `init` applies it to the current process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
  /// Filter directive for the subscriber, e.g. `"info"`.
  pub log_level: String,
  /// Logical log stream name, when the deployment target wants one.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub log_name: Option<String>,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      log_level: "info".to_string(),
      log_name: None,
    }
  }
}

impl LogConfig {
  /// Install a global fmt subscriber honoring `RUST_LOG`, falling back to
  /// the configured level.
  ///
  /// # Errors
  ///
  /// Fails if a global subscriber is already set.
  pub fn init(&self) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new(self.log_level.clone()));

    tracing_subscriber::registry()
      .with(filter)
      .with(tracing_subscriber::fmt::layer().with_target(true))
      .try_init()?;
    Ok(())
  }
}
