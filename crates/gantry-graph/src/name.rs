use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a node in the job graph.
///
/// List-built definitions name nodes by position; mapping-built definitions
/// name them by the wrapped job's id. Equality and hashing work on the name
/// alone, so job implementations never need to be hashable themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobName {
  /// Position of the job within a list-built definition.
  Index(usize),
  /// The wrapped job's own id.
  Id(String),
}

impl fmt::Display for JobName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      JobName::Index(index) => write!(f, "{index}"),
      JobName::Id(id) => f.write_str(id),
    }
  }
}

impl From<usize> for JobName {
  fn from(index: usize) -> Self {
    JobName::Index(index)
  }
}

impl From<&str> for JobName {
  fn from(id: &str) -> Self {
    JobName::Id(id.to_string())
  }
}

impl From<String> for JobName {
  fn from(id: String) -> Self {
    JobName::Id(id)
  }
}
