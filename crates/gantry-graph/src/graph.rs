use std::collections::{HashMap, HashSet};

use crate::error::GraphError;
use crate::name::JobName;

/// Dependency graph over job names.
///
/// An edge `source -> target` means the target runs after the source.
/// Declared sources ("keys") keep their insertion order; nodes appearing
/// only as targets are sinks and carry no adjacency entry of their own.
/// Built once, never mutated after validation.
#[derive(Debug, Clone, Default)]
pub struct JobGraph {
  /// Declared source nodes, in insertion order.
  keys: Vec<JobName>,
  /// Adjacency: source -> its ordered target nodes.
  targets: HashMap<JobName, Vec<JobName>>,
}

impl JobGraph {
  /// Build a graph from `(source, targets)` entries.
  ///
  /// Repeated sources behave like mapping insertion: the first occurrence
  /// fixes the position, the last target list wins.
  pub fn new(entries: Vec<(JobName, Vec<JobName>)>) -> Self {
    let mut keys = Vec::with_capacity(entries.len());
    let mut targets: HashMap<JobName, Vec<JobName>> = HashMap::with_capacity(entries.len());

    for (source, target_names) in entries {
      if !targets.contains_key(&source) {
        keys.push(source.clone());
      }
      targets.insert(source, target_names);
    }

    Self { keys, targets }
  }

  /// Declared source nodes in insertion order.
  pub fn keys(&self) -> impl Iterator<Item = &JobName> {
    self.keys.iter()
  }

  /// Target nodes of `name`, or `None` when the node is a sink.
  pub fn targets(&self, name: &JobName) -> Option<&[JobName]> {
    self.targets.get(name).map(|targets| targets.as_slice())
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }
}

/// Rejects graphs with cyclic dependencies.
pub struct JobGraphValidator<'g> {
  graph: &'g JobGraph,
}

impl<'g> JobGraphValidator<'g> {
  pub fn new(graph: &'g JobGraph) -> Self {
    Self { graph }
  }

  /// Depth-first walk over every declared node.
  ///
  /// `visited` spans independent walks; `stack` holds the active path, and
  /// meeting a node already on it is a cycle. Both sets live only for this
  /// call. O(V+E).
  pub fn validate(&self) -> Result<(), GraphError> {
    let mut visited = HashSet::new();
    let mut stack = HashSet::new();
    for name in self.graph.keys() {
      self.visit(name, &mut visited, &mut stack)?;
    }
    Ok(())
  }

  fn visit(
    &self,
    name: &JobName,
    visited: &mut HashSet<JobName>,
    stack: &mut HashSet<JobName>,
  ) -> Result<(), GraphError> {
    if stack.contains(name) {
      return Err(GraphError::CyclicDependency { name: name.clone() });
    }
    if visited.contains(name) {
      return Ok(());
    }
    visited.insert(name.clone());

    // Sinks terminate recursion immediately.
    let Some(targets) = self.graph.targets(name) else {
      return Ok(());
    };

    stack.insert(name.clone());
    for target in targets {
      self.visit(target, visited, stack)?;
    }
    stack.remove(name);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn name(id: &str) -> JobName {
    JobName::from(id)
  }

  fn graph(entries: &[(&str, &[&str])]) -> JobGraph {
    JobGraph::new(
      entries
        .iter()
        .map(|(source, targets)| (name(source), targets.iter().map(|t| name(t)).collect()))
        .collect(),
    )
  }

  #[test]
  fn accepts_a_linear_chain() {
    let graph = graph(&[("a", &["b"]), ("b", &["c"])]);
    assert!(JobGraphValidator::new(&graph).validate().is_ok());
  }

  #[test]
  fn accepts_a_diamond() {
    let graph = graph(&[("a", &["b", "c"]), ("b", &["d"]), ("c", &["d"])]);
    assert!(JobGraphValidator::new(&graph).validate().is_ok());
  }

  #[test]
  fn accepts_an_empty_graph() {
    let graph = JobGraph::new(Vec::new());
    assert!(graph.is_empty());
    assert!(JobGraphValidator::new(&graph).validate().is_ok());
  }

  #[test]
  fn rejects_a_two_node_cycle_naming_the_offender() {
    let graph = graph(&[("a", &["b"]), ("b", &["a"])]);
    let err = JobGraphValidator::new(&graph).validate().unwrap_err();
    let GraphError::CyclicDependency { name } = err;
    assert_eq!(name.to_string(), "a");
  }

  #[test]
  fn rejects_a_self_loop() {
    let graph = graph(&[("a", &["a"])]);
    assert!(JobGraphValidator::new(&graph).validate().is_err());
  }

  #[test]
  fn rejects_a_cycle_behind_a_valid_prefix() {
    let graph = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);
    let err = JobGraphValidator::new(&graph).validate().unwrap_err();
    let GraphError::CyclicDependency { name } = err;
    assert_eq!(name.to_string(), "b");
  }

  #[test]
  fn last_target_list_wins_for_repeated_sources() {
    let graph = graph(&[("a", &["b"]), ("a", &["c"])]);
    assert_eq!(graph.targets(&name("a")), Some(&[name("c")][..]));
    assert_eq!(graph.keys().count(), 1);
  }

  #[test]
  fn sinks_are_not_keys() {
    let graph = graph(&[("a", &["b"])]);
    assert!(graph.targets(&name("b")).is_none());
  }
}
