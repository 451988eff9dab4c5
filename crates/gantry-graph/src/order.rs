use std::collections::{HashMap, HashSet};

use crate::graph::JobGraph;
use crate::name::JobName;

/// Parent relation derived from a [`JobGraph`]: a node's parents are the
/// sources that list it among their targets.
///
/// Entries appear in discovery order (keys in insertion order, edges
/// followed depth-first, each node once), which keeps resolution
/// deterministic. Parents keep edge-discovery order.
#[derive(Debug, Clone, Default)]
struct ParentalMap {
  order: Vec<JobName>,
  parents: HashMap<JobName, Vec<JobName>>,
}

impl ParentalMap {
  fn ensure_entry(&mut self, name: &JobName) {
    if !self.parents.contains_key(name) {
      self.order.push(name.clone());
      self.parents.insert(name.clone(), Vec::new());
    }
  }

  fn push_parent(&mut self, name: &JobName, parent: &JobName) {
    if let Some(parents) = self.parents.get_mut(name) {
      parents.push(parent.clone());
    }
  }

  fn parents_of(&self, name: &JobName) -> &[JobName] {
    self
      .parents
      .get(name)
      .map(|parents| parents.as_slice())
      .unwrap_or(&[])
  }
}

/// Resolves a validated graph into a parents-first traversal and one
/// deterministic sequential order.
///
/// The parental map is built once; every traversal allocates its own
/// visited set, so a shared resolver can be invoked repeatedly.
#[derive(Debug, Clone)]
pub struct JobOrderResolver {
  parental_map: ParentalMap,
}

impl JobOrderResolver {
  pub fn new(graph: &JobGraph) -> Self {
    let mut parental_map = ParentalMap::default();
    let mut visited = HashSet::new();
    for name in graph.keys() {
      Self::fill_parental_map(graph, name, &mut parental_map, &mut visited);
    }
    Self { parental_map }
  }

  fn fill_parental_map(
    graph: &JobGraph,
    name: &JobName,
    parental_map: &mut ParentalMap,
    visited: &mut HashSet<JobName>,
  ) {
    // Sinks pick up their entry from the edge that discovered them.
    let Some(targets) = graph.targets(name) else {
      return;
    };
    if visited.contains(name) {
      return;
    }
    visited.insert(name.clone());
    parental_map.ensure_entry(name);

    for target in targets {
      parental_map.ensure_entry(target);
      parental_map.push_parent(target, name);
      Self::fill_parental_map(graph, target, parental_map, visited);
    }
  }

  /// Invoke `consumer` on every node together with its parents, recursing
  /// into all parents first: a node is consumed only after every one of
  /// its parents has been. Each node is consumed exactly once per call.
  pub fn call_on_graph_nodes<F>(&self, mut consumer: F)
  where
    F: FnMut(&JobName, &[JobName]),
  {
    let mut visited = HashSet::new();
    for name in &self.parental_map.order {
      self.call_on_graph_node(name, &mut visited, &mut consumer);
    }
  }

  fn call_on_graph_node<F>(&self, name: &JobName, visited: &mut HashSet<JobName>, consumer: &mut F)
  where
    F: FnMut(&JobName, &[JobName]),
  {
    if visited.contains(name) {
      return;
    }
    visited.insert(name.clone());

    for parent in self.parental_map.parents_of(name) {
      self.call_on_graph_node(parent, visited, consumer);
    }
    consumer(name, self.parental_map.parents_of(name));
  }

  /// One total order consistent with the parents-first guarantee.
  pub fn sequential_order(&self) -> Vec<JobName> {
    let mut ordered = Vec::new();
    self.call_on_graph_nodes(|name, _parents| ordered.push(name.clone()));
    ordered
  }
}
