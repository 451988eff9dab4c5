use std::collections::HashMap;
use std::sync::Arc;

use gantry_graph::{GraphError, JobGraph, JobGraphValidator, JobName, JobOrderResolver};

use crate::job::{Job, WorkflowJob};

/// A validated job graph plus the resolver that orders it.
///
/// Graph structure lives at the name level in `gantry-graph`; the
/// definition keeps the `name -> WorkflowJob` table beside it. Cycles are
/// rejected at construction, so an existing definition is always runnable.
#[derive(Debug, Clone)]
pub struct Definition {
  graph: JobGraph,
  jobs: HashMap<JobName, WorkflowJob>,
  resolver: JobOrderResolver,
}

impl Definition {
  /// Chain a list of jobs, naming each node by its position.
  pub fn from_sequence(jobs: Vec<Arc<dyn Job>>) -> Result<Self, GraphError> {
    let wrapped = jobs
      .into_iter()
      .enumerate()
      .map(|(index, job)| WorkflowJob::new(index, job))
      .collect();
    Self::from_chain(wrapped)
  }

  /// Chain already-named jobs: each element becomes the single target of
  /// the one before it; a lone element maps to no targets at all.
  pub fn from_chain(jobs: Vec<WorkflowJob>) -> Result<Self, GraphError> {
    let mut entries = Vec::with_capacity(jobs.len());
    if let [only] = jobs.as_slice() {
      entries.push((only.clone(), Vec::new()));
    } else {
      for pair in jobs.windows(2) {
        entries.push((pair[0].clone(), vec![pair[1].clone()]));
      }
    }
    Self::from_graph(entries)
  }

  /// Build from an explicit `source -> targets` adjacency.
  ///
  /// Raw jobs convert into nodes via `WorkflowJob::from`, which names them
  /// by their id. Repeated sources behave like mapping insertion: the
  /// first occurrence fixes the position, the last target list wins.
  pub fn from_graph(entries: Vec<(WorkflowJob, Vec<WorkflowJob>)>) -> Result<Self, GraphError> {
    let mut jobs = HashMap::new();
    let mut graph_entries = Vec::with_capacity(entries.len());

    for (source, targets) in entries {
      let target_names: Vec<JobName> = targets.iter().map(|t| t.name().clone()).collect();
      graph_entries.push((source.name().clone(), target_names));

      jobs.entry(source.name().clone()).or_insert(source);
      for target in targets {
        jobs.entry(target.name().clone()).or_insert(target);
      }
    }

    let graph = JobGraph::new(graph_entries);
    JobGraphValidator::new(&graph).validate()?;
    let resolver = JobOrderResolver::new(&graph);

    Ok(Self {
      graph,
      jobs,
      resolver,
    })
  }

  /// All jobs in one order consistent with the dependency graph.
  pub fn sequential_order(&self) -> Vec<&WorkflowJob> {
    self
      .resolver
      .sequential_order()
      .iter()
      .filter_map(|name| self.jobs.get(name))
      .collect()
  }

  /// Invoke `consumer` on every job with its parent jobs, parents first.
  pub fn call_on_graph_nodes<F>(&self, mut consumer: F)
  where
    F: FnMut(&WorkflowJob, &[&WorkflowJob]),
  {
    self.resolver.call_on_graph_nodes(|name, parent_names| {
      let Some(job) = self.jobs.get(name) else {
        return;
      };
      let parents: Vec<&WorkflowJob> = parent_names
        .iter()
        .filter_map(|parent| self.jobs.get(parent))
        .collect();
      consumer(job, &parents);
    });
  }

  /// Look up a node by its graph name.
  pub fn job(&self, name: &JobName) -> Option<&WorkflowJob> {
    self.jobs.get(name)
  }

  pub fn graph(&self) -> &JobGraph {
    &self.graph
  }
}
