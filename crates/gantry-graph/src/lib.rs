//! Gantry Graph
//!
//! Name-level dependency graph for gantry workflows. This crate knows
//! nothing about jobs or execution; it owns the graph structure and the
//! two algorithms everything else builds on:
//!
//! - cycle rejection ([`JobGraphValidator`])
//! - parents-first ordering ([`JobOrderResolver`])
//!
//! An edge `source -> target` means the target runs after the source.
//! Determinism comes from insertion order alone: declared sources keep
//! their input order, targets keep edge-discovery order, and no other
//! tie-break is applied.

mod error;
mod graph;
mod name;
mod order;

pub use error::GraphError;
pub use graph::{JobGraph, JobGraphValidator};
pub use name::JobName;
pub use order::JobOrderResolver;
