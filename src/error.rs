//! Error taxonomy for the ACO engine.
//!
//! Every failure is a local precondition violation reported by the call
//! that detects it. The engine performs no I/O during optimization, so
//! there is no transient or retryable class.

use crate::graph::CityId;
use thiserror::Error;

/// Errors produced by graph construction, the colony, and the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// A city identifier is not part of the graph.
    #[error("unknown city identifier {0}")]
    InvalidCity(CityId),

    /// A pheromone write with a negative or non-finite value.
    #[error("pheromone value must be non-negative and finite, got {0}")]
    InvalidPheromone(f64),

    /// The graph has fewer than two cities, so no meaningful tour exists.
    #[error("graph has {0} cities, at least 2 are required to build a tour")]
    EmptyGraph(usize),

    /// The colony was asked to run with zero agents.
    #[error("number of agents must be positive, got {0}")]
    InvalidAgentCount(usize),

    /// The graph builder could not produce a valid graph.
    #[error("graph construction failed: {0}")]
    GraphConstruction(String),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A result was requested before any episode completed.
    #[error("no episode has completed yet")]
    NoEpisodes,
}
