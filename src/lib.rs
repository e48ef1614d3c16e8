//! Ant Colony Optimization engine for the symmetric Traveling Salesman
//! Problem.
//!
//! - **Graph**: complete Euclidean graph with per-edge pheromone trails,
//!   built from coordinates, a seeded random layout, or TSPLIB text.
//! - **ACO**: ant tour construction, evaporation/deposit update, and an
//!   episode loop that tracks the best tour and its convergence history.
//!
//! # Quick start
//!
//! ```
//! use u_aco::aco::{AcoConfig, AcoRunner};
//! use u_aco::graph::Graph;
//!
//! let graph = Graph::from_random(20, 1).unwrap();
//! let config = AcoConfig::default().with_num_episodes(30).with_seed(42);
//! let result = AcoRunner::run(graph, &config).unwrap();
//!
//! assert_eq!(result.best.len(), 20);
//! assert_eq!(result.history.len(), 30);
//! ```
//!
//! # Architecture
//!
//! Pheromone is the only mutable state. Ants borrow the graph immutably
//! while building tours; the update rule takes it mutably between
//! episodes. Every random draw comes from an explicitly seeded generator,
//! so a fixed seed reproduces a run exactly, with or without the
//! `parallel` feature.

pub mod aco;
pub mod error;
pub mod graph;

pub use error::AcoError;
