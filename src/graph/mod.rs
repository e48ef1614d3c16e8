//! Pheromone-augmented graph model.
//!
//! A complete undirected graph over a fixed set of cities. Distances are
//! Euclidean and computed once at construction; pheromone intensity is the
//! only mutable state and is changed exclusively through `&mut Graph`.
//!
//! Graphs are built from explicit coordinates ([`Graph::new`]), from a
//! seeded random layout ([`Graph::from_random`]), or from TSPLIB text
//! ([`Graph::from_tsplib`]).

mod builder;
mod model;
mod types;

pub use builder::{parse_tsplib, random_cities};
pub use model::{Graph, DEFAULT_INITIAL_PHEROMONE};
pub use types::{City, CityId, Tour};
