//! Ant Colony Optimization (Ant System) for the symmetric TSP.
//!
//! A colony of ants builds tours on a shared pheromone graph. After each
//! episode the trails evaporate and the chosen tours deposit pheromone in
//! proportion to their quality, biasing later ants toward short edges.
//!
//! Construction only reads the graph (`&Graph`) and the update alone
//! writes it (`&mut Graph`), so an ant never sees a half-updated trail.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), "Ant Colony Optimization", Chapter 3

mod ant;
mod colony;
mod config;
mod pheromone;
mod runner;
mod selection;

pub use ant::Ant;
pub use colony::{Colony, ColonyIteration};
pub use config::{AcoConfig, DepositPolicy, StartCityPolicy};
pub use pheromone::PheromoneUpdate;
pub use runner::{AcoEngine, AcoResult, AcoRunner, EngineState, EpisodeReport, Termination};
pub use selection::select_weighted;
