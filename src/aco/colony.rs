//! Colony controller: one round of tour construction by all ants.

use super::ant::Ant;
use super::config::AcoConfig;
use crate::error::AcoError;
use crate::graph::{Graph, Tour};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tours built during one episode.
#[derive(Debug, Clone)]
pub struct ColonyIteration {
    tours: Vec<Tour>,
    best_index: usize,
}

impl ColonyIteration {
    /// All tours, in agent order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Shortest tour of the episode. Ties go to the lowest agent index.
    pub fn best(&self) -> &Tour {
        &self.tours[self.best_index]
    }

    /// Agent index of [`ColonyIteration::best`].
    pub fn best_index(&self) -> usize {
        self.best_index
    }

    pub fn into_tours(self) -> Vec<Tour> {
        self.tours
    }
}

/// Runs a population of ants over a shared, read-only graph.
///
/// Each ant gets its own generator, seeded from the caller's random
/// source in agent order. Tours therefore do not depend on whether they
/// are built sequentially or in parallel.
#[derive(Debug, Clone)]
pub struct Colony {
    ant: Ant,
    parallel: bool,
}

impl Colony {
    pub fn new(ant: Ant) -> Self {
        Self {
            ant,
            parallel: false,
        }
    }

    pub fn from_config(config: &AcoConfig) -> Self {
        Self::new(Ant::from_config(config)).with_parallel(config.parallel)
    }

    /// Builds tours on rayon's thread pool when the `parallel` feature is
    /// enabled. Ignored otherwise.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn ant(&self) -> &Ant {
        &self.ant
    }

    /// Lets `num_agents` ants each build one tour on the same trails.
    ///
    /// Fails with [`AcoError::InvalidAgentCount`] when `num_agents` is 0,
    /// or with [`AcoError::EmptyGraph`] for graphs under two cities.
    pub fn run_iteration<R: Rng>(
        &self,
        graph: &Graph,
        num_agents: usize,
        rng: &mut R,
    ) -> Result<ColonyIteration, AcoError> {
        if num_agents == 0 {
            return Err(AcoError::InvalidAgentCount(num_agents));
        }

        let seeds: Vec<u64> = (0..num_agents).map(|_| rng.random()).collect();
        let tours = self.construct_all(graph, &seeds)?;

        let mut best_index = 0;
        for (k, tour) in tours.iter().enumerate().skip(1) {
            if tour.length < tours[best_index].length {
                best_index = k;
            }
        }

        Ok(ColonyIteration { tours, best_index })
    }

    fn construct_one(&self, graph: &Graph, agent_index: usize, seed: u64) -> Result<Tour, AcoError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.ant.construct_tour(graph, agent_index, &mut rng)
    }

    #[cfg(feature = "parallel")]
    fn construct_all(&self, graph: &Graph, seeds: &[u64]) -> Result<Vec<Tour>, AcoError> {
        if self.parallel {
            seeds
                .par_iter()
                .enumerate()
                .map(|(k, &seed)| self.construct_one(graph, k, seed))
                .collect()
        } else {
            self.construct_sequential(graph, seeds)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn construct_all(&self, graph: &Graph, seeds: &[u64]) -> Result<Vec<Tour>, AcoError> {
        self.construct_sequential(graph, seeds)
    }

    fn construct_sequential(&self, graph: &Graph, seeds: &[u64]) -> Result<Vec<Tour>, AcoError> {
        seeds
            .iter()
            .enumerate()
            .map(|(k, &seed)| self.construct_one(graph, k, seed))
            .collect()
    }
}
