//! ACO episode loop.
//!
//! [`AcoEngine`] advances one episode per [`AcoEngine::step`]:
//! construct tours → evaluate → update trails → record best.
//! [`AcoRunner`] drives an engine to termination.

use super::colony::Colony;
use super::config::{AcoConfig, DepositPolicy};
use super::pheromone::PheromoneUpdate;
use crate::error::AcoError;
use crate::graph::{Graph, Tour};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of an [`AcoEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    /// Created, no episode run yet.
    Initialized,
    /// At least one episode run, budget not exhausted.
    Running,
    /// Stopped by the stagnation limit.
    Converged,
    /// Episode budget exhausted or cancelled.
    Stopped,
}

impl EngineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, EngineState::Converged | EngineState::Stopped)
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `num_episodes` episodes completed.
    EpisodeBudget,
    /// No improvement for `stagnation_limit` episodes.
    Stagnation,
    /// Cancelled externally.
    Cancelled,
    /// Consumed before reaching any stopping condition.
    Unfinished,
}

/// Outcome of one episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    /// Zero-based episode index.
    pub episode: usize,
    /// Length of the shortest tour built in this episode.
    pub iteration_best_length: f64,
    /// Best length over all episodes so far.
    pub best_length: f64,
    /// Whether this episode improved the best tour.
    pub improved: bool,
}

/// Result of an ACO run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// The best tour found.
    pub best: Tour,

    /// Length of the best tour.
    pub best_length: f64,

    /// Number of episodes executed.
    pub episodes: usize,

    /// Why the run ended.
    pub termination: Termination,

    /// `(episode_index, best_length)` after every episode. Non-increasing
    /// in length.
    pub history: Vec<(usize, f64)>,

    /// Iteration-best length of every episode.
    pub iteration_history: Vec<f64>,

    /// The graph with its final pheromone trails.
    pub graph: Graph,
}

/// Stateful ACO loop over an owned graph.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoEngine};
/// use u_aco::graph::Graph;
///
/// let graph = Graph::from_random(12, 1).unwrap();
/// let config = AcoConfig::default().with_num_episodes(5).with_seed(7);
/// let mut engine = AcoEngine::new(graph, config).unwrap();
/// while let Some(report) = engine.step().unwrap() {
///     assert!(report.best_length <= report.iteration_best_length);
/// }
/// assert_eq!(engine.history().len(), 5);
/// ```
#[derive(Debug)]
pub struct AcoEngine {
    graph: Graph,
    config: AcoConfig,
    colony: Colony,
    update: PheromoneUpdate,
    num_agents: usize,
    rng: StdRng,
    state: EngineState,
    termination: Option<Termination>,
    episode: usize,
    stagnation: usize,
    best: Option<Tour>,
    history: Vec<(usize, f64)>,
    iteration_history: Vec<f64>,
}

impl AcoEngine {
    /// Creates an engine. Validates the configuration and the graph size.
    pub fn new(graph: Graph, config: AcoConfig) -> Result<Self, AcoError> {
        config.validate()?;
        if graph.num_cities() < 2 {
            return Err(AcoError::EmptyGraph(graph.num_cities()));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let num_agents = config.agents_for(graph.num_cities());

        Ok(Self {
            colony: Colony::from_config(&config),
            update: PheromoneUpdate::from_config(&config),
            num_agents,
            rng: StdRng::seed_from_u64(seed),
            state: EngineState::Initialized,
            termination: None,
            episode: 0,
            stagnation: 0,
            best: None,
            history: Vec::with_capacity(config.num_episodes),
            iteration_history: Vec::with_capacity(config.num_episodes),
            graph,
            config,
        })
    }

    /// Runs one episode. Returns `None` once the engine is terminal.
    pub fn step(&mut self) -> Result<Option<EpisodeReport>, AcoError> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        let iteration = self
            .colony
            .run_iteration(&self.graph, self.num_agents, &mut self.rng)?;
        let iteration_best = iteration.best();

        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| iteration_best.length < best.length);
        if improved {
            self.best = Some(iteration_best.clone());
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        match self.config.deposit_policy {
            DepositPolicy::AllAnts => self.update.apply(&mut self.graph, iteration.tours())?,
            DepositPolicy::IterationBest => self
                .update
                .apply(&mut self.graph, std::slice::from_ref(iteration_best))?,
            DepositPolicy::GlobalBest => {
                let best = self.best.as_slice();
                self.update.apply(&mut self.graph, best)?
            }
        }

        let best_length = self.best_length();
        let report = EpisodeReport {
            episode: self.episode,
            iteration_best_length: iteration_best.length,
            best_length,
            improved,
        };
        self.history.push((self.episode, best_length));
        self.iteration_history.push(iteration_best.length);
        self.episode += 1;
        self.state = EngineState::Running;

        tracing::debug!(
            episode = report.episode,
            iteration_best = report.iteration_best_length,
            best = best_length,
            improved,
            "episode complete"
        );

        if self.config.stagnation_limit > 0 && self.stagnation >= self.config.stagnation_limit {
            self.finish(EngineState::Converged, Termination::Stagnation);
        } else if self.episode >= self.config.num_episodes {
            self.finish(EngineState::Stopped, Termination::EpisodeBudget);
        }

        Ok(Some(report))
    }

    /// Stops the engine. Further steps return `None`.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.finish(EngineState::Stopped, Termination::Cancelled);
        }
    }

    fn finish(&mut self, state: EngineState, termination: Termination) {
        self.state = state;
        self.termination = Some(termination);
        tracing::info!(
            episodes = self.episode,
            best = self.best_length(),
            ?termination,
            "ACO run finished"
        );
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Number of completed episodes.
    pub fn episode(&self) -> usize {
        self.episode
    }

    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Best tour so far, `None` before the first episode.
    pub fn best(&self) -> Option<&Tour> {
        self.best.as_ref()
    }

    /// Best length so far, infinite before the first episode.
    pub fn best_length(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |t| t.length)
    }

    /// `(episode_index, best_length)` per completed episode.
    pub fn history(&self) -> &[(usize, f64)] {
        &self.history
    }

    pub fn iteration_history(&self) -> &[f64] {
        &self.iteration_history
    }

    /// Consumes the engine into a result.
    ///
    /// Fails with [`AcoError::NoEpisodes`] if no episode has run. An
    /// engine that is still running reports [`Termination::Unfinished`].
    pub fn into_result(self) -> Result<AcoResult, AcoError> {
        let best = self.best.ok_or(AcoError::NoEpisodes)?;
        Ok(AcoResult {
            best_length: best.length,
            best,
            episodes: self.episode,
            termination: self.termination.unwrap_or(Termination::Unfinished),
            history: self.history,
            iteration_history: self.iteration_history,
            graph: self.graph,
        })
    }
}

/// Executes the ACO loop to completion.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs ACO on `graph` until the episode budget or stagnation limit.
    pub fn run(graph: Graph, config: &AcoConfig) -> Result<AcoResult, AcoError> {
        Self::run_with_cancel(graph, config, None)
    }

    /// Runs ACO with an optional cancellation token.
    ///
    /// The flag is checked after each episode, so at least one episode
    /// always completes and the result carries a tour.
    pub fn run_with_cancel(
        graph: Graph,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        let mut engine = AcoEngine::new(graph, config.clone())?;

        while engine.step()?.is_some() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    engine.cancel();
                    break;
                }
            }
        }

        engine.into_result()
    }
}
