//! Ant tour-construction policy.

use super::config::{AcoConfig, StartCityPolicy};
use super::selection::select_weighted;
use crate::error::AcoError;
use crate::graph::{Graph, Tour};
use rand::Rng;

/// Distances below this are treated as this value when computing the
/// heuristic, so coincident cities keep a finite desirability.
const MIN_DISTANCE: f64 = 1e-10;

/// Tour-construction policy of a single ant.
///
/// An ant holds no per-tour state; it reads the graph and returns a new
/// [`Tour`] on every call. Next cities are drawn with probability
/// proportional to
///
/// ```text
/// tau(c, j)^alpha * (1 / d(c, j))^beta
/// ```
///
/// over the unvisited cities `j`.
///
/// # References
///
/// Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
/// Colony of Cooperating Agents"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ant {
    /// Trail exponent.
    pub alpha: f64,
    /// Heuristic exponent.
    pub beta: f64,
    /// Start city convention.
    pub start_city: StartCityPolicy,
}

impl Default for Ant {
    fn default() -> Self {
        Self::from_config(&AcoConfig::default())
    }
}

impl Ant {
    pub fn new(alpha: f64, beta: f64, start_city: StartCityPolicy) -> Self {
        Self {
            alpha,
            beta,
            start_city,
        }
    }

    pub fn from_config(config: &AcoConfig) -> Self {
        Self::new(config.alpha, config.beta, config.start_city_policy)
    }

    /// Both exponents must be finite and non-negative.
    pub fn validate(&self) -> Result<(), AcoError> {
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(AcoError::InvalidConfig(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.beta >= 0.0 && self.beta.is_finite()) {
            return Err(AcoError::InvalidConfig(format!(
                "beta must be non-negative, got {}",
                self.beta
            )));
        }
        Ok(())
    }

    /// Desirability of moving between two city positions.
    pub(crate) fn score(&self, graph: &Graph, from: usize, to: usize) -> f64 {
        let heuristic = 1.0 / graph.distance_at(from, to).max(MIN_DISTANCE);
        graph.pheromone_at(from, to).powf(self.alpha) * heuristic.powf(self.beta)
    }

    /// Builds one complete tour.
    ///
    /// `agent_index` fixes the start city under
    /// [`StartCityPolicy::FixedPerAgent`]; it is ignored otherwise.
    ///
    /// Fails with [`AcoError::InvalidConfig`] on negative or non-finite
    /// exponents and with [`AcoError::EmptyGraph`] on graphs with fewer
    /// than two cities.
    pub fn construct_tour<R: Rng>(
        &self,
        graph: &Graph,
        agent_index: usize,
        rng: &mut R,
    ) -> Result<Tour, AcoError> {
        self.validate()?;
        let n = graph.num_cities();
        if n < 2 {
            return Err(AcoError::EmptyGraph(n));
        }

        let start = match self.start_city {
            StartCityPolicy::FixedPerAgent => agent_index % n,
            StartCityPolicy::Random => rng.random_range(0..n),
        };

        let mut path = Vec::with_capacity(n);
        path.push(start);
        let mut unvisited: Vec<usize> = (0..n).filter(|&c| c != start).collect();
        let mut scores = Vec::with_capacity(n);
        let mut current = start;

        while !unvisited.is_empty() {
            scores.clear();
            scores.extend(unvisited.iter().map(|&j| self.score(graph, current, j)));
            let pick = select_weighted(&scores, rng);
            current = unvisited.swap_remove(pick);
            path.push(current);
        }

        Ok(graph.tour_from_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::City;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn is_permutation(graph: &Graph, tour: &Tour) -> bool {
        let seen: HashSet<_> = tour.cities.iter().copied().collect();
        tour.len() == graph.num_cities()
            && seen.len() == graph.num_cities()
            && graph.cities().iter().all(|c| seen.contains(&c.id))
    }

    #[test]
    fn test_tour_is_permutation_with_correct_length() {
        let graph = Graph::from_random(30, 11).unwrap();
        let ant = Ant::default();
        let mut rng = StdRng::seed_from_u64(42);

        for k in 0..10 {
            let tour = ant.construct_tour(&graph, k, &mut rng).unwrap();
            assert!(is_permutation(&graph, &tour));
            let expected = graph.tour_length(&tour.cities).unwrap();
            assert!((tour.length - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fixed_start_city() {
        let graph = Graph::from_random(5, 3).unwrap();
        let ant = Ant::new(1.0, 2.0, StartCityPolicy::FixedPerAgent);
        let mut rng = StdRng::seed_from_u64(0);
        for k in 0..12 {
            let tour = ant.construct_tour(&graph, k, &mut rng).unwrap();
            assert_eq!(tour.cities[0], graph.cities()[k % 5].id);
        }
    }

    #[test]
    fn test_random_start_city_varies() {
        let graph = Graph::from_random(8, 3).unwrap();
        let ant = Ant::new(1.0, 2.0, StartCityPolicy::Random);
        let mut rng = StdRng::seed_from_u64(0);
        let starts: HashSet<_> = (0..100)
            .map(|_| ant.construct_tour(&graph, 0, &mut rng).unwrap().cities[0])
            .collect();
        assert!(starts.len() > 1);
    }

    #[test]
    fn test_two_cities_single_tour() {
        let graph = Graph::new(vec![City::new(0, 0.0, 0.0), City::new(1, 2.0, 0.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for (alpha, beta) in [(0.0, 0.0), (1.0, 2.0), (5.0, 0.0), (0.0, 5.0)] {
            let ant = Ant::new(alpha, beta, StartCityPolicy::Random);
            for _ in 0..20 {
                let tour = ant.construct_tour(&graph, 0, &mut rng).unwrap();
                assert_eq!(tour.len(), 2);
                assert_eq!(tour.length, 4.0);
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let ant = Ant::default();
        let mut rng = StdRng::seed_from_u64(0);

        let empty = Graph::new(vec![]).unwrap();
        assert_eq!(
            ant.construct_tour(&empty, 0, &mut rng),
            Err(AcoError::EmptyGraph(0))
        );

        let single = Graph::new(vec![City::new(0, 1.0, 1.0)]).unwrap();
        assert_eq!(
            ant.construct_tour(&single, 0, &mut rng),
            Err(AcoError::EmptyGraph(1))
        );
    }

    #[test]
    fn test_zero_pheromone_uses_uniform_fallback() {
        let mut graph = Graph::from_random(6, 2).unwrap();
        for a in 0..6 {
            for b in 0..6 {
                graph.set_pheromone(a, b, 0.0).unwrap();
            }
        }
        let ant = Ant::new(1.0, 2.0, StartCityPolicy::FixedPerAgent);
        assert_eq!(ant.score(&graph, 0, 1), 0.0);

        let mut rng = StdRng::seed_from_u64(8);
        let seconds: HashSet<_> = (0..200)
            .map(|_| ant.construct_tour(&graph, 0, &mut rng).unwrap())
            .inspect(|t| assert!(is_permutation(&graph, t)))
            .map(|t| t.cities[1])
            .collect();
        assert_eq!(seconds.len(), 5, "every city should be reachable second");
    }

    #[test]
    fn test_coincident_cities() {
        let graph = Graph::new(vec![
            City::new(0, 0.0, 0.0),
            City::new(1, 0.0, 0.0),
            City::new(2, 1.0, 0.0),
        ])
        .unwrap();
        let ant = Ant::default();
        assert!(ant.score(&graph, 0, 1).is_finite());
        let mut rng = StdRng::seed_from_u64(1);
        let tour = ant.construct_tour(&graph, 0, &mut rng).unwrap();
        assert!(is_permutation(&graph, &tour));
        assert!((tour.length - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_strong_beta_prefers_nearest() {
        // From city 0, city 1 is 1 away and city 2 is 10 away.
        let graph = Graph::new(vec![
            City::new(0, 0.0, 0.0),
            City::new(1, 1.0, 0.0),
            City::new(2, -10.0, 0.0),
        ])
        .unwrap();
        let ant = Ant::new(0.0, 5.0, StartCityPolicy::FixedPerAgent);
        let mut rng = StdRng::seed_from_u64(3);
        let near = (0..500)
            .filter(|_| ant.construct_tour(&graph, 0, &mut rng).unwrap().cities[1] == 1)
            .count();
        assert!(near > 490, "nearest picked only {near}/500 times");
    }

    #[test]
    fn test_invalid_exponents_rejected() {
        let graph = Graph::from_random(5, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for (alpha, beta) in [(-1.0, 2.0), (1.0, -0.5), (f64::NAN, 2.0), (1.0, f64::INFINITY)] {
            let ant = Ant::new(alpha, beta, StartCityPolicy::FixedPerAgent);
            assert!(ant.validate().is_err());
            assert!(matches!(
                ant.construct_tour(&graph, 0, &mut rng),
                Err(AcoError::InvalidConfig(_))
            ));
        }
        assert!(Ant::new(0.0, 0.0, StartCityPolicy::Random).validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_tours_are_permutations(
            n in 2usize..25,
            layout_seed in any::<u64>(),
            ant_seed in any::<u64>(),
            alpha in 0.0f64..4.0,
            beta in 0.0f64..6.0,
        ) {
            let graph = Graph::from_random(n, layout_seed).unwrap();
            let ant = Ant::new(alpha, beta, StartCityPolicy::Random);
            let mut rng = StdRng::seed_from_u64(ant_seed);
            let tour = ant.construct_tour(&graph, 0, &mut rng).unwrap();
            prop_assert!(is_permutation(&graph, &tour));
            let expected = graph.tour_length(&tour.cities).unwrap();
            prop_assert!((tour.length - expected).abs() < 1e-9);
        }
    }
}
