//! Pheromone evaporation and deposit.

use super::config::AcoConfig;
use crate::error::AcoError;
use crate::graph::{Graph, Tour};

/// The Ant System trail update.
///
/// ```text
/// tau_ij <- max(tau_ij * (1 - rho), floor) + sum_T [ (i, j) in T ] * Q / L(T)
/// ```
///
/// Evaporation runs over the whole graph before any deposit, so no edge
/// mixes old and new episode information. The result depends only on the
/// previous trails, the depositing tours, `rho`, `Q` and the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneUpdate {
    /// Evaporation rate in `[0, 1)`.
    pub rho: f64,
    /// Deposit constant.
    pub q: f64,
    /// Lower bound applied after evaporation.
    pub min_pheromone: f64,
}

impl PheromoneUpdate {
    pub fn new(rho: f64, q: f64, min_pheromone: f64) -> Self {
        Self {
            rho,
            q,
            min_pheromone,
        }
    }

    pub fn from_config(config: &AcoConfig) -> Self {
        Self::new(config.rho, config.q, config.min_pheromone)
    }

    /// Checks that the update can never drive a trail below zero.
    pub fn validate(&self) -> Result<(), AcoError> {
        if !(0.0..1.0).contains(&self.rho) {
            return Err(AcoError::InvalidConfig(format!(
                "rho must be in [0, 1), got {}",
                self.rho
            )));
        }
        if !(self.q >= 0.0 && self.q.is_finite()) {
            return Err(AcoError::InvalidConfig(format!(
                "q must be non-negative, got {}",
                self.q
            )));
        }
        if !(self.min_pheromone >= 0.0 && self.min_pheromone.is_finite()) {
            return Err(AcoError::InvalidConfig(format!(
                "min_pheromone must be non-negative, got {}",
                self.min_pheromone
            )));
        }
        Ok(())
    }

    /// Evaporates every edge, then deposits along each tour.
    ///
    /// Parameters and tours are checked before anything is written: out
    /// of range parameters fail with [`AcoError::InvalidConfig`], an
    /// unknown city with [`AcoError::InvalidCity`], and in both cases the
    /// trails are left untouched. Tours of zero length deposit nothing.
    pub fn apply(&self, graph: &mut Graph, tours: &[Tour]) -> Result<(), AcoError> {
        self.validate()?;

        let mut deposits = Vec::with_capacity(tours.len());
        for tour in tours {
            let path = tour
                .cities
                .iter()
                .map(|&id| graph.index_of(id))
                .collect::<Result<Vec<_>, _>>()?;
            if tour.length > 0.0 && path.len() >= 2 {
                deposits.push((path, self.q / tour.length));
            }
        }

        self.evaporate_unchecked(graph);

        for (path, amount) in &deposits {
            let n = path.len();
            for k in 0..n {
                let (a, b) = (path[k], path[(k + 1) % n]);
                let value = graph.pheromone_at(a, b) + amount;
                graph.set_pheromone_at(a, b, value);
            }
        }
        Ok(())
    }

    /// Multiplies every edge by `1 - rho`, clamped at the floor.
    pub fn evaporate(&self, graph: &mut Graph) -> Result<(), AcoError> {
        self.validate()?;
        self.evaporate_unchecked(graph);
        Ok(())
    }

    fn evaporate_unchecked(&self, graph: &mut Graph) {
        let keep = 1.0 - self.rho;
        let floor = self.min_pheromone;
        graph.map_pheromone(|tau| (tau * keep).max(floor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::City;
    use proptest::prelude::*;

    fn square() -> Graph {
        Graph::with_initial_pheromone(
            vec![
                City::new(0, 0.0, 0.0),
                City::new(1, 0.0, 1.0),
                City::new(2, 1.0, 1.0),
                City::new(3, 1.0, 0.0),
            ],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_evaporation_then_deposit() {
        let mut g = square();
        let tour = Tour::new(vec![0, 1, 2, 3], 4.0);
        PheromoneUpdate::new(0.5, 2.0, 0.0)
            .apply(&mut g, &[tour])
            .unwrap();

        // Tour edges: 1.0 * 0.5 + 2.0 / 4.0
        for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            assert!((g.pheromone(i, j).unwrap() - 1.0).abs() < 1e-12);
        }
        // Diagonals were not used: pure decay.
        assert!((g.pheromone(0, 2).unwrap() - 0.5).abs() < 1e-12);
        assert!((g.pheromone(1, 3).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_deposits_accumulate_over_tours() {
        let mut g = square();
        let a = Tour::new(vec![0, 1, 2, 3], 4.0);
        let b = Tour::new(vec![0, 1, 3, 2], 2.0 + 2.0 * 2f64.sqrt());
        let update = PheromoneUpdate::new(0.1, 1.0, 0.0);
        update.apply(&mut g, &[a.clone(), b.clone()]).unwrap();

        // Edge (0, 1) is in both tours.
        let expected = 0.9 + 1.0 / a.length + 1.0 / b.length;
        assert!((g.pheromone(0, 1).unwrap() - expected).abs() < 1e-12);
        // Edge (0, 2) only in b, via the closing edge 2 -> 0.
        let expected = 0.9 + 1.0 / b.length;
        assert!((g.pheromone(2, 0).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_floor_clamp() {
        let mut g = Graph::with_initial_pheromone(
            vec![City::new(0, 0.0, 0.0), City::new(1, 1.0, 0.0), City::new(2, 0.0, 1.0)],
            1e-9,
        )
        .unwrap();
        let update = PheromoneUpdate::new(0.99, 1.0, 1e-10);
        for _ in 0..10 {
            update.apply(&mut g, &[]).unwrap();
        }
        assert!(g.edges().all(|(_, _, _, p)| p == 1e-10));
    }

    #[test]
    fn test_no_evaporation_no_deposit_is_identity() {
        let mut g = Graph::from_random(12, 4).unwrap();
        g.set_pheromone(3, 7, 0.42).unwrap();
        let before: Vec<_> = g.edges().collect();
        let tour = g.initial_tour().unwrap();

        PheromoneUpdate::new(0.0, 0.0, 1e-10)
            .apply(&mut g, &[tour])
            .unwrap();
        let after: Vec<_> = g.edges().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_invalid_tour_leaves_graph_untouched() {
        let mut g = square();
        let before: Vec<_> = g.edges().collect();
        let good = Tour::new(vec![0, 1, 2, 3], 4.0);
        let bad = Tour::new(vec![0, 1, 2, 99], 4.0);

        let err = PheromoneUpdate::new(0.5, 1.0, 0.0)
            .apply(&mut g, &[good, bad])
            .unwrap_err();
        assert_eq!(err, AcoError::InvalidCity(99));
        assert_eq!(before, g.edges().collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_length_tour_deposits_nothing() {
        let mut g = Graph::with_initial_pheromone(
            vec![City::new(0, 1.0, 1.0), City::new(1, 1.0, 1.0)],
            1.0,
        )
        .unwrap();
        let tour = Tour::new(vec![0, 1], 0.0);
        PheromoneUpdate::new(0.5, 1.0, 0.0)
            .apply(&mut g, &[tour])
            .unwrap();
        assert_eq!(g.pheromone(0, 1).unwrap(), 0.5);
    }

    #[test]
    fn test_out_of_range_parameters_rejected() {
        let g = square();
        let tour = Tour::new(vec![0, 1, 2, 3], 4.0);
        let before: Vec<_> = g.edges().collect();

        for update in [
            PheromoneUpdate::new(0.1, -10.0, 1e-10),
            PheromoneUpdate::new(2.0, 1.0, 0.0),
            PheromoneUpdate::new(-0.5, 1.0, 0.0),
            PheromoneUpdate::new(0.1, 1.0, -1.0),
            PheromoneUpdate::new(0.1, f64::NAN, 0.0),
            PheromoneUpdate::new(0.1, 1.0, f64::INFINITY),
        ] {
            let mut g = g.clone();
            let err = update.apply(&mut g, std::slice::from_ref(&tour)).unwrap_err();
            assert!(matches!(err, AcoError::InvalidConfig(_)), "{update:?}");
            assert!(update.evaporate(&mut g).is_err());
            assert_eq!(before, g.edges().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_from_config_matches_config_validation() {
        let update = PheromoneUpdate::from_config(&AcoConfig::default());
        assert!(update.validate().is_ok());
        assert!(PheromoneUpdate::new(0.0, 0.0, 0.0).validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_trails_never_below_floor(
            rho in 0.0f64..0.999,
            q in 0.0f64..10.0,
            floor in 0.0f64..1e-3,
            rounds in 1usize..30,
            seed in any::<u64>(),
        ) {
            let mut g = Graph::from_random(8, seed).unwrap();
            let tour = g.initial_tour().unwrap();
            let update = PheromoneUpdate::new(rho, q, floor);
            for r in 0..rounds {
                let tours = if r % 2 == 0 { vec![tour.clone()] } else { vec![] };
                update.apply(&mut g, &tours).unwrap();
                for (_, _, _, p) in g.edges() {
                    prop_assert!(p >= floor && p >= 0.0);
                }
            }
        }
    }
}
