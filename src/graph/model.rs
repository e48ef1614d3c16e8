//! The graph model: cities, distances and pheromone trails.

use super::types::{City, CityId, Tour};
use crate::error::AcoError;
use std::collections::HashMap;

/// Initial trail intensity on every edge when none is given.
pub const DEFAULT_INITIAL_PHEROMONE: f64 = 1e-6;

/// Complete undirected weighted graph with per-edge pheromone.
///
/// Distances and pheromone are stored as dense row-major `n x n`
/// matrices indexed by the position of a city in [`Graph::cities`]. Both
/// are kept symmetric: every write touches `(i, j)` and `(j, i)`.
///
/// # Examples
///
/// ```
/// use u_aco::graph::{City, Graph};
///
/// let graph = Graph::new(vec![
///     City::new(0, 0.0, 0.0),
///     City::new(1, 3.0, 4.0),
/// ])
/// .unwrap();
/// assert!((graph.distance(0, 1).unwrap() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    cities: Vec<City>,
    index: HashMap<CityId, usize>,
    distances: Vec<f64>,
    pheromone: Vec<f64>,
}

impl Graph {
    /// Builds a graph with [`DEFAULT_INITIAL_PHEROMONE`] on every edge.
    pub fn new(cities: Vec<City>) -> Result<Self, AcoError> {
        Self::with_initial_pheromone(cities, DEFAULT_INITIAL_PHEROMONE)
    }

    /// Builds a graph with a uniform initial pheromone value.
    ///
    /// Fails with [`AcoError::GraphConstruction`] on duplicate ids,
    /// non-finite coordinates, or a non-positive initial pheromone.
    pub fn with_initial_pheromone(
        cities: Vec<City>,
        initial_pheromone: f64,
    ) -> Result<Self, AcoError> {
        if !(initial_pheromone > 0.0 && initial_pheromone.is_finite()) {
            return Err(AcoError::GraphConstruction(format!(
                "initial pheromone must be positive and finite, got {initial_pheromone}"
            )));
        }

        let mut index = HashMap::with_capacity(cities.len());
        for (pos, city) in cities.iter().enumerate() {
            if !(city.x.is_finite() && city.y.is_finite()) {
                return Err(AcoError::GraphConstruction(format!(
                    "city {} has a non-finite coordinate",
                    city.id
                )));
            }
            if index.insert(city.id, pos).is_some() {
                return Err(AcoError::GraphConstruction(format!(
                    "duplicate city identifier {}",
                    city.id
                )));
            }
        }

        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        Ok(Self {
            cities,
            index,
            distances,
            pheromone: vec![initial_pheromone; n * n],
        })
    }

    /// Cities in construction order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    /// Position of a city in [`Graph::cities`].
    pub fn index_of(&self, id: CityId) -> Result<usize, AcoError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(AcoError::InvalidCity(id))
    }

    /// Distance between two cities.
    pub fn distance(&self, i: CityId, j: CityId) -> Result<f64, AcoError> {
        let (a, b) = (self.index_of(i)?, self.index_of(j)?);
        Ok(self.distance_at(a, b))
    }

    /// Pheromone intensity on the edge between two cities.
    pub fn pheromone(&self, i: CityId, j: CityId) -> Result<f64, AcoError> {
        let (a, b) = (self.index_of(i)?, self.index_of(j)?);
        Ok(self.pheromone_at(a, b))
    }

    /// Sets the pheromone intensity on an edge (both directions).
    pub fn set_pheromone(&mut self, i: CityId, j: CityId, value: f64) -> Result<(), AcoError> {
        if !(value >= 0.0 && value.is_finite()) {
            return Err(AcoError::InvalidPheromone(value));
        }
        let (a, b) = (self.index_of(i)?, self.index_of(j)?);
        self.set_pheromone_at(a, b, value);
        Ok(())
    }

    /// Resets every edge to the same positive intensity.
    pub fn reset_pheromone(&mut self, value: f64) -> Result<(), AcoError> {
        if !(value > 0.0 && value.is_finite()) {
            return Err(AcoError::InvalidPheromone(value));
        }
        self.pheromone.fill(value);
        Ok(())
    }

    /// Length of a closed tour given as city ids.
    pub fn tour_length(&self, cities: &[CityId]) -> Result<f64, AcoError> {
        let path = cities
            .iter()
            .map(|&id| self.index_of(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.path_length(&path))
    }

    /// The tour that visits cities in construction order.
    pub fn initial_tour(&self) -> Result<Tour, AcoError> {
        if self.num_cities() < 2 {
            return Err(AcoError::EmptyGraph(self.num_cities()));
        }
        let path: Vec<usize> = (0..self.num_cities()).collect();
        Ok(self.tour_from_path(&path))
    }

    /// Every undirected edge once as `(i, j, distance, pheromone)`, `i`
    /// before `j` in construction order.
    pub fn edges(&self) -> impl Iterator<Item = (CityId, CityId, f64, f64)> + '_ {
        let n = self.num_cities();
        (0..n).flat_map(move |a| {
            ((a + 1)..n).map(move |b| {
                (
                    self.cities[a].id,
                    self.cities[b].id,
                    self.distance_at(a, b),
                    self.pheromone_at(a, b),
                )
            })
        })
    }

    #[inline]
    pub(crate) fn distance_at(&self, a: usize, b: usize) -> f64 {
        self.distances[a * self.cities.len() + b]
    }

    #[inline]
    pub(crate) fn pheromone_at(&self, a: usize, b: usize) -> f64 {
        self.pheromone[a * self.cities.len() + b]
    }

    #[inline]
    pub(crate) fn set_pheromone_at(&mut self, a: usize, b: usize, value: f64) {
        let n = self.cities.len();
        self.pheromone[a * n + b] = value;
        self.pheromone[b * n + a] = value;
    }

    /// Applies `f` to every undirected edge's pheromone, diagonal excluded.
    pub(crate) fn map_pheromone<F: Fn(f64) -> f64>(&mut self, f: F) {
        let n = self.cities.len();
        for a in 0..n {
            for b in (a + 1)..n {
                let value = f(self.pheromone[a * n + b]);
                self.pheromone[a * n + b] = value;
                self.pheromone[b * n + a] = value;
            }
        }
    }

    /// Closed length of a path of city positions.
    pub(crate) fn path_length(&self, path: &[usize]) -> f64 {
        if path.len() < 2 {
            return 0.0;
        }
        let open: f64 = path
            .windows(2)
            .map(|w| self.distance_at(w[0], w[1]))
            .sum();
        open + self.distance_at(path[path.len() - 1], path[0])
    }

    pub(crate) fn tour_from_path(&self, path: &[usize]) -> Tour {
        Tour::new(
            path.iter().map(|&a| self.cities[a].id).collect(),
            self.path_length(path),
        )
    }
}
