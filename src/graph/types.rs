//! City and tour value types.

/// Opaque city identifier.
///
/// Random layouts number cities `0..n`; TSPLIB files usually start at 1.
pub type CityId = usize;

/// A city with a 2D coordinate. Immutable once part of a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Identifier, unique within a graph.
    pub id: CityId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    pub const fn new(id: CityId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A closed tour visiting every city of a graph exactly once.
///
/// The edge from the last city back to the first is implicit; `length`
/// includes it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Visiting order.
    pub cities: Vec<CityId>,
    /// Total length including the closing edge.
    pub length: f64,
}

impl Tour {
    pub fn new(cities: Vec<CityId>, length: f64) -> Self {
        Self { cities, length }
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Consecutive edges of the tour, closing edge last.
    ///
    /// A tour with fewer than two cities has no edges.
    pub fn edges(&self) -> impl Iterator<Item = (CityId, CityId)> + '_ {
        let n = if self.cities.len() < 2 {
            0
        } else {
            self.cities.len()
        };
        (0..n).map(move |k| (self.cities[k], self.cities[(k + 1) % n]))
    }
}
