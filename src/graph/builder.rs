//! Graph construction from random layouts and TSPLIB text.

use super::model::Graph;
use super::types::City;
use crate::error::AcoError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Generates `num_cities` cities uniformly in the unit square.
///
/// Ids are `0..num_cities`. The same seed always yields the same layout.
pub fn random_cities(num_cities: usize, seed: u64) -> Vec<City> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_cities)
        .map(|id| City::new(id, rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect()
}

/// Parses the cities of a TSPLIB problem.
///
/// Reads `KEY : VALUE` header lines, then `id x y` triples after
/// `NODE_COORD_SECTION` until `EOF` or the end of input. Only the
/// `EUC_2D` edge weight type (or none) is accepted, since distances are
/// always Euclidean. When `DIMENSION` is present the city count must
/// match it.
pub fn parse_tsplib(input: &str) -> Result<Vec<City>, AcoError> {
    let mut dimension: Option<usize> = None;
    let mut cities = Vec::new();
    let mut in_coords = false;

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        if in_coords {
            cities.push(parse_coord_line(line, line_no + 1)?);
            continue;
        }

        if line.starts_with("NODE_COORD_SECTION") {
            in_coords = true;
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "DIMENSION" => {
                let n = value.trim().parse::<usize>().map_err(|_| {
                    AcoError::GraphConstruction(format!(
                        "line {}: invalid DIMENSION '{}'",
                        line_no + 1,
                        value.trim()
                    ))
                })?;
                dimension = Some(n);
            }
            "EDGE_WEIGHT_TYPE" => {
                let kind = value.trim();
                if kind != "EUC_2D" {
                    return Err(AcoError::GraphConstruction(format!(
                        "unsupported EDGE_WEIGHT_TYPE '{kind}', only EUC_2D is supported"
                    )));
                }
            }
            _ => {}
        }
    }

    if !in_coords {
        return Err(AcoError::GraphConstruction(
            "missing NODE_COORD_SECTION".into(),
        ));
    }
    if let Some(n) = dimension {
        if n != cities.len() {
            return Err(AcoError::GraphConstruction(format!(
                "DIMENSION is {n} but {} coordinates were read",
                cities.len()
            )));
        }
    }
    Ok(cities)
}

fn parse_coord_line(line: &str, line_no: usize) -> Result<City, AcoError> {
    let bad = || AcoError::GraphConstruction(format!("line {line_no}: malformed coordinate '{line}'"));

    let mut fields = line.split_whitespace();
    let id = fields
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(bad)?;
    let x = fields
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(bad)?;
    let y = fields
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(bad)?;
    if fields.next().is_some() {
        return Err(bad());
    }
    Ok(City::new(id, x, y))
}

impl Graph {
    /// Random graph in the unit square, reproducible from `seed`.
    pub fn from_random(num_cities: usize, seed: u64) -> Result<Self, AcoError> {
        Self::new(random_cities(num_cities, seed))
    }

    /// Graph from TSPLIB text. See [`parse_tsplib`].
    pub fn from_tsplib(input: &str) -> Result<Self, AcoError> {
        Self::new(parse_tsplib(input)?)
    }

    /// Graph from a TSPLIB file on disk.
    pub fn from_tsplib_file<P: AsRef<Path>>(path: P) -> Result<Self, AcoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AcoError::GraphConstruction(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_tsplib(&text)
    }
}
