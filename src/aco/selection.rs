//! Weighted random choice for next-city selection.

use rand::Rng;

/// Picks an index with probability proportional to its weight.
///
/// Zero-weight entries are never picked while some weight is positive.
/// Entries of `+inf` dominate every finite weight: the pick is uniform
/// among them. A finite sum that overflows is rescaled by the largest
/// weight. If the weights sum to zero or NaN, the pick is uniform over
/// all entries.
///
/// # Panics
/// Panics if `weights` is empty.
///
/// # Complexity
/// O(n)
pub fn select_weighted<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    assert!(!weights.is_empty(), "cannot select from empty weights");

    let n = weights.len();
    if n == 1 {
        return 0;
    }

    let infinite = weights.iter().filter(|&&w| w == f64::INFINITY).count();
    if infinite > 0 {
        let k = rng.random_range(0..infinite);
        return weights
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == f64::INFINITY)
            .nth(k)
            .map_or(0, |(i, _)| i);
    }

    let mut scale = 1.0;
    let mut total: f64 = weights.iter().sum();
    if total == f64::INFINITY {
        scale = weights.iter().copied().fold(0.0, f64::max);
        total = weights.iter().map(|&w| w / scale).sum();
    }
    if !(total > 0.0 && total.is_finite()) {
        tracing::trace!(candidates = n, "degenerate weights, falling back to uniform choice");
        return rng.random_range(0..n);
    }

    let mut roll = rng.random_range(0.0..total);
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        let w = w / scale;
        if w > 0.0 {
            if roll < w {
                return i;
            }
            roll -= w;
            last_positive = i;
        }
    }
    // Rounding can leave a sliver past the last bucket.
    last_positive
}
