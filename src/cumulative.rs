//! Inverse-CDF sampling over a piecewise-constant discrete distribution.

use crate::{IndexSampler, error::ConfigError};
use rand::Rng;

/// Prefix-sum table for weighted index sampling.
///
/// Index `i` owns the half-open interval `[cumulative[i-1], cumulative[i])`,
/// so a draw landing exactly on a boundary belongs to the later entry.
#[derive(Debug, Clone)]
pub struct CumulativeSampler {
    weights: Vec<f64>,
    cumulative: Vec<f64>,
    total: f64,
    last_live: usize,
}

impl CumulativeSampler {
    /// Construct from non-negative weights. O(n).
    pub fn new(weights: &[f64]) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut sum = 0.0f64;
        let mut last_live = 0;
        for (i, &w) in weights.iter().enumerate() {
            if !w.is_finite() {
                return Err(ConfigError::NonFinite { index: i, value: w });
            }
            if w < 0.0 {
                return Err(ConfigError::Negative { index: i, value: w });
            }
            if w > 0.0 {
                last_live = i;
            }
            sum += w;
            cumulative.push(sum);
        }
        if !sum.is_finite() || sum <= 0.0 {
            return Err(ConfigError::ZeroSum);
        }

        Ok(Self {
            weights: weights.to_vec(),
            cumulative,
            total: sum,
            last_live,
        })
    }

    /// Index owning `point`, where `point` is in `[0, total)`.
    ///
    /// Points at or beyond the total (float rounding of the draw) resolve to
    /// the last entry with positive weight, never to a zero-weight tail.
    #[inline]
    pub fn index_at(&self, point: f64) -> usize {
        let i = self.cumulative.partition_point(|&c| c <= point);
        if i < self.cumulative.len() {
            i
        } else {
            self.last_live
        }
    }

    /// Sum of all weights, cached at construction.
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Weight of a single entry, as declared.
    pub fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    /// Draw k samples, returning counts per index (useful for checks).
    #[cfg(test)]
    pub fn sample_counts<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.cumulative.len()];
        for _ in 0..draws {
            counts[self.sample_index(rng)] += 1;
        }
        counts
    }
}

impl IndexSampler for CumulativeSampler {
    #[inline]
    fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Draw a single index. O(log n).
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.random();
        self.index_at(u * self.total)
    }
}
