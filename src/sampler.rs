use rand::Rng;

use crate::{IndexSampler, error::ConfigError};

/// Uniform index sampler: picks an index in `0..n` with equal probability.
#[derive(Debug, Clone, Copy)]
pub struct UniformSampler {
    n: usize,
}

impl UniformSampler {
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::Empty);
        }
        Ok(Self { n })
    }
}

impl IndexSampler for UniformSampler {
    #[inline]
    fn len(&self) -> usize {
        self.n
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.n)
    }
}
