use rand::RngCore;

/// Generator that always yields the same word.
///
/// `random::<f64>()` keeps the top 53 bits, so [`FixedRng::unit`] makes the
/// unit draw exactly `u` (for `u` representable in 53 bits).
pub(crate) struct FixedRng(u64);

impl FixedRng {
    pub(crate) fn unit(u: f64) -> Self {
        FixedRng(((u * (1u64 << 53) as f64) as u64) << 11)
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            chunk.copy_from_slice(&self.0.to_le_bytes()[..chunk.len()]);
        }
    }
}

/// Pearson's chi-square statistic.
pub(crate) fn chi_square(observed: &[u64], expected: &[f64]) -> f64 {
    observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| (o as f64 - e).powi(2) / e)
        .sum()
}
