use rand::Rng;

use crate::{IndexSampler, Pool, cumulative::CumulativeSampler, error::ConfigError};

/// A weighted population supporting single-draw sampling.
///
/// Associates items with weights and samples them through an internal
/// [`CumulativeSampler`]. Entries keep their declaration order, which fixes
/// the order intervals are laid out in.
#[derive(Debug, Clone)]
pub struct ChanceTable<T> {
    sampler: CumulativeSampler,
    items: Vec<T>,
}

impl<T> ChanceTable<T> {
    /// Build from any `(item, weight)` iterator.
    ///
    /// # Errors
    /// * [`ConfigError::Empty`] if there are no items.
    /// * [`ConfigError::Negative`] if any weight is negative.
    /// * [`ConfigError::NonFinite`] if any weight is `NaN` or infinite.
    /// * [`ConfigError::ZeroSum`] if the sum of weights is zero or not finite.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut items = Vec::new();
        let mut weights = Vec::new();
        for (t, w) in pairs {
            items.push(t);
            weights.push(w);
        }
        let sampler = CumulativeSampler::new(&weights)?;
        Ok(Self { sampler, items })
    }

    /// Sample an item **by reference**.
    ///
    /// Never fails once the table is built.
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        &self.items[self.sampler.sample_index(rng)]
    }

    /// Sample an item **by value** (clones the chosen element).
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> T
    where
        T: Clone,
    {
        self.sample(rng).clone()
    }

    /// The item owning `point` on the `[0, total_weight)` line.
    pub fn pick(&self, point: f64) -> &T {
        &self.items[self.sampler.index_at(point)]
    }

    pub fn total_weight(&self) -> f64 {
        self.sampler.total()
    }

    /// `(item, weight)` pairs in declaration order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&T, f64)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (item, self.sampler.weight(i)))
    }

    /// Exact chance of drawing `item` (summed over repeated entries).
    pub fn probability(&self, item: &T) -> f64
    where
        T: PartialEq,
    {
        let mass: f64 = self
            .entries()
            .filter(|(t, _)| *t == item)
            .map(|(_, w)| w)
            .sum();
        mass / self.total_weight()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Pool for ChanceTable<T> {
    type Drop = T;

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.sample_owned(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedRng, chi_square};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn stub_draws_hit_expected_entries() {
        let table = ChanceTable::from_pairs([("A", 0.5), ("B", 0.5)]).unwrap();
        assert_eq!(table.total_weight(), 1.0);

        assert_eq!(*table.sample(&mut FixedRng::unit(0.0)), "A");
        assert_eq!(*table.sample(&mut FixedRng::unit(0.999_999)), "B");
        assert_eq!(*table.sample(&mut FixedRng::unit(0.5)), "B");
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = ChanceTable::from_pairs([("a", 1.0), ("b", -1.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { index: 1, .. }));
    }

    #[test]
    fn all_zero_is_rejected() {
        let err = ChanceTable::from_pairs([("a", 0.0), ("b", 0.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSum));
    }

    #[test]
    fn empty_is_rejected() {
        let err = ChanceTable::<&str>::from_pairs([]).unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let table = ChanceTable::from_pairs([(1u32, 3.0), (2, 1.0)]).unwrap();
        assert_eq!(table.total_weight(), 4.0);
        assert_eq!(table.probability(&1), 0.75);
        assert_eq!(*table.pick(2.99), 1);
        assert_eq!(*table.pick(3.0), 2);
    }

    #[test]
    fn entries_keep_declaration_order() {
        let table = ChanceTable::from_pairs([("x", 2.0), ("y", 0.0), ("z", 1.0)]).unwrap();
        let got: Vec<_> = table.entries().collect();
        assert_eq!(got, vec![(&"x", 2.0), (&"y", 0.0), (&"z", 1.0)]);
    }

    #[test]
    fn entries_report_declared_weights() {
        let table = ChanceTable::from_pairs([("a", 0.1), ("b", 0.2), ("c", 0.7)]).unwrap();
        let weights: Vec<f64> = table.entries().map(|(_, w)| w).collect();
        assert_eq!(weights, [0.1, 0.2, 0.7]);
        assert_eq!(table.probability(&"b"), 0.2 / table.total_weight());
    }

    #[test]
    fn frequencies_converge_to_weights() {
        let weights = [5.0, 1.0, 3.0, 0.5, 0.5];
        let table =
            ChanceTable::from_pairs(weights.iter().copied().enumerate()).unwrap();

        let mut rng = StdRng::seed_from_u64(0x7ea5);
        let draws = 50_000;
        let mut counts = [0u64; 5];
        for _ in 0..draws {
            counts[*table.sample(&mut rng)] += 1;
        }

        let expected: Vec<f64> = weights
            .iter()
            .map(|w| w / table.total_weight() * draws as f64)
            .collect();
        // df = 4, p = 0.001
        assert!(chi_square(&counts, &expected) < 18.47, "{counts:?}");
    }
}
