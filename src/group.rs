//! Mutually exclusive sub-kinds of one logical category.
//!
//! A [`CategoryGroup`] draws in two stages: first a member table uniformly,
//! regardless of how much weight it carries, then an item inside that table
//! by weight. Picking the sub-kind stays fair while each sub-kind keeps its
//! own plain/elemental/rare mix.

use std::sync::Arc;

use rand::Rng;

use crate::{
    IndexSampler, Pool, error::ConfigError, sampler::UniformSampler, table::ChanceTable,
};

#[derive(Debug, Clone)]
pub struct CategoryGroup<T, C> {
    picker: UniformSampler,
    members: Vec<(Arc<ChanceTable<T>>, C)>,
}

impl<T, C: Copy> CategoryGroup<T, C> {
    /// Build from `(table, tag)` pairs. Tables are shared by reference, so
    /// the same table may back members of several groups.
    ///
    /// # Errors
    /// [`ConfigError::EmptyGroup`] if there are no members.
    pub fn new<I>(members: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Arc<ChanceTable<T>>, C)>,
    {
        let members: Vec<_> = members.into_iter().collect();
        let picker = UniformSampler::new(members.len()).map_err(|_| ConfigError::EmptyGroup)?;
        Ok(Self { picker, members })
    }

    /// Two-stage draw: uniform member, then weighted item.
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> (&'a T, C) {
        let (table, tag) = &self.members[self.picker.sample_index(rng)];
        (table.sample(rng), *tag)
    }

    pub fn members(&self) -> impl ExactSizeIterator<Item = (&ChanceTable<T>, C)> + '_ {
        self.members.iter().map(|(t, c)| (t.as_ref(), *c))
    }

    /// Every `(item, weight, tag)` across members, member by member.
    pub fn entries(&self) -> impl Iterator<Item = (&T, f64, C)> + '_ {
        self.members
            .iter()
            .flat_map(|(table, tag)| table.entries().map(move |(item, w)| (item, w, *tag)))
    }

    /// Exact chance of drawing `item` from this group.
    pub fn probability(&self, item: &T) -> f64
    where
        T: PartialEq,
    {
        let k = self.members.len() as f64;
        self.members
            .iter()
            .map(|(table, _)| table.probability(item) / k)
            .sum()
    }

    /// Number of member tables.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T: Clone, C: Copy> Pool for CategoryGroup<T, C> {
    type Drop = (T, C);

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> (T, C) {
        let (item, tag) = self.sample(rng);
        (item.clone(), tag)
    }
}
