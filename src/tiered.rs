//! Power tier to source mapping.

use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::Rng;

use crate::{
    Pool,
    error::{ConfigError, RollError},
};

/// Widest tier range a selector accepts.
pub const MAX_TIER_SPAN: u32 = 1 << 16;

/// Maps every tier of a closed range to the table or group it draws from.
///
/// The mapping is explicit configuration: adjacent tiers may share one
/// source by reference, and any single tier step may switch to a source with
/// entirely new members.
#[derive(Debug, Clone)]
pub struct TieredSelector<S> {
    min: u32,
    by_tier: Vec<Arc<S>>,
}

impl<S> TieredSelector<S> {
    /// Build from `(tiers, source)` bands that must cover `range` exactly once.
    ///
    /// # Errors
    /// * [`ConfigError::InvalidTierRange`] if `range` is empty or spans more
    ///   than [`MAX_TIER_SPAN`] tiers.
    /// * [`ConfigError::TierOutOfBounds`] if a band reaches outside `range`.
    /// * [`ConfigError::TierConflict`] if two bands claim the same tier.
    /// * [`ConfigError::TierGap`] if a tier in `range` has no band.
    pub fn new<I>(range: RangeInclusive<u32>, bands: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (RangeInclusive<u32>, Arc<S>)>,
    {
        let (min, max) = (*range.start(), *range.end());
        if min > max || max - min >= MAX_TIER_SPAN {
            return Err(ConfigError::InvalidTierRange { min, max });
        }

        let mut slots: Vec<Option<Arc<S>>> = vec![None; (max - min) as usize + 1];
        for (tiers, source) in bands {
            if tiers.is_empty() {
                return Err(ConfigError::InvalidTierRange {
                    min: *tiers.start(),
                    max: *tiers.end(),
                });
            }
            for tier in tiers {
                if !range.contains(&tier) {
                    return Err(ConfigError::TierOutOfBounds { tier, min, max });
                }
                let slot = &mut slots[(tier - min) as usize];
                if slot.is_some() {
                    return Err(ConfigError::TierConflict { tier });
                }
                *slot = Some(Arc::clone(&source));
            }
        }

        let by_tier = slots
            .into_iter()
            .zip(min..=max)
            .map(|(slot, tier)| slot.ok_or(ConfigError::TierGap { tier }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { min, by_tier })
    }

    /// Supported tiers.
    pub fn tiers(&self) -> RangeInclusive<u32> {
        self.min..=self.max()
    }

    fn max(&self) -> u32 {
        self.min + (self.by_tier.len() as u32 - 1)
    }

    /// Source assigned to `tier`.
    pub fn source(&self, tier: u32) -> Result<&S, RollError> {
        tier.checked_sub(self.min)
            .and_then(|offset| self.by_tier.get(offset as usize))
            .map(Arc::as_ref)
            .ok_or_else(|| RollError::TierOutOfRange {
                tier,
                min: self.min,
                max: self.max(),
            })
    }

    /// Each source once, in ascending order of the first tier using it.
    pub fn distinct_sources(&self) -> impl Iterator<Item = &Arc<S>> + '_ {
        self.by_tier
            .iter()
            .enumerate()
            .filter(|(i, s)| !self.by_tier[..*i].iter().any(|prev| Arc::ptr_eq(prev, s)))
            .map(|(_, s)| s)
    }

    /// Roll the source assigned to `tier`.
    ///
    /// Fails without consuming randomness if `tier` is out of range.
    pub fn roll<R: Rng + ?Sized>(&self, tier: u32, rng: &mut R) -> Result<S::Drop, RollError>
    where
        S: Pool,
    {
        Ok(self.source(tier)?.roll(rng))
    }
}
