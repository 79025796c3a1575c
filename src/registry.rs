//! The composition root: every treasure axis, built once and then shared.
//!
//! A [`TreasureRegistry`] is only ever handed out fully built, so there is no
//! partially initialised state for a reader to observe. Build it at startup,
//! abort on [`ConfigError`], then share it by reference (or `Arc`) with every
//! worker. All rolls take `&self` and a caller-owned generator.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use rand::Rng;

use crate::{
    IndexSampler,
    classify::{Conflict, ReverseClassifier},
    config::{BandConfig, TreasureConfig},
    error::{ConfigError, LookupError, RollError},
    group::CategoryGroup,
    ids::{ItemClass, ItemId, MaterialSlot, WeaponClass},
    sampler::UniformSampler,
    table::ChanceTable,
    tiered::TieredSelector,
};

/// Weapon sub-kinds of one weight class, tagged by structural class.
pub type WeaponGroup = CategoryGroup<ItemId, ItemClass>;

const BUILTIN: &str = include_str!("../data/treasure.toml");

#[derive(Debug, Clone)]
pub struct TreasureRegistry {
    weapons: IndexMap<WeaponClass, TieredSelector<WeaponGroup>>,
    materials: IndexMap<MaterialSlot, Arc<ChanceTable<ItemId>>>,
    spell_rarity: Option<TieredSelector<ChanceTable<ItemId>>>,
    classifier: ReverseClassifier<ItemId, ItemClass>,
}

impl TreasureRegistry {
    /// Registry over the bundled treasure data.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::from_config(&TreasureConfig::from_toml_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(&TreasureConfig::from_path(path)?)
    }

    /// Validate and assemble every axis.
    ///
    /// # Errors
    /// Any malformed table, group or tier mapping, a reference to an unknown
    /// table or group, an axis configured twice, and an identifier claimed by
    /// two classes when duplicates are rejected.
    pub fn from_config(config: &TreasureConfig) -> Result<Self, ConfigError> {
        let mut tables = HashMap::with_capacity(config.tables.len());
        for (name, table) in &config.tables {
            let built = ChanceTable::from_pairs(table.entries.iter().map(|e| (e.id, e.weight)))
                .map_err(|e| e.in_axis(format!("table `{name}`")))?;
            tables.insert(name.as_str(), Arc::new(built));
        }
        let table = |name: &str| {
            tables
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownTable(name.to_owned()))
        };

        let mut groups = HashMap::with_capacity(config.groups.len());
        let mut indexed = Vec::new();
        for (name, group) in &config.groups {
            let members = group
                .members
                .iter()
                .map(|m| Ok((table(m.table.as_str())?, m.class)))
                .collect::<Result<Vec<_>, ConfigError>>()
                .and_then(WeaponGroup::new)
                .map_err(|e| e.in_axis(format!("group `{name}`")))?;
            let members = Arc::new(members);
            if group.indexed {
                indexed.push(Arc::clone(&members));
            }
            groups.insert(name.as_str(), members);
        }
        let group = |name: &str| {
            groups
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownGroup(name.to_owned()))
        };

        let mut weapons = IndexMap::with_capacity(config.weapons.len());
        for axis in &config.weapons {
            let label = format!("weapons.{}", axis.class);
            if weapons.contains_key(&axis.class) {
                return Err(ConfigError::DuplicateAxis(label));
            }
            let selector = selector(axis.range(), &axis.bands, &group)
                .map_err(|e| e.in_axis(label))?;
            weapons.insert(axis.class, selector);
        }
        let mut materials = IndexMap::with_capacity(config.materials.len());
        for m in &config.materials {
            let label = format!("materials.{}", m.slot);
            if materials.contains_key(&m.slot) {
                return Err(ConfigError::DuplicateAxis(label));
            }
            materials.insert(m.slot, table(m.table.as_str()).map_err(|e| e.in_axis(label))?);
        }

        let spell_rarity = config
            .spell_rarity
            .as_ref()
            .map(|t| selector(t.range(), &t.bands, &table))
            .transpose()
            .map_err(|e| e.in_axis("spell_rarity"))?;

        let classifier =
            ReverseClassifier::build(indexed.iter().map(Arc::as_ref), config.duplicates).map_err(
                |Conflict { id, kept, dropped }| ConfigError::ConflictingClass {
                    id,
                    first: kept,
                    second: dropped,
                },
            )?;

        tracing::info!(
            tables = tables.len(),
            groups = groups.len(),
            weapon_classes = weapons.len(),
            material_slots = materials.len(),
            spell_rarity = spell_rarity.is_some(),
            classified = classifier.len(),
            "treasure registry ready"
        );

        Ok(Self {
            weapons,
            materials,
            spell_rarity,
            classifier,
        })
    }

    /// Roll a weapon of `class` at `tier`: a uniformly chosen sub-kind, then a
    /// weighted pick inside it.
    pub fn roll_weapon<R: Rng + ?Sized>(
        &self,
        class: WeaponClass,
        tier: u32,
        rng: &mut R,
    ) -> Result<(ItemId, ItemClass), RollError> {
        let selector = self.weapon_selector(class)?;
        let (id, tag) = selector
            .source(tier)
            .inspect_err(|err| tracing::debug!(%class, tier, "weapon roll rejected: {err}"))?
            .sample(rng);
        tracing::trace!(%class, tier, %id, %tag, "rolled weapon");
        Ok((*id, tag))
    }

    /// Roll a weapon of any weight class supporting `tier`, each such class
    /// equally likely.
    ///
    /// Fails without consuming randomness if no class supports `tier`.
    pub fn roll_any_weapon<R: Rng + ?Sized>(
        &self,
        tier: u32,
        rng: &mut R,
    ) -> Result<(WeaponClass, ItemId, ItemClass), RollError> {
        let supported: Vec<WeaponClass> = self
            .weapons
            .iter()
            .filter(|(_, selector)| selector.tiers().contains(&tier))
            .map(|(&class, _)| class)
            .collect();
        let Ok(picker) = UniformSampler::new(supported.len()) else {
            return Err(self.no_weapon_for(tier));
        };
        let class = supported[picker.sample_index(rng)];
        let (id, tag) = self.roll_weapon(class, tier, rng)?;
        Ok((class, id, tag))
    }

    fn no_weapon_for(&self, tier: u32) -> RollError {
        let bounds = self
            .weapons
            .values()
            .map(|selector| selector.tiers())
            .map(|tiers| (*tiers.start(), *tiers.end()))
            .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)));
        match bounds {
            Some((min, max)) => {
                tracing::debug!(tier, "no weight class supports tier");
                RollError::TierOutOfRange { tier, min, max }
            }
            None => RollError::Unconfigured {
                axis: "weapons".to_owned(),
            },
        }
    }

    pub fn roll_material<R: Rng + ?Sized>(
        &self,
        slot: MaterialSlot,
        rng: &mut R,
    ) -> Result<ItemId, RollError> {
        self.materials
            .get(&slot)
            .map(|table| *table.sample(rng))
            .ok_or_else(|| RollError::Unconfigured {
                axis: format!("materials.{slot}"),
            })
    }

    pub fn roll_spell_rarity<R: Rng + ?Sized>(
        &self,
        tier: u32,
        rng: &mut R,
    ) -> Result<ItemId, RollError> {
        let selector = self
            .spell_rarity
            .as_ref()
            .ok_or_else(|| RollError::Unconfigured {
                axis: "spell_rarity".to_owned(),
            })?;
        selector
            .roll(tier, rng)
            .inspect_err(|err| tracing::debug!(tier, "spell rarity roll rejected: {err}"))
    }

    /// Structural class of an item produced by any indexed group.
    pub fn classify(&self, id: ItemId) -> Result<ItemClass, LookupError> {
        self.classifier
            .classify(&id)
            .ok_or(LookupError::NotFound(id))
    }

    /// Like [`classify`](Self::classify), falling back to `default` for
    /// unknown items.
    pub fn classify_or(&self, id: ItemId, default: ItemClass) -> ItemClass {
        self.classifier.classify(&id).unwrap_or(default)
    }

    pub fn classify_many<I>(&self, ids: I) -> Vec<Result<ItemClass, LookupError>>
    where
        I: IntoIterator<Item = ItemId>,
    {
        ids.into_iter().map(|id| self.classify(id)).collect()
    }

    pub fn weapon_selector(
        &self,
        class: WeaponClass,
    ) -> Result<&TieredSelector<WeaponGroup>, RollError> {
        self.weapons
            .get(&class)
            .ok_or_else(|| RollError::Unconfigured {
                axis: format!("weapons.{class}"),
            })
    }

    pub fn spell_rarity_selector(&self) -> Option<&TieredSelector<ChanceTable<ItemId>>> {
        self.spell_rarity.as_ref()
    }

    pub fn material_table(&self, slot: MaterialSlot) -> Option<&ChanceTable<ItemId>> {
        self.materials.get(&slot).map(Arc::as_ref)
    }

    /// Configured weight classes, in configuration order.
    pub fn weapon_classes(&self) -> impl ExactSizeIterator<Item = WeaponClass> + '_ {
        self.weapons.keys().copied()
    }

    /// Configured material slots, in configuration order.
    pub fn material_slots(&self) -> impl ExactSizeIterator<Item = MaterialSlot> + '_ {
        self.materials.keys().copied()
    }

    pub fn classifier(&self) -> &ReverseClassifier<ItemId, ItemClass> {
        &self.classifier
    }
}

/// Resolve named bands into a [`TieredSelector`].
fn selector<S, F>(
    range: std::ops::RangeInclusive<u32>,
    bands: &[BandConfig],
    lookup: F,
) -> Result<TieredSelector<S>, ConfigError>
where
    F: Fn(&str) -> Result<Arc<S>, ConfigError>,
{
    let bands = bands
        .iter()
        .map(|b| Ok((b.tiers(), lookup(b.source.as_str())?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    TieredSelector::new(range, bands)
}
