//! Identifier and tag types shared by every axis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key for a producible item kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(raw: u32) -> Self {
        ItemId(raw)
    }
}

/// Structural bucket an item belongs to, as seen by stat and assessment logic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    Axe,
    Dagger,
    DaggerMultiStrike,
    Mace,
    MaceJitte,
    Spear,
    Staff,
    Sword,
    SwordMultiStrike,
    Unarmed,
    TwoHandedAxe,
    TwoHandedMace,
    TwoHandedSpear,
    TwoHandedSword,
    Bow,
    Crossbow,
    Atlatl,
    Caster,
}

impl ItemClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemClass::Axe => "axe",
            ItemClass::Dagger => "dagger",
            ItemClass::DaggerMultiStrike => "dagger_multi_strike",
            ItemClass::Mace => "mace",
            ItemClass::MaceJitte => "mace_jitte",
            ItemClass::Spear => "spear",
            ItemClass::Staff => "staff",
            ItemClass::Sword => "sword",
            ItemClass::SwordMultiStrike => "sword_multi_strike",
            ItemClass::Unarmed => "unarmed",
            ItemClass::TwoHandedAxe => "two_handed_axe",
            ItemClass::TwoHandedMace => "two_handed_mace",
            ItemClass::TwoHandedSpear => "two_handed_spear",
            ItemClass::TwoHandedSword => "two_handed_sword",
            ItemClass::Bow => "bow",
            ItemClass::Crossbow => "crossbow",
            ItemClass::Atlatl => "atlatl",
            ItemClass::Caster => "caster",
        }
    }

    /// Weapons that strike more than once per swing.
    pub const fn is_multi_strike(self) -> bool {
        matches!(
            self,
            ItemClass::DaggerMultiStrike | ItemClass::SwordMultiStrike
        )
    }

    pub const fn is_missile(self) -> bool {
        matches!(self, ItemClass::Bow | ItemClass::Crossbow | ItemClass::Atlatl)
    }

    pub const fn is_two_handed(self) -> bool {
        matches!(
            self,
            ItemClass::TwoHandedAxe
                | ItemClass::TwoHandedMace
                | ItemClass::TwoHandedSpear
                | ItemClass::TwoHandedSword
        )
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weapon weight class: the first key of a weapon roll.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    Heavy,
    Light,
    Finesse,
    TwoHanded,
    Missile,
    Caster,
}

impl WeaponClass {
    pub const ALL: [WeaponClass; 6] = [
        WeaponClass::Heavy,
        WeaponClass::Light,
        WeaponClass::Finesse,
        WeaponClass::TwoHanded,
        WeaponClass::Missile,
        WeaponClass::Caster,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WeaponClass::Heavy => "heavy",
            WeaponClass::Light => "light",
            WeaponClass::Finesse => "finesse",
            WeaponClass::TwoHanded => "two_handed",
            WeaponClass::Missile => "missile",
            WeaponClass::Caster => "caster",
        }
    }
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item slot a material table applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialSlot {
    Armor,
    Clothing,
    Jewelry,
    MeleeWeapon,
    MissileWeapon,
    Caster,
}

impl MaterialSlot {
    pub const fn as_str(self) -> &'static str {
        match self {
            MaterialSlot::Armor => "armor",
            MaterialSlot::Clothing => "clothing",
            MaterialSlot::Jewelry => "jewelry",
            MaterialSlot::MeleeWeapon => "melee_weapon",
            MaterialSlot::MissileWeapon => "missile_weapon",
            MaterialSlot::Caster => "caster",
        }
    }
}

impl fmt::Display for MaterialSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_match_config_spelling() {
        let parsed: ItemClass = toml::Value::String("sword_multi_strike".into())
            .try_into()
            .unwrap();
        assert_eq!(parsed, ItemClass::SwordMultiStrike);
        assert_eq!(parsed.as_str(), "sword_multi_strike");
        assert!(parsed.is_multi_strike());
        assert!(!parsed.is_missile());
    }

    #[test]
    fn item_ids_display_with_hash() {
        assert_eq!(ItemId(30310).to_string(), "#30310");
    }
}
