use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use treasure_tables::{ChanceTable, RollError, TieredSelector};

const COMMON_A: &str = "longsword";
const COMMON_B: &str = "broadsword";
const RARE_A: &str = "flaming longsword";
const RARE_B: &str = "frost broadsword";

fn table(pairs: [(&'static str, f64); 4]) -> Arc<ChanceTable<&'static str>> {
    Arc::new(ChanceTable::from_pairs(pairs).unwrap())
}

/// Tiers 1-4 plain, tier 5 adds two rares at 6%, tiers 6-8 raise them to 14%.
fn selector() -> TieredSelector<ChanceTable<&'static str>> {
    let x = table([(COMMON_A, 0.5), (COMMON_B, 0.5), (RARE_A, 0.0), (RARE_B, 0.0)]);
    let y = table([(COMMON_A, 0.47), (COMMON_B, 0.47), (RARE_A, 0.03), (RARE_B, 0.03)]);
    let z = table([(COMMON_A, 0.43), (COMMON_B, 0.43), (RARE_A, 0.07), (RARE_B, 0.07)]);
    TieredSelector::new(1..=8, [(1..=4, x), (5..=5, y), (6..=8, z)]).unwrap()
}

fn rare_share(sel: &TieredSelector<ChanceTable<&'static str>>, tier: u32, seed: u64) -> f64 {
    const ROLLS: usize = 10_000;
    let mut rng = StdRng::seed_from_u64(seed);
    let rares = (0..ROLLS)
        .map(|_| sel.roll(tier, &mut rng).unwrap())
        .filter(|item| *item == RARE_A || *item == RARE_B)
        .count();
    rares as f64 / ROLLS as f64
}

#[test]
fn rares_never_appear_below_tier_five() {
    let sel = selector();
    for tier in 1..=4 {
        assert_eq!(rare_share(&sel, tier, tier as u64), 0.0, "tier {tier}");
    }
}

#[test]
fn tier_five_rolls_rares_about_six_percent() {
    let share = rare_share(&selector(), 5, 55);
    assert!((share - 0.06).abs() < 0.01, "share={share}");
}

#[test]
fn top_tiers_roll_rares_about_fourteen_percent() {
    let sel = selector();
    for tier in 6..=8 {
        let share = rare_share(&sel, tier, 600 + tier as u64);
        assert!((share - 0.14).abs() < 0.015, "tier {tier} share={share}");
    }
}

#[test]
fn tiers_outside_the_range_fail_cleanly() {
    let sel = selector();
    let mut rng = StdRng::seed_from_u64(1);
    for tier in [0, 9, u32::MAX] {
        assert_eq!(
            sel.roll(tier, &mut rng),
            Err(RollError::TierOutOfRange { tier, min: 1, max: 8 })
        );
    }
}

#[test]
fn shared_tiers_share_one_table() {
    let sel = selector();
    let first = sel.source(1).unwrap();
    for tier in 2..=4 {
        assert!(std::ptr::eq(first, sel.source(tier).unwrap()));
    }
    assert_eq!(sel.distinct_sources().count(), 3);
    let p = sel.source(7).unwrap().probability(&RARE_A);
    assert!((p - 0.07).abs() < 1e-9, "p={p}");
}
