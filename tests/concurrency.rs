use std::sync::Arc;
use std::thread;

use rand::Rng;
use treasure_tables::{TreasureRegistry, WeaponClass, rng::worker_rng};

const WORKERS: u64 = 16;
const ROLLS: usize = 2_000;

fn roll_batch(reg: &TreasureRegistry, worker: u64) -> Vec<u32> {
    let mut rng = worker_rng(0x10_07, worker);
    (0..ROLLS)
        .map(|_| {
            let tier = rng.random_range(1..=8);
            let class = WeaponClass::ALL[rng.random_range(0..WeaponClass::ALL.len())];
            let (id, tag) = reg.roll_weapon(class, tier, &mut rng).unwrap();
            assert_eq!(reg.classify(id), Ok(tag));
            id.0
        })
        .collect()
}

#[test]
fn concurrent_rolls_match_sequential_rolls() {
    let reg = TreasureRegistry::builtin().unwrap();

    let sequential: Vec<Vec<u32>> = (0..WORKERS).map(|w| roll_batch(&reg, w)).collect();

    let concurrent: Vec<Vec<u32>> = thread::scope(|s| {
        let handles: Vec<_> = (0..WORKERS)
            .map(|w| {
                let reg = &reg;
                s.spawn(move || roll_batch(reg, w))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn registry_can_be_shared_through_arc() {
    let reg = Arc::new(TreasureRegistry::builtin().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                let mut rng = rand::rng();
                for tier in 1..=8 {
                    reg.roll_any_weapon(tier, &mut rng).unwrap();
                    reg.roll_spell_rarity(tier, &mut rng).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
