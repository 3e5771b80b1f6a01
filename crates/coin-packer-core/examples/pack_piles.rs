//! Packs a handful of random coin piles and prints a one-line summary for each.
//!
//! cargo run -p coin-packer-core --example pack_piles --features parallel

use coin_packer_core::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn main() -> coin_packer_core::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let piles: Vec<Vec<LayoutItem<String>>> = (0..8)
        .map(|_| {
            let n = rng.gen_range(1..=9);
            let values: Vec<Denomination> = (0..n)
                .map(|_| Denomination::ALL[rng.gen_range(0..Denomination::ALL.len())])
                .collect();
            coin_items(&values)
        })
        .collect();

    let cfg = PackerConfig::builder()
        .with_container(320.0, 240.0)
        .parallel(true)
        .build();
    let layouts = pack_piles(piles, cfg)?;

    for (i, layout) in layouts.iter().enumerate() {
        println!("pile {}: {}", i, layout.stats().summary());
    }
    Ok(())
}
