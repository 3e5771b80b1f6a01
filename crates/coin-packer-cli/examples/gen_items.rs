//! Writes random item files for `coin-packer pack`.
//!
//! cargo run -p coin-packer-cli --example gen_items -- out_items 12 7
//! (directory, number of files, seed)

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

const VALUES: [u32; 6] = [1, 5, 10, 25, 50, 100];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| "items".into()));
    let files: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(8);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);

    fs::create_dir_all(&dir)?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    for f in 0..files {
        let n = rng.gen_range(1..=10);
        let mut items = Vec::with_capacity(n);
        for i in 0..n {
            // every third pile mixes in free-form shapes
            if f % 3 == 2 && rng.gen_bool(0.3) {
                items.push(json!({
                    "key": format!("token_{}", i),
                    "shape": "circle",
                    "radius": rng.gen_range(8.0..30.0f64).round(),
                }));
            } else if let Some(v) = VALUES.choose(&mut rng) {
                items.push(json!({ "denomination": v }));
            }
        }
        let path = dir.join(format!("pile_{:02}.json", f));
        fs::write(&path, serde_json::to_string_pretty(&json!({ "items": items }))?)?;
        println!("wrote {} ({} items)", path.display(), items.len());
    }
    Ok(())
}
