//! Core library for packing coins and bills into compact piles.
//!
//! - Engine: spiral seeding, force-directed relaxation, separation sweep and fit-to-container rescale
//! - Strategies: Relaxation (default), RadialScan (greedy ray scan), Auto (best of both)
//! - Pipeline: `pack_layout` takes keyed shapes and returns placements + metadata
//! - Data model is serde-serializable; JSON exporters are provided here, templates in the CLI crate.
//!
//! Quick example:
//! ```
//! use coin_packer_core::{PackableItem, PackingEngine};
//! # fn main() -> coin_packer_core::Result<()> {
//! let engine = PackingEngine::with_container(300.0, 300.0)?;
//! let mut items = vec![
//!     PackableItem::rectangle(100.0, 40.0),
//!     PackableItem::circle(20.0),
//!     PackableItem::circle(15.0),
//! ];
//! let report = engine.pack(&mut items);
//! println!("scale: {}, overlaps: {}", report.scale_factor, report.residual_overlaps);
//! # Ok(()) }
//! ```

pub mod config;
pub mod denomination;
pub mod engine;
pub mod error;
pub mod export;
pub mod geometry;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod validation;

pub use config::*;
pub use denomination::*;
pub use engine::*;
pub use error::*;
pub use export::*;
pub use geometry::Bounds;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `coin_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackStrategy, PackerConfig, PackerConfigBuilder, SortOrder};
    pub use crate::denomination::{Denomination, coin_items, format_amount, total_cents};
    pub use crate::engine::PackingEngine;
    pub use crate::geometry::Bounds;
    pub use crate::model::{
        Layout, LayoutStats, Meta, PackReport, PackableItem, Placement, Shape,
    };
    pub use crate::pipeline::LayoutItem;
    pub use crate::validation::{out_of_bounds, overlapping_pairs};
    pub use crate::{pack_layout, pack_piles, render_json, to_json_array, to_json_hash};
}
