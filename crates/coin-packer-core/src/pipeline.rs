use crate::config::{PackerConfig, SortOrder};
use crate::engine::PackingEngine;
use crate::error::{CoinPackerError, Result};
use crate::model::{Layout, Meta, PackReport, PackableItem, Placement, Shape};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Keyed item to pack (e.g. a coin id and its shape).
#[derive(Debug, Clone)]
pub struct LayoutItem<K = String> {
    pub key: K,
    pub shape: Shape,
}

impl<K> LayoutItem<K> {
    pub fn new(key: K, shape: Shape) -> Self {
        Self { key, shape }
    }
}

#[instrument(skip_all, fields(items = items.len()))]
/// Packs keyed items into a single pile and returns placements, metadata and the engine report.
///
/// Notes:
/// - Items are ordered by `cfg.sort_order` before packing; the sort is stable and ties fall back to the key.
/// - Placements come back in packing order.
/// - An empty input yields an empty layout.
pub fn pack_layout<K: Into<String>>(items: Vec<LayoutItem<K>>, cfg: PackerConfig) -> Result<Layout<String>> {
    let engine = PackingEngine::new(cfg)?;
    pack_with_engine(items, &engine)
}

/// Packs several independent piles with the same configuration.
///
/// With the `parallel` feature and `cfg.parallel`, piles are packed on the rayon pool.
/// Each pile is still packed sequentially; results keep the input order.
pub fn pack_piles<K: Into<String> + Send>(
    piles: Vec<Vec<LayoutItem<K>>>,
    cfg: PackerConfig,
) -> Result<Vec<Layout<String>>> {
    let engine = PackingEngine::new(cfg)?;

    #[cfg(feature = "parallel")]
    {
        if engine.config().parallel {
            return piles
                .into_par_iter()
                .map(|pile| pack_with_engine(pile, &engine))
                .collect();
        }
    }

    piles
        .into_iter()
        .map(|pile| pack_with_engine(pile, &engine))
        .collect()
}

fn pack_with_engine<K: Into<String>>(
    items: Vec<LayoutItem<K>>,
    engine: &PackingEngine,
) -> Result<Layout<String>> {
    let cfg = engine.config();
    let mut prepared: Vec<(String, Shape)> = Vec::with_capacity(items.len());
    for (index, it) in items.into_iter().enumerate() {
        if !it.shape.is_valid() {
            return Err(CoinPackerError::InvalidItem {
                index,
                reason: format!("dimensions must be finite and positive: {:?}", it.shape),
            });
        }
        prepared.push((it.key.into(), it.shape));
    }
    sort_prepared(&mut prepared, cfg.sort_order);

    let mut engine_items: Vec<PackableItem> = prepared
        .iter()
        .map(|(_, shape)| PackableItem::new(*shape))
        .collect();
    let report = engine.pack(&mut engine_items);
    debug!(
        items = engine_items.len(),
        scale = report.scale_factor,
        "layout packed"
    );

    let placements = prepared
        .into_iter()
        .zip(engine_items)
        .map(|((key, _), item)| Placement {
            key,
            shape: item.shape,
            x: item.x,
            y: item.y,
        })
        .collect();

    Ok(Layout {
        placements,
        meta: build_meta(cfg, &report),
        report,
    })
}

fn sort_prepared(prepared: &mut [(String, Shape)], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::KeyAsc => prepared.sort_by(|a, b| a.0.cmp(&b.0)),
        SortOrder::SizeDesc => prepared.sort_by(|a, b| {
            b.1.extent()
                .total_cmp(&a.1.extent())
                .then_with(|| a.0.cmp(&b.0))
        }),
        SortOrder::AreaDesc => prepared.sort_by(|a, b| {
            b.1.area()
                .total_cmp(&a.1.area())
                .then_with(|| a.0.cmp(&b.0))
        }),
    }
}

fn build_meta(cfg: &PackerConfig, report: &PackReport) -> Meta {
    Meta {
        schema_version: "1".into(),
        app: "coin-packer".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        container: (cfg.container_width, cfg.container_height),
        padding: cfg.padding,
        strategy: report.strategy,
    }
}
