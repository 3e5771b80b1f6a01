use crate::config::{PackStrategy, PackerConfig};
use crate::error::Result;
use crate::model::{PackReport, PackableItem, group_bounds};
use crate::packer::{
    Packer, fit::fit_to_container, radial::RadialScanPacker, relaxation::RelaxationPacker,
};
use crate::validation::overlapping_pairs;
use tracing::{debug, instrument};

/// Places circles and rectangles inside a fixed container without overlap.
///
/// The engine holds only its configuration; every [`pack`](Self::pack) call is
/// independent and deterministic.
#[derive(Debug, Clone)]
pub struct PackingEngine {
    cfg: PackerConfig,
}

impl PackingEngine {
    /// Validates `cfg` and builds an engine.
    pub fn new(cfg: PackerConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Engine with default tuning for a `width` x `height` container.
    pub fn with_container(width: f64, height: f64) -> Result<Self> {
        Self::new(
            PackerConfig::builder()
                .with_container(width, height)
                .build(),
        )
    }

    pub fn config(&self) -> &PackerConfig {
        &self.cfg
    }

    #[instrument(skip_all, fields(items = items.len(), strategy = ?self.cfg.strategy))]
    /// Positions `items` in place and returns what was done.
    ///
    /// Notes:
    /// - Order is preserved; by convention the largest item comes first and ends up in the middle.
    /// - Sizes only change when the pile has to shrink to fit; all items then scale by the same factor.
    /// - Never fails. Overlap can remain when the relaxation budget runs out; see `PackReport::residual_overlaps`.
    pub fn pack(&self, items: &mut [PackableItem]) -> PackReport {
        if items.is_empty() {
            return PackReport::empty(self.resolved_strategy());
        }

        match self.cfg.strategy {
            PackStrategy::Relaxation | PackStrategy::Radial => {
                self.pack_with(self.cfg.strategy, items)
            }
            PackStrategy::Auto => self.pack_auto(items),
        }
    }

    fn resolved_strategy(&self) -> PackStrategy {
        match self.cfg.strategy {
            PackStrategy::Auto => PackStrategy::Relaxation,
            s => s,
        }
    }

    fn pack_with(&self, strategy: PackStrategy, items: &mut [PackableItem]) -> PackReport {
        let arrangement = match strategy {
            PackStrategy::Radial => RadialScanPacker::new(self.cfg.clone()).arrange(items),
            _ => RelaxationPacker::new(self.cfg.clone()).arrange(items),
        };
        let scale_factor = fit_to_container(items, &self.cfg);
        let residual_overlaps = overlapping_pairs(items, 0.0).len();
        let report = PackReport {
            strategy,
            iterations: arrangement.iterations,
            converged: arrangement.converged,
            separation_passes: arrangement.separation_passes,
            scale_factor,
            residual_overlaps,
            bounds: group_bounds(items),
        };
        debug!(
            ?strategy,
            scale_factor,
            residual_overlaps,
            converged = report.converged,
            "pack finished"
        );
        report
    }

    /// Runs every concrete strategy on a copy and keeps the best result:
    /// fewest residual overlaps, then largest scale factor, then smallest pile.
    fn pack_auto(&self, items: &mut [PackableItem]) -> PackReport {
        let mut best: Option<(Vec<PackableItem>, PackReport)> = None;
        for strategy in [PackStrategy::Relaxation, PackStrategy::Radial] {
            let mut candidate = items.to_vec();
            let report = self.pack_with(strategy, &mut candidate);
            let better = match &best {
                None => true,
                Some((_, b)) => is_better(&report, b),
            };
            if better {
                best = Some((candidate, report));
            }
        }
        match best {
            Some((arranged, report)) => {
                items.copy_from_slice(&arranged);
                report
            }
            None => PackReport::empty(PackStrategy::Relaxation),
        }
    }
}

fn is_better(a: &PackReport, b: &PackReport) -> bool {
    if a.residual_overlaps != b.residual_overlaps {
        return a.residual_overlaps < b.residual_overlaps;
    }
    if a.scale_factor != b.scale_factor {
        return a.scale_factor > b.scale_factor;
    }
    let area = |r: &PackReport| r.bounds.map(|bb| bb.area()).unwrap_or(f64::INFINITY);
    area(a) < area(b)
}
