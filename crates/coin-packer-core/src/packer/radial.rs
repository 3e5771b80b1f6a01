use super::{Arrangement, Packer};
use crate::config::PackerConfig;
use crate::model::{PackableItem, overlaps};
use tracing::debug;

/// Greedy placement: each item takes the collision-free point closest to the
/// centre among rays every `scan_angle_step_deg` degrees, sampled every
/// `scan_radial_step` units out to `scan_max_distance`.
///
/// Cheap and predictable, but leaves gaps that relaxation would close.
pub struct RadialScanPacker {
    config: PackerConfig,
}

#[derive(Clone, Copy)]
struct Candidate {
    distance: f64,
    x: f64,
    y: f64,
}

impl RadialScanPacker {
    pub fn new(config: PackerConfig) -> Self {
        Self { config }
    }

    fn find_spot(&self, placed: &[PackableItem], item: &PackableItem) -> Option<Candidate> {
        let cfg = &self.config;
        let (cx, cy) = cfg.center();
        let mut best: Option<Candidate> = None;

        let mut angle_deg = 0.0f64;
        while angle_deg < 360.0 {
            let (sin, cos) = angle_deg.to_radians().sin_cos();
            let mut distance = cfg.scan_radial_step * 2.0;
            while distance < cfg.scan_max_distance {
                // Nearer points on a later ray cannot beat what we already have.
                if best.is_some_and(|b| distance >= b.distance) {
                    break;
                }
                let candidate = PackableItem {
                    shape: item.shape,
                    x: cx + distance * cos,
                    y: cy + distance * sin,
                };
                if placed.iter().all(|p| !overlaps(&candidate, p, cfg.padding)) {
                    best = Some(Candidate {
                        distance,
                        x: candidate.x,
                        y: candidate.y,
                    });
                    break;
                }
                distance += cfg.scan_radial_step;
            }
            angle_deg += cfg.scan_angle_step_deg;
        }
        best
    }

    /// Farthest sampled point on the 0° ray.
    fn fallback_spot(&self) -> (f64, f64) {
        let cfg = &self.config;
        let (cx, cy) = cfg.center();
        let rings = ((cfg.scan_max_distance / cfg.scan_radial_step).ceil() as usize).max(3) - 1;
        (cx + rings as f64 * cfg.scan_radial_step, cy)
    }
}

impl Packer for RadialScanPacker {
    fn arrange(&self, items: &mut [PackableItem]) -> Arrangement {
        let (cx, cy) = self.config.center();
        let mut all_placed = true;
        if let Some(first) = items.first_mut() {
            first.x = cx;
            first.y = cy;
        }

        for i in 1..items.len() {
            let (placed, rest) = items.split_at_mut(i);
            let item = &mut rest[0];
            match self.find_spot(placed, item) {
                Some(spot) => {
                    item.x = spot.x;
                    item.y = spot.y;
                }
                None => {
                    let (x, y) = self.fallback_spot();
                    debug!(index = i, x, y, "no free spot found; using fallback");
                    item.x = x;
                    item.y = y;
                    all_placed = false;
                }
            }
        }

        let iterations = items.len().saturating_sub(1);
        debug!(items = items.len(), all_placed, "radial scan finished");
        Arrangement {
            iterations,
            converged: all_placed,
            separation_passes: 0,
        }
    }
}
