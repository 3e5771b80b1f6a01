use super::{Arrangement, Packer};
use crate::config::PackerConfig;
use crate::model::{PackableItem, push_vector};
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Extra gap left between two items when the separation sweep splits them,
/// so the pair also tests clear under floating-point rounding.
pub const SEPARATION_CLEARANCE: f64 = 1e-3;

/// Spiral seeding followed by force-directed relaxation.
///
/// Every pass moves each item by the sum of the pushes that would resolve its
/// pairwise overlaps plus a weak pull towards the centre, clamped to a step
/// ceiling that shrinks geometrically from pass to pass.
pub struct RelaxationPacker {
    config: PackerConfig,
    center: (f64, f64),
}

impl RelaxationPacker {
    pub fn new(config: PackerConfig) -> Self {
        let center = config.center();
        Self { config, center }
    }

    /// First item on the centre, the rest on an outward Archimedean spiral.
    pub fn seed_spiral(&self, items: &mut [PackableItem]) {
        let n = items.len();
        let (cx, cy) = self.center;
        let Some(first) = items.first_mut() else {
            return;
        };
        first.x = cx;
        first.y = cy;
        if n == 1 {
            return;
        }

        // 0.75 tightens the spiral so items wind more than once around the centre
        let angle_step = 2.0 * PI / (n as f64 * 0.75);
        let radius_step =
            self.config.container_width.min(self.config.container_height) / (n as f64 * 2.0);
        for (i, item) in items.iter_mut().enumerate().skip(1) {
            let angle = i as f64 * angle_step;
            let radius = i as f64 * radius_step;
            item.x = cx + radius * angle.cos();
            item.y = cy + radius * angle.sin();
        }
    }

    /// Runs the clamped relaxation. Returns `(passes, converged)`.
    pub fn relax(&self, items: &mut [PackableItem]) -> (usize, bool) {
        let cfg = &self.config;
        let (cx, cy) = self.center;
        let n = items.len();
        let mut step = cfg.step_size;

        for iteration in 0..cfg.max_iterations {
            let mut total_movement = 0.0;

            for i in 0..n {
                let a = items[i];
                let (mut dx, mut dy) = (0.0, 0.0);
                for (j, b) in items.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let (px, py) = push_vector(&a, b, cfg.padding, tie(i, j));
                    dx += px;
                    dy += py;
                }

                dx += (cx - a.x) * cfg.gravity_factor;
                dy += (cy - a.y) * cfg.gravity_factor;

                let magnitude = dx.hypot(dy);
                if magnitude > 0.0 {
                    let limited = magnitude.min(step);
                    let factor = limited / magnitude;
                    items[i].translate(dx * factor, dy * factor);
                    total_movement += limited;
                }
            }

            step *= cfg.decay;
            trace!(iteration, total_movement, step, "relaxation pass");

            if total_movement < cfg.convergence_threshold {
                return (iteration + 1, true);
            }
        }
        (cfg.max_iterations, false)
    }

    /// Splits every penetrating pair symmetrically until a sweep moves nothing.
    /// Returns the number of sweeps that moved something.
    pub fn separate(&self, items: &mut [PackableItem]) -> usize {
        let n = items.len();
        for pass in 0..self.config.separation_passes {
            let mut moved = false;
            for i in 0..n {
                for j in (i + 1)..n {
                    let (px, py) = push_vector(&items[i], &items[j], self.config.padding, -1.0);
                    let magnitude = px.hypot(py);
                    if magnitude == 0.0 {
                        continue;
                    }
                    let half = 0.5 * (magnitude + SEPARATION_CLEARANCE) / magnitude;
                    items[i].translate(px * half, py * half);
                    items[j].translate(-px * half, -py * half);
                    moved = true;
                }
            }
            if !moved {
                return pass;
            }
        }
        self.config.separation_passes
    }
}

/// Lower index goes negative when two centres coincide on the push axis.
#[inline]
fn tie(i: usize, j: usize) -> f64 {
    if i < j { -1.0 } else { 1.0 }
}

impl Packer for RelaxationPacker {
    fn arrange(&self, items: &mut [PackableItem]) -> Arrangement {
        self.seed_spiral(items);
        let (iterations, converged) = self.relax(items);
        let separation_passes = self.separate(items);
        debug!(
            items = items.len(),
            iterations, converged, separation_passes, "relaxation finished"
        );
        Arrangement {
            iterations,
            converged,
            separation_passes,
        }
    }
}
