use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Packing strategies and engine configuration.
/// Key notes:
///   - `strategy` selects Relaxation/RadialScan/Auto
///   - `separation_passes` removes the residual penetration the gravity term leaves behind; 0 disables it
///   - `sort_order` only affects the keyed pipeline; `PackingEngine::pack` keeps the caller's order
///     Top-level strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackStrategy {
    /// Spiral seeding + force-directed relaxation (compact, best default).
    Relaxation,
    /// Greedy ray scan around the centre; each item takes the closest free spot.
    #[serde(alias = "radialscan", alias = "radial_scan")]
    Radial,
    /// Run both on copies and keep the better arrangement.
    Auto,
}

impl FromStr for PackStrategy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relaxation" | "relax" => Ok(Self::Relaxation),
            "radial" | "radialscan" | "radial_scan" | "scan" => Ok(Self::Radial),
            "auto" => Ok(Self::Auto),
            _ => Err(()),
        }
    }
}

/// Packing orders for the keyed pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Longest bounding-box side first (largest coin in the middle).
    SizeDesc,
    AreaDesc,
    KeyAsc,
    None,
}

impl FromStr for SortOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "size_desc" => Ok(Self::SizeDesc),
            "area_desc" => Ok(Self::AreaDesc),
            "key_asc" => Ok(Self::KeyAsc),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Container width in layout units.
    pub container_width: f64,
    /// Container height in layout units.
    pub container_height: f64,
    /// Minimum gap kept between two circles.
    pub padding: f64,

    // relaxation tuning
    /// Upper bound on relaxation passes.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Initial per-pass displacement ceiling.
    #[serde(default = "default_step_size")]
    pub step_size: f64,
    /// Multiplier applied to the ceiling after every pass.
    #[serde(default = "default_decay")]
    pub decay: f64,
    /// Pull towards the container centre, as a fraction of the offset.
    #[serde(default = "default_gravity_factor")]
    pub gravity_factor: f64,
    /// Stop early once the total displacement of a pass drops below this.
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    /// Pure-repulsion sweeps run after relaxation. 0 disables.
    #[serde(default = "default_separation_passes")]
    pub separation_passes: usize,

    /// Outer margin added around the group before deciding on a rescale.
    #[serde(default = "default_bounds_margin")]
    pub bounds_margin: f64,

    // strategy selection
    #[serde(default = "default_strategy")]
    pub strategy: PackStrategy,
    #[serde(default = "default_sort_order")]
    pub sort_order: SortOrder,

    // radial scan tuning
    #[serde(default = "default_scan_angle_step_deg")]
    pub scan_angle_step_deg: f64,
    #[serde(default = "default_scan_radial_step")]
    pub scan_radial_step: f64,
    #[serde(default = "default_scan_max_distance")]
    pub scan_max_distance: f64,

    /// Pack independent piles in parallel when feature "parallel" is on.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            container_width: 300.0,
            container_height: 300.0,
            padding: 2.0,
            max_iterations: default_max_iterations(),
            step_size: default_step_size(),
            decay: default_decay(),
            gravity_factor: default_gravity_factor(),
            convergence_threshold: default_convergence_threshold(),
            separation_passes: default_separation_passes(),
            bounds_margin: default_bounds_margin(),
            strategy: default_strategy(),
            sort_order: default_sort_order(),
            scan_angle_step_deg: default_scan_angle_step_deg(),
            scan_radial_step: default_scan_radial_step(),
            scan_max_distance: default_scan_max_distance(),
            parallel: default_parallel(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Container dimensions are zero, negative or not finite
    /// - The bounds margin would leave no usable space
    /// - Tuning constants are outside their meaningful range
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::CoinPackerError;

        let w = self.container_width;
        let h = self.container_height;
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Err(CoinPackerError::InvalidDimensions {
                width: w,
                height: h,
            });
        }

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "padding must be a non-negative number, got {}",
                self.padding
            )));
        }
        if !self.bounds_margin.is_finite() || self.bounds_margin < 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "bounds_margin must be a non-negative number, got {}",
                self.bounds_margin
            )));
        }
        if self.bounds_margin * 2.0 >= w.min(h) {
            return Err(CoinPackerError::InvalidConfig(format!(
                "bounds_margin ({}) * 2 leaves no usable space in a {}x{} container",
                self.bounds_margin, w, h
            )));
        }

        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "step_size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(CoinPackerError::InvalidConfig(format!(
                "decay must be in (0, 1], got {}",
                self.decay
            )));
        }
        if !self.gravity_factor.is_finite() || self.gravity_factor < 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "gravity_factor must be non-negative, got {}",
                self.gravity_factor
            )));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "convergence_threshold must be non-negative, got {}",
                self.convergence_threshold
            )));
        }

        // Only consulted by the radial scan, but a zero step would never terminate.
        if !(self.scan_angle_step_deg > 0.0 && self.scan_angle_step_deg <= 360.0) {
            return Err(CoinPackerError::InvalidConfig(format!(
                "scan_angle_step_deg must be in (0, 360], got {}",
                self.scan_angle_step_deg
            )));
        }
        if !self.scan_radial_step.is_finite() || self.scan_radial_step <= 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "scan_radial_step must be positive, got {}",
                self.scan_radial_step
            )));
        }
        if !self.scan_max_distance.is_finite() || self.scan_max_distance <= 0.0 {
            return Err(CoinPackerError::InvalidConfig(format!(
                "scan_max_distance must be positive, got {}",
                self.scan_max_distance
            )));
        }

        Ok(())
    }

    /// Centre of the container.
    pub fn center(&self) -> (f64, f64) {
        (self.container_width / 2.0, self.container_height / 2.0)
    }
}

fn default_max_iterations() -> usize {
    150
}
fn default_step_size() -> f64 {
    0.5
}
fn default_decay() -> f64 {
    0.98
}
fn default_gravity_factor() -> f64 {
    0.01
}
fn default_convergence_threshold() -> f64 {
    0.5
}
fn default_separation_passes() -> usize {
    100
}
fn default_bounds_margin() -> f64 {
    10.0
}
fn default_strategy() -> PackStrategy {
    PackStrategy::Relaxation
}
fn default_sort_order() -> SortOrder {
    SortOrder::SizeDesc
}
fn default_scan_angle_step_deg() -> f64 {
    10.0
}
fn default_scan_radial_step() -> f64 {
    10.0
}
fn default_scan_max_distance() -> f64 {
    500.0
}
fn default_parallel() -> bool {
    false
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn with_container(mut self, w: f64, h: f64) -> Self {
        self.cfg.container_width = w;
        self.cfg.container_height = h;
        self
    }
    pub fn padding(mut self, v: f64) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn max_iterations(mut self, v: usize) -> Self {
        self.cfg.max_iterations = v;
        self
    }
    pub fn step_size(mut self, v: f64) -> Self {
        self.cfg.step_size = v;
        self
    }
    pub fn decay(mut self, v: f64) -> Self {
        self.cfg.decay = v;
        self
    }
    pub fn gravity_factor(mut self, v: f64) -> Self {
        self.cfg.gravity_factor = v;
        self
    }
    pub fn convergence_threshold(mut self, v: f64) -> Self {
        self.cfg.convergence_threshold = v;
        self
    }
    pub fn separation_passes(mut self, v: usize) -> Self {
        self.cfg.separation_passes = v;
        self
    }
    pub fn bounds_margin(mut self, v: f64) -> Self {
        self.cfg.bounds_margin = v;
        self
    }
    pub fn strategy(mut self, v: PackStrategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn sort_order(mut self, v: SortOrder) -> Self {
        self.cfg.sort_order = v;
        self
    }
    pub fn scan_angle_step_deg(mut self, v: f64) -> Self {
        self.cfg.scan_angle_step_deg = v;
        self
    }
    pub fn scan_radial_step(mut self, v: f64) -> Self {
        self.cfg.scan_radial_step = v;
        self
    }
    pub fn scan_max_distance(mut self, v: f64) -> Self {
        self.cfg.scan_max_distance = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
