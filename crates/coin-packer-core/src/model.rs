use crate::config::PackStrategy;
use crate::geometry::{self, Bounds};
use serde::{Deserialize, Serialize};

/// Geometry of a packable item. Coins are circles, bills are rectangles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    pub fn circle(radius: f64) -> Self {
        Shape::Circle { radius }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Shape::Rectangle { width, height }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }

    /// Half width and half height of the bounding box.
    pub fn half_extents(&self) -> (f64, f64) {
        match *self {
            Shape::Circle { radius } => (radius, radius),
            Shape::Rectangle { width, height } => (width / 2.0, height / 2.0),
        }
    }

    /// Longest side of the bounding box (the diameter for a circle).
    pub fn extent(&self) -> f64 {
        let (hw, hh) = self.half_extents();
        2.0 * hw.max(hh)
    }

    pub fn area(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => std::f64::consts::PI * radius * radius,
            Shape::Rectangle { width, height } => width * height,
        }
    }

    /// Same shape, every defining dimension multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Shape {
        match *self {
            Shape::Circle { radius } => Shape::Circle {
                radius: radius * factor,
            },
            Shape::Rectangle { width, height } => Shape::Rectangle {
                width: width * factor,
                height: height * factor,
            },
        }
    }

    /// True if every dimension is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        match *self {
            Shape::Circle { radius } => ok(radius),
            Shape::Rectangle { width, height } => ok(width) && ok(height),
        }
    }
}

/// A circle or axis-aligned rectangle positioned by its centre.
///
/// The engine overwrites `x`/`y` and, when the pile has to shrink, the shape's size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PackableItem {
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl PackableItem {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn circle(radius: f64) -> Self {
        Self::new(Shape::circle(radius))
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(Shape::rectangle(width, height))
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Bounding box: a `2r` square for circles, the rectangle itself otherwise.
    pub fn bounds(&self) -> Bounds {
        let (hw, hh) = self.shape.half_extents();
        Bounds::from_center(self.x, self.y, hw, hh)
    }

    /// Vector that moves `self` out of `other`.
    ///
    /// Two circles must stay `padding` apart and are pushed along the line of
    /// centres. Any pair involving a rectangle is separated on bounding boxes
    /// along the axis of least penetration, without padding. Zero if the
    /// items do not overlap.
    pub fn overlap_vector(&self, other: &PackableItem, padding: f64) -> (f64, f64) {
        push_vector(self, other, padding, 1.0)
    }

    /// True if the two shapes overlap (no padding; touching is not overlapping).
    pub fn intersects(&self, other: &PackableItem) -> bool {
        overlaps(self, other, 0.0)
    }

    /// Scales position about `(cx, cy)` and size by `factor`.
    pub(crate) fn scale_about(&mut self, cx: f64, cy: f64, factor: f64) {
        self.x = cx + (self.x - cx) * factor;
        self.y = cy + (self.y - cy) * factor;
        self.shape = self.shape.scaled(factor);
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }
}

/// Push for `a` against `b`. `tie` picks the direction when the centres
/// coincide on the push axis.
pub(crate) fn push_vector(a: &PackableItem, b: &PackableItem, padding: f64, tie: f64) -> (f64, f64) {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            geometry::circle_push(a.position(), b.position(), ra + rb + padding, tie)
        }
        _ => geometry::box_push(&a.bounds(), &b.bounds(), tie),
    }
}

/// Overlap predicate matching `push_vector`.
pub(crate) fn overlaps(a: &PackableItem, b: &PackableItem, padding: f64) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let (dx, dy) = (a.x - b.x, a.y - b.y);
            dx.hypot(dy) < ra + rb + padding
        }
        _ => a.bounds().intersects(&b.bounds()),
    }
}

/// Union of all item bounding boxes. `None` for an empty slice.
pub fn group_bounds(items: &[PackableItem]) -> Option<Bounds> {
    let mut iter = items.iter();
    let first = iter.next()?.bounds();
    Some(iter.fold(first, |acc, it| acc.union(&it.bounds())))
}

/// What a single `pack` call did.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackReport {
    /// Strategy that produced the arrangement (never `Auto`).
    pub strategy: PackStrategy,
    /// Relaxation passes run (radial scan: items placed after the first).
    pub iterations: usize,
    /// True if relaxation stopped before its budget (radial scan: every item found a free spot).
    pub converged: bool,
    /// Separation sweeps that moved at least one item.
    pub separation_passes: usize,
    /// Uniform factor applied in the fit step (1.0 when nothing shrank).
    /// The pile is recentred before scaling, so positions are relative to its own centre.
    pub scale_factor: f64,
    /// Pairs whose shapes still overlap after packing (padding not counted).
    pub residual_overlaps: usize,
    /// Final bounding box of the whole pile.
    pub bounds: Option<Bounds>,
}

impl PackReport {
    pub(crate) fn empty(strategy: PackStrategy) -> Self {
        Self {
            strategy,
            iterations: 0,
            converged: true,
            separation_passes: 0,
            scale_factor: 1.0,
            residual_overlaps: 0,
            bounds: None,
        }
    }

    /// True if the fit step shrank the pile.
    pub fn was_scaled(&self) -> bool {
        self.scale_factor < 1.0
    }
}

/// A placed item of a keyed layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement<K = String> {
    pub key: K,
    #[serde(flatten)]
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
}

impl<K> Placement<K> {
    pub fn bounds(&self) -> Bounds {
        let (hw, hh) = self.shape.half_extents();
        Bounds::from_center(self.x, self.y, hw, hh)
    }

    pub fn item(&self) -> PackableItem {
        PackableItem {
            shape: self.shape,
            x: self.x,
            y: self.y,
        }
    }
}

/// Layout-level metadata (common fields used by exporters/templates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version of the JSON layout formats; current: "1".
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub container: (f64, f64),
    pub padding: f64,
    pub strategy: PackStrategy,
}

/// A packed pile: placements in packing order, metadata and the engine report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout<K = String> {
    pub placements: Vec<Placement<K>>,
    pub meta: Meta,
    pub report: PackReport,
}

/// Statistics about a packed pile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    pub num_items: usize,
    pub num_circles: usize,
    pub num_rectangles: usize,
    /// Sum of the item shape areas (after any rescale).
    pub item_area: f64,
    pub container_area: f64,
    /// item_area / container_area (0.0 to 1.0 for a valid layout).
    pub coverage: f64,
    /// Area of the pile's bounding box.
    pub pile_area: f64,
    pub scale_factor: f64,
    pub residual_overlaps: usize,
}

impl<K> Layout<K> {
    /// Computes statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let num_items = self.placements.len();
        let num_circles = self
            .placements
            .iter()
            .filter(|p| p.shape.is_circle())
            .count();
        let item_area: f64 = self.placements.iter().map(|p| p.shape.area()).sum();
        let container_area = self.meta.container.0 * self.meta.container.1;
        let coverage = if container_area > 0.0 {
            item_area / container_area
        } else {
            0.0
        };
        let pile_area = self.report.bounds.map(|b| b.area()).unwrap_or(0.0);

        LayoutStats {
            num_items,
            num_circles,
            num_rectangles: num_items - num_circles,
            item_area,
            container_area,
            coverage,
            pile_area,
            scale_factor: self.report.scale_factor,
            residual_overlaps: self.report.residual_overlaps,
        }
    }

    /// Items of the layout as engine items, in placement order.
    pub fn items(&self) -> Vec<PackableItem> {
        self.placements.iter().map(Placement::item).collect()
    }
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Items: {} ({} coins, {} bills), Coverage: {:.2}%, Item Area: {:.1}, Pile Area: {:.1}, Scale: {:.3}, Overlaps: {}",
            self.num_items,
            self.num_circles,
            self.num_rectangles,
            self.coverage * 100.0,
            self.item_area,
            self.pile_area,
            self.scale_factor,
            self.residual_overlaps,
        )
    }

    /// Pile compactness: item area over the pile's bounding-box area (0.0 to 1.0).
    pub fn density(&self) -> f64 {
        if self.pile_area > 0.0 {
            self.item_area / self.pile_area
        } else {
            0.0
        }
    }
}
