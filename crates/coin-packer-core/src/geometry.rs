use serde::{Deserialize, Serialize};

/// Center distances below this are treated as coincident.
pub const COINCIDENT_EPSILON: f64 = 1e-9;

/// Axis-aligned box in layout units. `top` is the smaller y (screen coordinates).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of half extents `(hw, hh)` centred on `(cx, cy)`.
    pub fn from_center(cx: f64, cy: f64, hw: f64, hh: f64) -> Self {
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True if the interiors overlap. Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    /// Returns true if `inner` lies inside `self`, allowing `tolerance` of slack on each edge.
    pub fn contains_within(&self, inner: &Bounds, tolerance: f64) -> bool {
        inner.left >= self.left - tolerance
            && inner.top >= self.top - tolerance
            && inner.right <= self.right + tolerance
            && inner.bottom <= self.bottom + tolerance
    }

    /// Penetration depth of two boxes along x and y, as the smaller of the two
    /// edge gaps on each axis. `None` if the boxes do not intersect.
    pub fn penetration(&self, other: &Bounds) -> Option<(f64, f64)> {
        if !self.intersects(other) {
            return None;
        }
        let px = (self.right - other.left)
            .abs()
            .min((self.left - other.right).abs());
        let py = (self.bottom - other.top)
            .abs()
            .min((self.top - other.bottom).abs());
        Some((px, py))
    }
}

/// Push that moves circle `a` just clear of circle `b`, `min_dist` apart.
///
/// `tie` is the x direction used when the centres coincide.
pub fn circle_push(a: (f64, f64), b: (f64, f64), min_dist: f64, tie: f64) -> (f64, f64) {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    let dist = dx.hypot(dy);
    if dist >= min_dist {
        return (0.0, 0.0);
    }
    if dist < COINCIDENT_EPSILON {
        return (tie.signum() * min_dist, 0.0);
    }
    let factor = (min_dist - dist) / dist;
    (dx * factor, dy * factor)
}

/// Minimum-translation push for box `a` against box `b`: along the axis of
/// least penetration, away from `b`'s centre on that axis.
///
/// This is a bounding-box approximation; for a circle next to a rectangle
/// corner it can push further than the true shapes need.
pub fn box_push(a: &Bounds, b: &Bounds, tie: f64) -> (f64, f64) {
    let Some((px, py)) = a.penetration(b) else {
        return (0.0, 0.0);
    };
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    if px < py {
        (axis_sign(ax, bx, tie) * px, 0.0)
    } else {
        (0.0, axis_sign(ay, by, tie) * py)
    }
}

#[inline]
fn axis_sign(a: f64, b: f64, tie: f64) -> f64 {
    if a < b {
        -1.0
    } else if a > b {
        1.0
    } else {
        tie.signum()
    }
}
