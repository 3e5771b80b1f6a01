//! Post-pack checks for callers that need more than a best-effort layout.

use crate::geometry::Bounds;
use crate::model::{PackableItem, overlaps};

/// Index pairs `(i, j)`, `i < j`, whose shapes overlap.
///
/// Circles are compared by centre distance against `r1 + r2 + padding`; any
/// pair involving a rectangle by bounding boxes (padding ignored), the same
/// rule the relaxation resolves.
pub fn overlapping_pairs(items: &[PackableItem], padding: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if overlaps(&items[i], &items[j], padding) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Indices of items whose bounding box leaves `[0, width] × [0, height]` by more than `tolerance`.
pub fn out_of_bounds(items: &[PackableItem], width: f64, height: f64, tolerance: f64) -> Vec<usize> {
    let container = Bounds::new(0.0, 0.0, width, height);
    items
        .iter()
        .enumerate()
        .filter(|(_, it)| !container.contains_within(&it.bounds(), tolerance))
        .map(|(i, _)| i)
        .collect()
}
