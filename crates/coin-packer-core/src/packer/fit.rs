use crate::config::PackerConfig;
use crate::model::{PackableItem, group_bounds};
use tracing::debug;

/// Makes the pile fit the container and returns the scale factor applied.
///
/// The group's bounding box, grown by `bounds_margin`, decides the factor
/// `min(W / w, H / h, 1)`. The pile is never enlarged. When it has to shrink,
/// it is first centred on the container and then scaled about the centre,
/// positions and sizes together. When it fits but sits partly outside, it is
/// moved back inside and sizes are left untouched.
///
/// Because of the recentring, a shrunk item ends up at
/// `center + (p - group_center) * s`, not at `center + (p - center) * s`.
pub fn fit_to_container(items: &mut [PackableItem], cfg: &PackerConfig) -> f64 {
    let Some(group) = group_bounds(items) else {
        return 1.0;
    };
    let padded = group.expand(cfg.bounds_margin);
    let (cx, cy) = cfg.center();

    let scale_x = cfg.container_width / padded.width();
    let scale_y = cfg.container_height / padded.height();
    let scale = scale_x.min(scale_y).min(1.0);

    if scale < 1.0 {
        let (gx, gy) = group.center();
        let (dx, dy) = (cx - gx, cy - gy);
        for item in items.iter_mut() {
            item.translate(dx, dy);
            item.scale_about(cx, cy, scale);
        }
        debug!(scale, group_w = group.width(), group_h = group.height(), "pile rescaled");
        return scale;
    }

    let dx = shift_into(padded.left, padded.right, cfg.container_width);
    let dy = shift_into(padded.top, padded.bottom, cfg.container_height);
    if dx != 0.0 || dy != 0.0 {
        for item in items.iter_mut() {
            item.translate(dx, dy);
        }
        debug!(dx, dy, "pile shifted back inside the container");
    }
    1.0
}

/// Offset that brings `[lo, hi]` inside `[0, limit]`, assuming it is not wider.
#[inline]
fn shift_into(lo: f64, hi: f64, limit: f64) -> f64 {
    if lo < 0.0 {
        -lo
    } else if hi > limit {
        limit - hi
    } else {
        0.0
    }
}
