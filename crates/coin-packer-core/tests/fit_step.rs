use coin_packer_core::packer::fit::fit_to_container;
use coin_packer_core::prelude::*;

fn at(radius: f64, x: f64, y: f64) -> PackableItem {
    PackableItem { x, y, ..PackableItem::circle(radius) }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn off_centre_pile_is_recentred_before_scaling() {
    let cfg = PackerConfig::builder().with_container(100.0, 100.0).build();
    // group box (-30, 0)..(90, 60), centre (30, 30); padded 140 x 80
    let mut items = vec![at(30.0, 0.0, 30.0), at(30.0, 60.0, 30.0)];

    let scale = fit_to_container(&mut items, &cfg);

    let s = 100.0 / 140.0;
    assert!(close(scale, s), "scale {}", scale);
    assert!(close(items[0].x, 50.0 - 30.0 * s) && close(items[0].y, 50.0));
    assert!(close(items[1].x, 50.0 + 30.0 * s) && close(items[1].y, 50.0));
    // scaling about the container centre alone would have left it here
    assert!(!close(items[0].x, 50.0 - 50.0 * s));
    assert_eq!(items[0].shape, Shape::circle(30.0 * s));
    assert!(out_of_bounds(&items, 100.0, 100.0, 1e-9).is_empty());
}

#[test]
fn fitting_pile_is_shifted_not_scaled() {
    let cfg = PackerConfig::builder().with_container(100.0, 100.0).build();
    let mut items = vec![at(10.0, 5.0, 50.0)];

    let scale = fit_to_container(&mut items, &cfg);

    assert_eq!(scale, 1.0);
    // padded box (-15, 30)..(25, 70) moves right by 15
    assert!(close(items[0].x, 20.0) && close(items[0].y, 50.0));
    assert_eq!(items[0].shape, Shape::circle(10.0));
}

#[test]
fn pile_inside_the_margin_stays_put() {
    let cfg = PackerConfig::builder().with_container(100.0, 100.0).build();
    let mut items = vec![at(10.0, 30.0, 40.0), at(5.0, 70.0, 60.0)];
    let before = items.clone();

    assert_eq!(fit_to_container(&mut items, &cfg), 1.0);
    assert_eq!(items, before);
}
