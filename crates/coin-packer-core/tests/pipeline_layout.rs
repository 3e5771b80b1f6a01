use coin_packer_core::prelude::*;
use coin_packer_core::CoinPackerError;

fn keys(layout: &Layout) -> Vec<&str> {
    layout.placements.iter().map(|p| p.key.as_str()).collect()
}

fn sample() -> Vec<LayoutItem<&'static str>> {
    vec![
        LayoutItem::new("a", Shape::circle(5.0)),
        LayoutItem::new("b", Shape::rectangle(100.0, 40.0)),
        LayoutItem::new("c", Shape::circle(20.0)),
        LayoutItem::new("d", Shape::circle(20.0)),
    ]
}

#[test]
fn size_desc_puts_largest_first() {
    let layout = pack_layout(sample(), PackerConfig::default()).unwrap();
    // equal sizes fall back to key order
    assert_eq!(keys(&layout), vec!["b", "c", "d", "a"]);
}

#[test]
fn area_desc_orders_by_area() {
    let cfg = PackerConfig::builder().sort_order(SortOrder::AreaDesc).build();
    let items = vec![
        LayoutItem::new("thin", Shape::rectangle(90.0, 4.0)),
        LayoutItem::new("coin", Shape::circle(20.0)),
    ];
    let layout = pack_layout(items, cfg).unwrap();
    // 1256.6 > 360 even though the bill is longer
    assert_eq!(keys(&layout), vec!["coin", "thin"]);
}

#[test]
fn key_asc_and_none_orders() {
    let cfg = PackerConfig::builder().sort_order(SortOrder::KeyAsc).build();
    let mut items = sample();
    items.reverse();
    let layout = pack_layout(items, cfg).unwrap();
    assert_eq!(keys(&layout), vec!["a", "b", "c", "d"]);

    let cfg = PackerConfig::builder().sort_order(SortOrder::None).build();
    let layout = pack_layout(sample(), cfg).unwrap();
    assert_eq!(keys(&layout), vec!["a", "b", "c", "d"]);
}

#[test]
fn placements_match_engine_output() {
    let cfg = PackerConfig::builder().with_container(300.0, 200.0).build();
    let layout = pack_layout(sample(), cfg.clone()).unwrap();

    let items = layout.items();
    assert_eq!(items.len(), 4);
    assert!(overlapping_pairs(&items, cfg.padding * layout.report.scale_factor).is_empty());
    assert!(out_of_bounds(&items, 300.0, 200.0, 1e-9).is_empty());
    assert_eq!(layout.report.residual_overlaps, 0);

    assert_eq!(layout.meta.container, (300.0, 200.0));
    assert_eq!(layout.meta.padding, cfg.padding);
    assert_eq!(layout.meta.strategy, PackStrategy::Relaxation);
    assert_eq!(layout.meta.app, "coin-packer");
}

#[test]
fn empty_pile_gives_empty_layout() {
    let items: Vec<LayoutItem<String>> = vec![];
    let layout = pack_layout(items, PackerConfig::default()).unwrap();
    assert!(layout.placements.is_empty());
    assert_eq!(layout.report.scale_factor, 1.0);
    assert_eq!(layout.stats().num_items, 0);
    assert_eq!(layout.stats().density(), 0.0);
}

#[test]
fn invalid_items_are_rejected_with_their_index() {
    for bad in [
        Shape::circle(0.0),
        Shape::circle(f64::NAN),
        Shape::rectangle(-5.0, 10.0),
        Shape::rectangle(10.0, f64::INFINITY),
    ] {
        let items = vec![
            LayoutItem::new("ok", Shape::circle(10.0)),
            LayoutItem::new("bad", bad),
        ];
        match pack_layout(items, PackerConfig::default()) {
            Err(CoinPackerError::InvalidItem { index, .. }) => assert_eq!(index, 1),
            other => panic!("{:?}: expected InvalidItem, got {:?}", bad, other.map(|l| l.placements.len())),
        }
    }
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = PackerConfig::builder().with_container(0.0, 100.0).build();
    assert!(matches!(
        pack_layout(sample(), cfg),
        Err(CoinPackerError::InvalidDimensions { .. })
    ));
}

#[test]
fn stats_describe_the_pile() {
    let layout = pack_layout(sample(), PackerConfig::default()).unwrap();
    let stats = layout.stats();

    assert_eq!(stats.num_items, 4);
    assert_eq!(stats.num_circles, 3);
    assert_eq!(stats.num_rectangles, 1);
    assert_eq!(stats.container_area, 90000.0);
    assert!(stats.coverage > 0.0 && stats.coverage < 1.0);
    assert!(stats.pile_area >= stats.item_area * 0.5);
    assert!(stats.density() > 0.0 && stats.density() <= 1.0);
    assert!(stats.summary().starts_with("Items: 4 (3 coins, 1 bills)"));
}

#[test]
fn piles_are_packed_independently_in_order() {
    let piles = vec![
        coin_items(&[Denomination::Quarter, Denomination::Dime]),
        coin_items(&[Denomination::Dollar]),
        vec![],
        coin_items(&[Denomination::Cent, Denomination::Nickel, Denomination::HalfDollar]),
    ];
    let layouts = pack_piles(piles, PackerConfig::default()).unwrap();

    let sizes: Vec<usize> = layouts.iter().map(|l| l.placements.len()).collect();
    assert_eq!(sizes, vec![2, 1, 0, 3]);
    assert_eq!(layouts[1].placements[0].key, "dollar_0");
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_piles_match_sequential() {
    let piles = || {
        (0..6)
            .map(|i| coin_items(&vec![Denomination::Quarter; i + 1]))
            .collect::<Vec<_>>()
    };
    let seq = pack_piles(piles(), PackerConfig::default()).unwrap();
    let par = pack_piles(piles(), PackerConfig::builder().parallel(true).build()).unwrap();
    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(a.items(), b.items());
    }
}
