use photo_layout_core::prelude::*;

fn coords(result: &LayoutResult) -> Vec<(i64, i64, i64, i64)> {
    result
        .positions()
        .iter()
        .map(|p| (p.left, p.top, p.width, p.height))
        .collect()
}

fn ids(result: &LayoutResult) -> Vec<&str> {
    result.positions().iter().map(|p| p.photo_id.as_str()).collect()
}

#[test]
fn empty_input_places_nothing_for_every_strategy() {
    let page = PageGeometry::new(210.0, 297.0);
    for kind in StrategyKind::ALL {
        let out = kind.calculate_layout(&page, &[], &MarginConfig::gap(2.0));
        assert!(out.is_empty(), "{kind}");
        assert_eq!(out.total_placed(), 0, "{kind}");
    }
}

#[test]
fn grid_two_across() {
    // 101mm leaves room for two 591px units (2 * round(50 * 11.811) = 1182 <= 1193).
    let specs = vec![PhotoSpec::new("a", 50.0, 50.0, 2)];
    let out = StrategyKind::Grid.calculate_layout(
        &PageGeometry::new(101.0, 50.0),
        &specs,
        &MarginConfig::gap(0.0),
    );
    assert_eq!(coords(&out), [(0, 0, 591, 591), (591, 0, 591, 591)]);
    assert_eq!(out.total_placed(), 2);
    assert_eq!(ids(&out), ["a", "a"]);
}

#[test]
fn grid_exact_mm_fit_loses_a_pixel_to_rounding() {
    // 100mm rounds to 1181px while two 50mm units need 1182px, so the second
    // copy wraps, finds no vertical room, and is dropped.
    let specs = vec![PhotoSpec::new("a", 50.0, 50.0, 2)];
    let out = StrategyKind::Grid.calculate_layout(
        &PageGeometry::new(100.0, 50.0),
        &specs,
        &MarginConfig::gap(0.0),
    );
    assert_eq!(coords(&out), [(0, 0, 591, 591)]);
    let report = PlacementReport::new(&specs, &out);
    assert_eq!(report.unplaced_total(), 1);
}

#[test]
fn oversized_photo_is_dropped_by_every_strategy() {
    let specs = vec![PhotoSpec::new("big", 50.0, 50.0, 1)];
    let page = PageGeometry::new(40.0, 40.0);
    for kind in StrategyKind::ALL {
        let out = kind.calculate_layout(&page, &specs, &MarginConfig::default());
        assert!(out.positions().is_empty(), "{kind}");
        assert_eq!(out.total_placed(), 0, "{kind}");
    }
}

#[test]
fn compact_places_larger_photo_first() {
    let specs = vec![
        PhotoSpec::new("A", 20.0, 20.0, 1),
        PhotoSpec::new("B", 40.0, 40.0, 1),
    ];
    let out = StrategyKind::Compact.calculate_layout(
        &PageGeometry::new(100.0, 100.0),
        &specs,
        &MarginConfig::gap(0.0),
    );
    assert_eq!(ids(&out), ["B", "A"]);
    assert_eq!(coords(&out)[0], (0, 0, 472, 472));
    // A lands in B's right-hand split child.
    assert_eq!(coords(&out)[1], (472, 0, 236, 236));
}

#[test]
fn compact_keeps_input_order_for_equal_areas() {
    let specs = vec![
        PhotoSpec::new("a", 20.0, 20.0, 1),
        PhotoSpec::new("b", 20.0, 20.0, 1),
        PhotoSpec::new("c", 20.0, 20.0, 1),
        PhotoSpec::new("d", 40.0, 40.0, 1),
    ];
    let out = StrategyKind::Compact.calculate_layout(
        &PageGeometry::new(100.0, 100.0),
        &specs,
        &MarginConfig::gap(0.0),
    );
    assert_eq!(ids(&out), ["d", "a", "b", "c"]);
    let lefts: Vec<i64> = out.positions().iter().map(|p| p.left).collect();
    assert_eq!(lefts, [0, 472, 708, 944]);
    assert!(out.positions().iter().all(|p| p.top == 0));
}

#[test]
fn compact_splits_use_the_placed_photos_gap() {
    let specs = vec![PhotoSpec::new("a", 20.0, 20.0, 2).with_margin(5.0, 5.0)];
    let out = StrategyKind::Compact.calculate_layout(
        &PageGeometry::new(100.0, 100.0),
        &specs,
        &MarginConfig::gap(1.0),
    );
    // 236px unit + 59px own gap, not the 12px global gap.
    assert_eq!(coords(&out), [(0, 0, 236, 236), (295, 0, 236, 236)]);
}

#[test]
fn adaptive_groups_sizes_into_blocks() {
    let specs = vec![
        PhotoSpec::new("s1", 25.0, 35.0, 1),
        PhotoSpec::new("s2", 25.0, 35.0, 1),
        PhotoSpec::new("s3", 25.0, 35.0, 1),
        PhotoSpec::new("big", 35.0, 49.0, 1),
    ];
    let margin = MarginConfig::gap(2.0);
    let page = PageGeometry::new(210.0, 297.0);
    let out = StrategyKind::Adaptive.calculate_layout(&page, &specs, &margin);

    // Larger size group first, then the three small photos in one row,
    // separated by twice the vertical gap (2 * 24px).
    assert_eq!(ids(&out), ["big", "s1", "s2", "s3"]);
    let gap_v = mm_to_pixels(2.0);
    let small_top = 579 + 2 * gap_v;
    assert_eq!(
        coords(&out),
        [
            (0, 0, 413, 579),
            (0, small_top, 295, 413),
            (319, small_top, 295, 413),
            (638, small_top, 295, 413),
        ]
    );
}

#[test]
fn grid_keeps_input_order_where_adaptive_groups() {
    let specs = vec![
        PhotoSpec::new("s1", 25.0, 35.0, 1),
        PhotoSpec::new("big", 35.0, 49.0, 1),
        PhotoSpec::new("s2", 25.0, 35.0, 1),
    ];
    let page = PageGeometry::new(210.0, 297.0);
    let margin = MarginConfig::gap(2.0);
    let grid = StrategyKind::Grid.calculate_layout(&page, &specs, &margin);
    assert_eq!(ids(&grid), ["s1", "big", "s2"]);
    let lefts: Vec<i64> = grid.positions().iter().map(|p| p.left).collect();
    assert_eq!(lefts, [0, 319, 756]);
    let adaptive = StrategyKind::Adaptive.calculate_layout(&page, &specs, &margin);
    assert_eq!(ids(&adaptive), ["big", "s1", "s2"]);
}

#[test]
fn page_margin_offsets_every_strategy() {
    let specs = vec![PhotoSpec::new("a", 25.0, 35.0, 1)];
    let margin = MarginConfig::gap(2.0).with_page_margin(PageMargin {
        left_mm: 5.0,
        right_mm: 5.0,
        top_mm: 10.0,
        bottom_mm: 10.0,
    });
    for kind in StrategyKind::ALL {
        let out = kind.calculate_layout(&PageGeometry::new(210.0, 297.0), &specs, &margin);
        assert_eq!(coords(&out), [(59, 118, 295, 413)], "{kind}");
    }
}

#[test]
fn grid_uses_photo_margin_override() {
    let specs = vec![PhotoSpec::new("a", 25.0, 35.0, 2).with_margin(5.0, 5.0)];
    let out = StrategyKind::Grid.calculate_layout(
        &PageGeometry::new(210.0, 297.0),
        &specs,
        &MarginConfig::gap(2.0),
    );
    assert_eq!(out.positions()[1].left, 295 + 59);
}
