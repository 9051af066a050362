#![allow(clippy::float_cmp)]

use super::*;

fn b(left: f64, top: f64, right: f64, bottom: f64) -> Bounds {
    Bounds::new(left, top, right, bottom)
}

// =============================================================
// Derived values
// =============================================================

#[test]
fn derived_dimensions_and_centers() {
    let bounds = b(10.0, 20.0, 50.0, 40.0);
    assert_eq!(bounds.width(), 40.0);
    assert_eq!(bounds.height(), 20.0);
    assert_eq!(bounds.x_center(), 30.0);
    assert_eq!(bounds.y_center(), 30.0);
    assert_eq!(bounds.center(), Point::new(30.0, 30.0));
}

#[test]
fn inverted_bounds_have_negative_size() {
    let bounds = b(10.0, 10.0, 0.0, 5.0);
    assert_eq!(bounds.width(), -10.0);
    assert_eq!(bounds.height(), -5.0);
}

#[test]
fn from_origin_size_builds_edges() {
    let bounds = Bounds::from_origin_size(5.0, 6.0, 10.0, 20.0);
    assert_eq!(bounds, b(5.0, 6.0, 15.0, 26.0));
}

#[test]
fn empty_requires_zero_width_and_height() {
    assert!(b(3.0, 3.0, 3.0, 3.0).is_empty());
    assert!(!b(0.0, 0.0, 10.0, 0.0).is_empty());
    assert!(!b(0.0, 0.0, 0.0, 10.0).is_empty());
}

// =============================================================
// Normalization
// =============================================================

#[test]
fn normalize_resolves_inverted_edges() {
    let n = b(10.0, 30.0, -5.0, 0.0).normalize();
    assert_eq!(n, b(-5.0, 0.0, 10.0, 30.0));
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        b(0.0, 0.0, 10.0, 10.0),
        b(10.0, 10.0, 0.0, 0.0),
        b(-3.5, 8.0, 2.0, -1.0),
        b(4.0, 4.0, 4.0, 4.0),
    ];
    for sample in samples {
        let once = sample.normalize();
        assert_eq!(once.normalize(), once);
        assert!(once.left <= once.right);
        assert!(once.top <= once.bottom);
    }
}

// =============================================================
// Field constructors
// =============================================================

#[test]
fn with_constructors_only_touch_named_edges() {
    let base = b(0.0, 0.0, 10.0, 10.0);
    assert_eq!(base.with_left(2.0), b(2.0, 0.0, 10.0, 10.0));
    assert_eq!(base.with_top(2.0), b(0.0, 2.0, 10.0, 10.0));
    assert_eq!(base.with_right(2.0), b(0.0, 0.0, 2.0, 10.0));
    assert_eq!(base.with_bottom(2.0), b(0.0, 0.0, 10.0, 2.0));
    assert_eq!(base.with_left_right(1.0, 2.0), b(1.0, 0.0, 2.0, 10.0));
    assert_eq!(base.with_top_bottom(1.0, 2.0), b(0.0, 1.0, 10.0, 2.0));
    assert_eq!(base.with_left_top(1.0, 2.0), b(1.0, 2.0, 10.0, 10.0));
    assert_eq!(base.with_right_bottom(1.0, 2.0), b(0.0, 0.0, 1.0, 2.0));
}

#[test]
fn with_constructor_rederives_width() {
    let base = b(0.0, 0.0, 10.0, 10.0);
    assert_eq!(base.with_right(25.0).width(), 25.0);
}

#[test]
fn translate_and_moved_to_keep_size() {
    let base = b(10.0, 10.0, 30.0, 20.0);
    assert_eq!(base.translate(-10.0, 5.0), b(0.0, 15.0, 20.0, 25.0));
    assert_eq!(base.moved_to(0.0, 0.0), b(0.0, 0.0, 20.0, 10.0));
}

#[test]
fn union_covers_both_inputs() {
    let u = b(0.0, 0.0, 10.0, 10.0).union(&b(20.0, -5.0, 30.0, 5.0));
    assert_eq!(u, b(0.0, -5.0, 30.0, 10.0));
}

#[test]
fn bounds_serde_uses_edge_names() {
    let json = serde_json::to_value(b(1.0, 2.0, 3.0, 4.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "left": 1.0, "top": 2.0, "right": 3.0, "bottom": 4.0 }));
}

#[test]
fn point_distance() {
    assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
}
