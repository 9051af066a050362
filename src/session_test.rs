#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::ROTATE_SNAP_DEG;
use crate::doc::{Layer, LayerKind};
use crate::input::Modifiers;
use crate::payload::{Command, HostRequest, LocalPayload};

fn selected_layer(kind: LayerKind, bounds: Option<Bounds>) -> Layer {
    let mut layer = Layer::new(kind, bounds);
    layer.selected = true;
    layer
}

fn doc_with(layers: Vec<Layer>) -> Document {
    let mut doc = Document::new(200.0, 200.0);
    for layer in layers {
        doc.layers.push(layer);
    }
    doc
}

fn square_doc() -> Document {
    doc_with(vec![selected_layer(LayerKind::Pixel, Some(Bounds::new(0.0, 0.0, 10.0, 10.0)))])
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

fn alt() -> Modifiers {
    Modifiers { alt: true, ..Modifiers::default() }
}

fn resizing(handle: Corner, bounds: Bounds) -> DragSession {
    let mut session = DragSession::new();
    assert!(session.start_resize(handle, bounds, Button::Primary, 1.0));
    session
}

fn resize_bounds(update: Option<DragUpdate>) -> (Bounds, Corner) {
    match update {
        Some(DragUpdate::Resize { bounds, corner, .. }) => (bounds, corner),
        other => panic!("expected resize update, got {other:?}"),
    }
}

fn rotate_angle(update: Option<DragUpdate>) -> f64 {
    match update {
        Some(DragUpdate::Rotate { angle, .. }) => angle,
        other => panic!("expected rotate update, got {other:?}"),
    }
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

// =============================================================================
// Gesture start
// =============================================================================

#[test]
fn only_primary_button_starts_resize() {
    let mut session = DragSession::new();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(!session.start_resize(Corner::Se, bounds, Button::Secondary, 1.0));
    assert!(!session.start_resize(Corner::Se, bounds, Button::Middle, 1.0));
    assert!(!session.is_dragging());
    assert!(session.start_resize(Corner::Se, bounds, Button::Primary, 1.0));
    assert!(session.is_dragging());
}

#[test]
fn only_primary_button_starts_rotate() {
    let mut session = DragSession::new();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(!session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Secondary, 1.0, ROTATE_SNAP_DEG));
    assert_eq!(session, DragSession::Idle);
}

#[test]
fn side_handle_cannot_start_rotate() {
    let mut session = DragSession::new();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(!session.start_rotate(Corner::E, Point::new(10.0, 5.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG));
    assert_eq!(session, DragSession::Idle);
}

#[test]
fn start_while_dragging_is_ignored() {
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = resizing(Corner::Se, bounds);
    assert!(!session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG));
    assert!(matches!(session, DragSession::Resizing(_)));
}

#[test]
fn update_when_idle_is_none() {
    let doc = square_doc();
    let mut session = DragSession::new();
    assert!(session.update(&doc, &Pointer::at(5.0, 5.0)).is_none());
}

// =============================================================================
// Plain resize and quadrant flips
// =============================================================================

#[test]
fn se_drag_moves_only_right_and_bottom() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let (bounds, corner) = resize_bounds(session.update(&doc, &Pointer::at(25.0, 30.0)));
    assert_eq!(bounds, Bounds::new(0.0, 0.0, 25.0, 30.0));
    assert_eq!(corner, Corner::Se);
}

#[test]
fn se_drag_past_left_edge_relabels_to_sw() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let (bounds, corner) = resize_bounds(session.update(&doc, &Pointer::at(-5.0, 10.0)));
    assert_eq!(corner, Corner::Sw);
    assert_eq!(bounds, Bounds::new(0.0, 0.0, -5.0, 10.0));
    assert_eq!(bounds.normalize(), Bounds::new(-5.0, 0.0, 0.0, 10.0));
}

#[test]
fn crossing_back_restores_original_corner() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    session.update(&doc, &Pointer::at(-5.0, 10.0));
    let (_, corner) = resize_bounds(session.update(&doc, &Pointer::at(5.0, 10.0)));
    assert_eq!(corner, Corner::Se);
}

#[test]
fn se_drag_past_top_left_relabels_to_nw() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let (_, corner) = resize_bounds(session.update(&doc, &Pointer::at(-5.0, -5.0)));
    assert_eq!(corner, Corner::Nw);
}

#[test]
fn side_handle_flip_changes_only_its_axis() {
    let doc = square_doc();
    let mut session = resizing(Corner::E, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let (bounds, corner) = resize_bounds(session.update(&doc, &Pointer::at(-4.0, 50.0)));
    assert_eq!(corner, Corner::W);
    assert_eq!(bounds, Bounds::new(0.0, 0.0, -4.0, 10.0));
}

// =============================================================================
// Modifiers
// =============================================================================

#[test]
fn shift_corner_drag_keeps_aspect_ratio() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 20.0));
    let pointer = Pointer::at(20.0, 30.0).with_modifiers(shift());
    let (bounds, _) = resize_bounds(session.update(&doc, &pointer));
    assert_eq!(bounds, Bounds::new(0.0, 0.0, 15.0, 30.0));
    assert_close(bounds.width() / bounds.height(), 0.5);
}

#[test]
fn shift_corner_drag_smaller_ratio_wins() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let pointer = Pointer::at(40.0, 20.0).with_modifiers(shift());
    let (bounds, _) = resize_bounds(session.update(&doc, &pointer));
    assert_eq!(bounds, Bounds::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn shift_side_drag_scales_other_axis_about_center() {
    let doc = square_doc();
    let mut session = resizing(Corner::N, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let pointer = Pointer::at(5.0, -10.0).with_modifiers(shift());
    let (bounds, _) = resize_bounds(session.update(&doc, &pointer));
    assert_eq!(bounds, Bounds::new(-5.0, -10.0, 15.0, 10.0));
}

#[test]
fn layer_proportional_scaling_forces_proportional() {
    let mut layer = selected_layer(LayerKind::Pixel, Some(Bounds::new(0.0, 0.0, 10.0, 20.0)));
    layer.proportional_scaling = true;
    let doc = doc_with(vec![layer]);
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 20.0));
    let (bounds, _) = resize_bounds(session.update(&doc, &Pointer::at(20.0, 30.0)));
    assert_eq!(bounds, Bounds::new(0.0, 0.0, 15.0, 30.0));
}

#[test]
fn alt_corner_drag_mirrors_about_center() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let pointer = Pointer::at(15.0, 15.0).with_modifiers(alt());
    let (bounds, corner) = resize_bounds(session.update(&doc, &pointer));
    assert_eq!(bounds, Bounds::new(-5.0, -5.0, 15.0, 15.0));
    assert_eq!(bounds.center(), Point::new(5.0, 5.0));
    assert_eq!(corner, Corner::Se);
}

#[test]
fn alt_side_drag_moves_opposite_edge() {
    let doc = square_doc();
    let mut session = resizing(Corner::E, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let pointer = Pointer::at(14.0, 5.0).with_modifiers(alt());
    let (bounds, _) = resize_bounds(session.update(&doc, &pointer));
    assert_eq!(bounds, Bounds::new(-4.0, 0.0, 14.0, 10.0));
}

#[test]
fn alt_flip_compares_pointer_against_initial_center() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let pointer = Pointer::at(2.0, 8.0).with_modifiers(alt());
    let (_, corner) = resize_bounds(session.update(&doc, &pointer));
    assert_eq!(corner, Corner::Sw);
}

#[test]
fn no_modifiers_returns_raw_bounds() {
    let initial = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let raw = Bounds::new(0.0, 0.0, 13.0, 7.0);
    assert_eq!(calculate_modified_bounds(&initial, raw, Corner::Se, false, false), raw);
}

#[test]
fn proportional_on_zero_extent_initial_is_ignored() {
    let initial = Bounds::new(0.0, 0.0, 10.0, 0.0);
    let raw = Bounds::new(0.0, 0.0, 12.0, 4.0);
    assert_eq!(calculate_modified_bounds(&initial, raw, Corner::Se, true, false), raw);
}

#[test]
fn simple_drag_bounds_moves_handle_edges_only() {
    let initial = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let pt = Point::new(3.0, 4.0);
    assert_eq!(simple_drag_bounds(&initial, Corner::Nw, pt), Bounds::new(3.0, 4.0, 10.0, 10.0));
    assert_eq!(simple_drag_bounds(&initial, Corner::N, pt), Bounds::new(0.0, 4.0, 10.0, 10.0));
    assert_eq!(simple_drag_bounds(&initial, Corner::W, pt), Bounds::new(3.0, 0.0, 10.0, 10.0));
    assert_eq!(simple_drag_bounds(&initial, Corner::Sw, pt), Bounds::new(3.0, 0.0, 10.0, 4.0));
}

// =============================================================================
// Live payload
// =============================================================================

#[test]
fn live_update_emits_drag_bounds_payload() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let Some(DragUpdate::Resize { plan: Some(plan), .. }) = session.update(&doc, &Pointer::at(20.0, 20.0)) else {
        panic!("expected live plan");
    };
    assert_eq!(plan.command, Command::SetDragBounds);
    assert!(plan.requests.is_empty());
    assert!(matches!(plan.payload, Some(LocalPayload::DragBounds { .. })));
}

#[test]
fn selected_group_suppresses_live_payload() {
    let doc = doc_with(vec![
        selected_layer(LayerKind::Group, None),
        Layer::new(LayerKind::Pixel, Some(Bounds::new(0.0, 0.0, 10.0, 10.0))),
        Layer::new(LayerKind::GroupEnd, None),
    ]);
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let Some(DragUpdate::Resize { plan, bounds, .. }) = session.update(&doc, &Pointer::at(20.0, 20.0)) else {
        panic!("expected resize update");
    };
    assert!(plan.is_none());
    assert_eq!(bounds, Bounds::new(0.0, 0.0, 20.0, 20.0));
}

// =============================================================================
// Rotation
// =============================================================================

#[test]
fn rotate_accumulates_from_grabbed_handle() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = DragSession::new();
    assert!(session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG));
    let angle = rotate_angle(session.update(&doc, &Pointer::at(10.0, 10.0)));
    assert_close(angle, 90.0);
}

#[test]
fn stationary_pointer_keeps_rotation_steady() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = DragSession::new();
    session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
    for _ in 0..3 {
        let angle = rotate_angle(session.update(&doc, &Pointer::at(10.0, 10.0)));
        assert_close(angle, 90.0);
    }
}

#[test]
fn gradual_drag_commits_total_sweep() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = DragSession::new();
    session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
    // The ne corner sits at -45 degrees from the center.
    for step in 1..=6 {
        let rad = (-45.0 + 10.0 * f64::from(step)).to_radians();
        let angle = rotate_angle(session.update(&doc, &Pointer::at(5.0 + 7.0 * rad.cos(), 5.0 + 7.0 * rad.sin())));
        assert_close(angle, 10.0 * f64::from(step));
    }
    let Some(plan) = session.finish(&doc) else {
        panic!("expected plan");
    };
    assert!(matches!(
        plan.requests.as_slice(),
        [HostRequest::Rotate { angle, .. }] if (*angle - 60.0).abs() < 1e-9
    ));
}

#[test]
fn shift_snaps_rotation_to_45_degrees() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);

    let mut free = DragSession::new();
    free.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
    let unsnapped = rotate_angle(free.update(&doc, &Pointer::at(12.0, 6.0)));
    assert!(unsnapped > 50.0 && unsnapped < 55.0);

    let mut snapped = DragSession::new();
    snapped.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
    let angle = rotate_angle(snapped.update(&doc, &Pointer::at(12.0, 6.0).with_modifiers(shift())));
    assert_eq!(angle, 45.0);
}

/// Pointer on a circle around the center of (0,0)-(10,10) at `deg` degrees.
fn pointer_at_angle(deg: f64) -> Pointer {
    let rad = deg.to_radians();
    Pointer::at(5.0 + 7.0 * rad.cos(), 5.0 + 7.0 * rad.sin()).with_modifiers(shift())
}

#[test]
fn snap_rounds_to_nearest_step() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    // Grabbing the ne corner puts the initial angle at -45 degrees.
    for (pointer_deg, expected) in [(5.0, 45.0), (55.0, 90.0)] {
        let mut session = DragSession::new();
        session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
        let angle = rotate_angle(session.update(&doc, &pointer_at_angle(pointer_deg)));
        assert_eq!(angle, expected);
    }
}

#[test]
fn custom_snap_step_is_used() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = DragSession::new();
    session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, 15.0);
    let angle = rotate_angle(session.update(&doc, &Pointer::at(12.0, 6.0).with_modifiers(shift())));
    assert_eq!(angle, 60.0);
}

#[test]
fn rotation_back_to_start_is_positive_zero() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = DragSession::new();
    session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
    let angle = rotate_angle(session.update(&doc, &Pointer::at(10.0, 0.0)));
    assert_eq!(angle, 0.0);
    assert!(angle.is_sign_positive());
}

// =============================================================================
// Finish
// =============================================================================

#[test]
fn finish_resize_commits_set_bounds() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    session.update(&doc, &Pointer::at(20.0, 30.0));
    let Some(plan) = session.finish(&doc) else {
        panic!("expected plan");
    };
    assert_eq!(plan.command, Command::SetBounds);
    assert!(matches!(
        plan.requests.as_slice(),
        [HostRequest::SetSize { w, h, .. }] if *w == 20.0 && *h == 30.0
    ));
    assert_eq!(session, DragSession::Idle);
}

#[test]
fn finish_rotate_commits_rotation() {
    let doc = square_doc();
    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let mut session = DragSession::new();
    session.start_rotate(Corner::Ne, Point::new(10.0, 0.0), bounds, Button::Primary, 1.0, ROTATE_SNAP_DEG);
    session.update(&doc, &Pointer::at(10.0, 10.0));
    let Some(plan) = session.finish(&doc) else {
        panic!("expected plan");
    };
    assert!(matches!(
        plan.requests.as_slice(),
        [HostRequest::Rotate { angle, .. }] if (*angle - 90.0).abs() < 1e-9
    ));
}

#[test]
fn finish_without_movement_is_empty_plan() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    let Some(plan) = session.finish(&doc) else {
        panic!("expected plan");
    };
    assert!(plan.is_empty());
}

#[test]
fn finish_is_idempotent() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    session.update(&doc, &Pointer::at(20.0, 20.0));
    assert!(session.finish(&doc).is_some());
    assert!(session.finish(&doc).is_none());
    assert!(DragSession::new().finish(&doc).is_none());
}

#[test]
fn destroy_drops_gesture_without_commit() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    session.update(&doc, &Pointer::at(20.0, 20.0));
    session.destroy();
    assert!(session.finish(&doc).is_none());
}

// =============================================================================
// Overlay
// =============================================================================

#[test]
fn overlay_tracks_live_bounds_and_corner() {
    let doc = square_doc();
    let mut session = resizing(Corner::Se, Bounds::new(0.0, 0.0, 10.0, 10.0));
    assert!(DragSession::new().overlay().is_none());
    session.update(&doc, &Pointer::at(-5.0, 10.0));
    let Some(overlay) = session.overlay() else {
        panic!("expected overlay");
    };
    assert_eq!(overlay.active, Corner::Sw);
    assert_eq!(overlay.bounds, Bounds::new(0.0, 0.0, -5.0, 10.0));
    assert_eq!(overlay.handles.resize.len(), 8);
}
