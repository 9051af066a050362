//! Interactive drag session: the resize and rotate gesture state machine.
//!
//! A session is `Idle` until a primary-button press on a handle starts a
//! gesture. Every pointer tick then recomputes the live geometry from the
//! bounds snapshotted at start, so updates never accumulate rounding error.
//! Finishing commits through the transform commands and returns to `Idle`;
//! finishing an idle session is a no-op, so duplicate end events cannot
//! commit twice.
//!
//! ```text
//! Idle --start_resize--> Resizing --update*--> Resizing --finish--> Idle
//! Idle --start_rotate--> Rotating --update*--> Rotating --finish--> Idle
//! ```
//!
//! The session is owned by whoever owns the active gesture (see
//! [`crate::engine::TransformEngine`]) and the document is passed in on every
//! call; nothing is retained between calls except the snapshot.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, Point};
use crate::doc::{Document, LayerKind};
use crate::hit::{HandleSet, handle_set};
use crate::input::{Button, Corner, Pointer};
use crate::payload::TransformPlan;
use crate::transform::{rotate, set_bounds, set_drag_bounds};

// =============================================================================
// STATE
// =============================================================================

/// Context for an in-progress resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    /// The handle that was grabbed. Drives all geometry for the gesture.
    pub handle: Corner,
    /// The handle currently under the pointer, relabeled on quadrant flips.
    pub corner: Corner,
    /// Selection bounds at gesture start.
    pub initial_bounds: Bounds,
    /// Reference rectangle for quadrant-flip detection.
    pub quadrant_bounds: Bounds,
    /// Bounds produced by the latest update; committed on finish.
    pub current_bounds: Bounds,
    /// Overlay scale (1 / zoom).
    pub scale: f64,
}

/// Context for an in-progress rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateDrag {
    pub handle: Corner,
    /// Selection bounds at gesture start; rotation pivots on their center.
    pub initial_bounds: Bounds,
    /// Angle from the center to the grabbed handle, in degrees.
    pub initial_angle: f64,
    /// Rotation as of the last tick, in degrees.
    pub current_angle: f64,
    /// Step used while the snap modifier is held, in degrees.
    pub snap_deg: f64,
    pub scale: f64,
}

/// The single active gesture, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Resizing(ResizeDrag),
    Rotating(RotateDrag),
}

/// Result of one pointer tick.
#[derive(Debug, Clone, PartialEq)]
pub enum DragUpdate {
    Resize {
        /// Live bounds, possibly inverted.
        bounds: Bounds,
        /// Active handle after quadrant-flip detection.
        corner: Corner,
        /// Uncommitted per-layer bounds for the store; `None` when a group is
        /// selected and only the overlay should move.
        plan: Option<TransformPlan>,
    },
    Rotate {
        /// Accumulated rotation, in degrees.
        angle: f64,
        /// Pivot of the rotation.
        center: Point,
    },
}

/// What the overlay should draw for the active gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub bounds: Bounds,
    /// Rotation applied to the whole overlay about `center`, in degrees.
    pub angle: f64,
    pub center: Point,
    /// Handle highlighted as being dragged.
    pub active: Corner,
    pub handles: HandleSet,
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Angle of `pt` around `center`, in degrees.
fn angle_deg(center: Point, pt: Point) -> f64 {
    (pt.y - center.y).atan2(pt.x - center.x).to_degrees()
}

/// Sign with zero mapped to zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Move only the dragged handle's edge(s) of `initial` to `pt`.
#[must_use]
pub fn simple_drag_bounds(initial: &Bounds, handle: Corner, pt: Point) -> Bounds {
    match handle {
        Corner::Nw => initial.with_left_top(pt.x, pt.y),
        Corner::N => initial.with_top(pt.y),
        Corner::Ne => initial.with_right_top(pt.x, pt.y),
        Corner::E => initial.with_right(pt.x),
        Corner::Se => initial.with_right_bottom(pt.x, pt.y),
        Corner::S => initial.with_bottom(pt.y),
        Corner::Sw => initial.with_left_bottom(pt.x, pt.y),
        Corner::W => initial.with_left(pt.x),
    }
}

/// Apply the proportional and mirror-on-edge modifiers to raw drag bounds.
///
/// Proportional: a side handle scales the orthogonal dimension of `initial`
/// by the dragged dimension's ratio, centered; a corner handle keeps the
/// original aspect ratio, driven by whichever ratio is smaller in magnitude.
/// Mirror-on-edge: the opposite edges move by the same signed delta as the
/// dragged ones, resizing symmetrically about the center.
#[must_use]
pub fn calculate_modified_bounds(
    initial: &Bounds,
    bounds: Bounds,
    handle: Corner,
    proportional: bool,
    mirror: bool,
) -> Bounds {
    let proportional = proportional && initial.width() != 0.0 && initial.height() != 0.0;
    if !proportional && !mirror {
        return bounds;
    }

    let mut next_w = bounds.width();
    let mut next_h = bounds.height();
    if proportional {
        match handle {
            Corner::N | Corner::S => next_w = initial.width() * (bounds.height() / initial.height()),
            Corner::E | Corner::W => next_h = initial.height() * (bounds.width() / initial.width()),
            Corner::Nw | Corner::Ne | Corner::Se | Corner::Sw => {
                let width_ratio = bounds.width() / initial.width();
                let height_ratio = bounds.height() / initial.height();
                let diagonal = initial.width() / initial.height();
                // Signs of the two ratios tell which quadrant the drag is in.
                let multiplier = if mirror { 1.0 } else { sign(height_ratio) * sign(width_ratio) };
                if height_ratio.abs() < width_ratio.abs() {
                    next_w = multiplier * bounds.height() * diagonal;
                } else {
                    next_h = multiplier * bounds.width() / diagonal;
                }
            }
        }
    }

    let hd = next_h - initial.height();
    let wd = next_w - initial.width();
    let mut m = bounds;
    match handle {
        Corner::Nw => {
            if proportional {
                m = m.with_left_top(m.right - next_w, m.bottom - next_h);
            }
            if mirror {
                m = m.with_right_bottom(m.right + wd, m.bottom + hd);
            }
        }
        Corner::N => {
            if proportional {
                m = m.with_left_right(m.left - wd / 2.0, m.right + wd / 2.0);
            }
            if mirror {
                m = m.with_bottom(initial.bottom + hd);
            }
        }
        Corner::Ne => {
            if proportional {
                m = m.with_right_top(m.left + next_w, m.bottom - next_h);
            }
            if mirror {
                m = m.with_left_bottom(m.left - wd, m.bottom + hd);
            }
        }
        Corner::E => {
            if proportional {
                m = m.with_top_bottom(m.top - hd / 2.0, m.bottom + hd / 2.0);
            }
            if mirror {
                m = m.with_left(initial.left - wd);
            }
        }
        Corner::Se => {
            if proportional {
                m = m.with_right_bottom(m.left + next_w, m.top + next_h);
            }
            if mirror {
                m = m.with_left_top(m.left - wd, m.top - hd);
            }
        }
        Corner::S => {
            if proportional {
                m = m.with_left_right(m.left - wd / 2.0, m.right + wd / 2.0);
            }
            if mirror {
                m = m.with_top(initial.top - hd);
            }
        }
        Corner::Sw => {
            if proportional {
                m = m.with_left_bottom(m.right - next_w, m.top + next_h);
            }
            if mirror {
                m = m.with_right_top(m.right + wd, m.top - hd);
            }
        }
        Corner::W => {
            if proportional {
                m = m.with_top_bottom(m.top - hd / 2.0, m.bottom + hd / 2.0);
            }
            if mirror {
                m = m.with_right(initial.right + wd);
            }
        }
    }
    m
}

impl ResizeDrag {
    /// Relabel the active corner when the drag crosses the opposite edge.
    ///
    /// Without mirroring, the normalized bounds are compared against the
    /// quadrant reference, which then shifts one full span in the crossing
    /// direction. With mirroring, the pointer is compared against the
    /// original center instead.
    fn update_corner(&mut self, bounds: &Bounds, pt: Point, mirror: bool) {
        if mirror {
            let center = self.initial_bounds.center();
            if pt.x >= center.x {
                self.corner = self.corner.to_east();
            }
            if pt.x <= center.x {
                self.corner = self.corner.to_west();
            }
            if pt.y >= center.y {
                self.corner = self.corner.to_south();
            }
            if pt.y <= center.y {
                self.corner = self.corner.to_north();
            }
            return;
        }

        let live = bounds.normalize();
        let compare = self.quadrant_bounds;
        let q = &mut self.quadrant_bounds;
        if live.left >= compare.right {
            self.corner = self.corner.to_east();
            *q = q.with_left_right(q.right, q.right + q.width());
        }
        if live.right <= compare.left {
            self.corner = self.corner.to_west();
            *q = q.with_left_right(q.left - q.width(), q.left);
        }
        if live.top >= compare.bottom {
            self.corner = self.corner.to_south();
            *q = q.with_top_bottom(q.bottom, q.bottom + q.height());
        }
        if live.bottom <= compare.top {
            self.corner = self.corner.to_north();
            *q = q.with_top_bottom(q.top - q.height(), q.top);
        }
    }
}

impl RotateDrag {
    /// Rotation from the grabbed handle to `pt`, measured against the start
    /// snapshot so repeated ticks at one point agree.
    fn update_angle(&mut self, pt: Point, snap: bool) -> f64 {
        let pointer_angle = angle_deg(self.initial_bounds.center(), pt);
        let mut angle = (pointer_angle - self.initial_angle) % 360.0;
        if snap {
            angle = (angle / self.snap_deg).round() * self.snap_deg;
        }
        // -0 would render as a full turn.
        if angle == 0.0 {
            angle = 0.0;
        }
        self.current_angle = angle;
        angle
    }
}

// =============================================================================
// TRANSITIONS
// =============================================================================

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::Idle
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Begin resizing `bounds` from `handle`.
    ///
    /// Only the primary button starts a gesture, and only from `Idle`.
    /// Returns whether a gesture started.
    pub fn start_resize(&mut self, handle: Corner, bounds: Bounds, button: Button, scale: f64) -> bool {
        if button != Button::Primary || self.is_dragging() {
            return false;
        }
        *self = Self::Resizing(ResizeDrag {
            handle,
            corner: handle,
            initial_bounds: bounds,
            quadrant_bounds: bounds,
            current_bounds: bounds,
            scale,
        });
        true
    }

    /// Begin rotating `bounds` from the rotate area at `handle`, grabbed at
    /// `handle_point`, snapping to `snap_deg` steps while shift is held.
    /// Same gating as [`DragSession::start_resize`]; side handles never rotate.
    pub fn start_rotate(
        &mut self,
        handle: Corner,
        handle_point: Point,
        bounds: Bounds,
        button: Button,
        scale: f64,
        snap_deg: f64,
    ) -> bool {
        if button != Button::Primary || self.is_dragging() || !handle.is_diagonal() {
            return false;
        }
        *self = Self::Rotating(RotateDrag {
            handle,
            initial_bounds: bounds,
            initial_angle: angle_deg(bounds.center(), handle_point),
            current_angle: 0.0,
            snap_deg,
            scale,
        });
        true
    }

    /// Process one pointer tick. Returns `None` when idle.
    ///
    /// Shift selects proportional resizing (also forced by any selected layer
    /// with proportional scaling) or snapped rotation steps; Alt selects
    /// mirror-on-edge resizing.
    pub fn update(&mut self, document: &Document, pointer: &Pointer) -> Option<DragUpdate> {
        let pt = pointer.point();
        match self {
            Self::Idle => None,
            Self::Resizing(drag) => {
                let selected = document.selected();
                let proportional = pointer.modifiers.shift || selected.iter().any(|l| l.proportional_scaling);
                let mirror = pointer.modifiers.alt;

                let raw = simple_drag_bounds(&drag.initial_bounds, drag.handle, pt);
                drag.update_corner(&raw, pt, mirror);
                let bounds = calculate_modified_bounds(&drag.initial_bounds, raw, drag.handle, proportional, mirror);
                drag.current_bounds = bounds;

                let has_group = selected.iter().any(|l| l.kind == LayerKind::Group);
                let plan = if has_group { None } else { Some(set_drag_bounds(document, &bounds)) };
                Some(DragUpdate::Resize { bounds, corner: drag.corner, plan })
            }
            Self::Rotating(drag) => {
                let angle = drag.update_angle(pt, pointer.modifiers.shift);
                Some(DragUpdate::Rotate { angle, center: drag.initial_bounds.center() })
            }
        }
    }

    /// Commit the gesture and return to `Idle`.
    ///
    /// Returns `None` when no gesture is active.
    pub fn finish(&mut self, document: &Document) -> Option<TransformPlan> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Resizing(drag) => Some(set_bounds(document, &drag.initial_bounds, &drag.current_bounds)),
            Self::Rotating(drag) => Some(rotate(document, drag.current_angle)),
        }
    }

    /// Drop the gesture without committing anything.
    pub fn destroy(&mut self) {
        *self = Self::Idle;
    }

    /// Overlay geometry for the active gesture.
    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        match self {
            Self::Idle => None,
            Self::Resizing(drag) => Some(Overlay {
                bounds: drag.current_bounds,
                angle: 0.0,
                center: drag.current_bounds.center(),
                active: drag.corner,
                handles: handle_set(&drag.current_bounds, drag.scale),
            }),
            Self::Rotating(drag) => Some(Overlay {
                bounds: drag.initial_bounds,
                angle: drag.current_angle,
                center: drag.initial_bounds.center(),
                active: drag.handle,
                handles: handle_set(&drag.initial_bounds, drag.scale),
            }),
        }
    }
}
