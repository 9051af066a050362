//! Engine facade: configuration plus the one active drag session.
//!
//! Pointer events are routed into [`DragSession`] after hit-testing the
//! current selection's handles. Menu and keyboard commands that act on the
//! current selection go straight to the pure command functions. Nothing here
//! talks to the host; every entry point returns a [`TransformPlan`] for a
//! [`crate::dispatch::Dispatcher`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info, warn};

use crate::arrange::{align, distribute, flip, swap_selected};
use crate::bounds::Bounds;
use crate::config::EngineConfig;
use crate::doc::Document;
use crate::error::TransformError;
use crate::hit::{HandleSet, HitPart, handle_set, hit_test};
use crate::input::{Direction, Pointer};
use crate::nudge::nudge;
use crate::payload::{AlignEdge, DistributeAxis, FlipAxis, TransformPlan};
use crate::session::{DragSession, DragUpdate, Overlay};
use crate::transform::{rotate, set_radius};

/// Union of the selected layers' content bounds.
#[must_use]
pub fn selection_bounds(document: &Document) -> Option<Bounds> {
    document
        .selected()
        .into_iter()
        .filter_map(|l| document.layers.child_bounds(l))
        .reduce(|acc, b| acc.union(&b))
}

/// Interactive transform state for one overlay.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    config: EngineConfig,
    session: DragSession,
}

impl TransformEngine {
    /// # Errors
    ///
    /// Returns [`TransformError::Config`] when `config` fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, TransformError> {
        config.validate()?;
        Ok(Self { config, session: DragSession::Idle })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// Track a zoom change; takes effect for the next gesture.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > 0.0 && zoom.is_finite() {
            self.config.handle_scale = 1.0 / zoom;
        } else {
            warn!(zoom, "ignoring invalid zoom");
        }
    }

    /// Handles to draw for the idle selection.
    #[must_use]
    pub fn handles(&self, document: &Document) -> HandleSet {
        selection_bounds(document).map_or_else(HandleSet::default, |b| handle_set(&b, self.config.handle_scale))
    }

    /// Overlay geometry while a gesture is active.
    #[must_use]
    pub fn overlay(&self) -> Option<Overlay> {
        self.session.overlay()
    }

    // -------------------------------------------------------------------------
    // Pointer routing
    // -------------------------------------------------------------------------

    /// Start a gesture if `pointer` lands on a handle of the selection.
    /// Returns whether a gesture started.
    pub fn pointer_down(&mut self, document: &Document, pointer: &Pointer) -> bool {
        let Some(bounds) = selection_bounds(document) else {
            return false;
        };
        let scale = self.config.handle_scale;
        let (corner, started) = match hit_test(pointer.point(), &bounds, scale) {
            Some(HitPart::Resize(handle)) => {
                (handle.corner, self.session.start_resize(handle.corner, bounds, pointer.button, scale))
            }
            Some(HitPart::Rotate(area)) => (
                area.corner,
                self.session.start_rotate(
                    area.corner,
                    area.center,
                    bounds,
                    pointer.button,
                    scale,
                    self.config.rotate_snap_deg,
                ),
            ),
            None => return false,
        };
        if started {
            debug!(handle = corner.as_str(), x = pointer.x, y = pointer.y, "transform gesture started");
        }
        started
    }

    pub fn pointer_move(&mut self, document: &Document, pointer: &Pointer) -> Option<DragUpdate> {
        self.session.update(document, pointer)
    }

    /// Commit the active gesture. `None` when nothing was being dragged.
    pub fn pointer_up(&mut self, document: &Document) -> Option<TransformPlan> {
        let plan = self.session.finish(document)?;
        info!(command = plan.command.history_name(), requests = plan.requests.len(), "transform gesture committed");
        Some(plan)
    }

    /// Abandon the active gesture without committing.
    pub fn cancel(&mut self) {
        if self.session.is_dragging() {
            debug!("transform gesture cancelled");
        }
        self.session.destroy();
    }

    // -------------------------------------------------------------------------
    // Current-selection commands
    // -------------------------------------------------------------------------

    /// Arrow-key nudge. Unknown keys produce `None`.
    #[must_use]
    pub fn nudge_key(&self, document: &Document, key: &str, shift: bool) -> Option<TransformPlan> {
        let direction = Direction::from_key(key)?;
        Some(self.nudge(document, direction, shift))
    }

    #[must_use]
    pub fn nudge(&self, document: &Document, direction: Direction, big_step: bool) -> TransformPlan {
        nudge(document, direction, big_step, self.config.nudge)
    }

    #[must_use]
    pub fn swap_selected(&self, document: &Document) -> TransformPlan {
        swap_selected(document, self.config.swap_sensitivity)
    }

    /// # Errors
    ///
    /// Returns [`TransformError::InvalidInput`] for an empty or background-only selection.
    pub fn align_selected(&self, document: &Document, edge: AlignEdge) -> Result<TransformPlan, TransformError> {
        align(document, &document.selected(), edge)
    }

    /// # Errors
    ///
    /// Same conditions as [`TransformEngine::align_selected`].
    pub fn distribute_selected(
        &self,
        document: &Document,
        axis: DistributeAxis,
    ) -> Result<TransformPlan, TransformError> {
        distribute(document, &document.selected(), axis)
    }

    /// # Errors
    ///
    /// Same conditions as [`TransformEngine::align_selected`].
    pub fn flip_selected(&self, document: &Document, axis: FlipAxis) -> Result<TransformPlan, TransformError> {
        flip(document, &document.selected(), axis)
    }

    #[must_use]
    pub fn rotate_selected(&self, document: &Document, angle: f64) -> TransformPlan {
        rotate(document, angle)
    }

    #[must_use]
    pub fn set_radius_selected(&self, document: &Document, radius: f64, coalesce: bool) -> TransformPlan {
        set_radius(document, &document.selected(), radius, coalesce)
    }
}
