//! Transform overlay handle geometry and pointer hit-testing.
//!
//! Eight resize anchors sit on the corners and edge midpoints of the
//! selection. Each corner also owns a quarter-ring rotate area facing away
//! from the selection. Radii are defined in rem and scaled by the overlay
//! scale (1 / zoom) so handles keep a constant on-screen size.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, Point};
use crate::consts::{ANCHOR_RADIUS_REM, ROOT_SIZE_PX, ROTATE_INNER_REM, ROTATE_OUTER_REM};
use crate::input::Corner;

/// A resize anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub corner: Corner,
    pub point: Point,
}

/// Quarter-ring around a corner that starts a rotation.
///
/// Angles are degrees clockwise from north, covering `[start_deg, end_deg)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotateArea {
    pub corner: Corner,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl RotateArea {
    fn contains(&self, pt: Point) -> bool {
        let distance = self.center.distance(pt);
        if distance < self.inner_radius || distance > self.outer_radius {
            return false;
        }
        let bearing = (pt.x - self.center.x).atan2(self.center.y - pt.y).to_degrees().rem_euclid(360.0);
        bearing >= self.start_deg && bearing < self.end_deg
    }
}

/// Every handle drawn for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleSet {
    pub anchor_radius: f64,
    pub resize: Vec<Handle>,
    pub rotate: Vec<RotateArea>,
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitPart {
    Resize(Handle),
    Rotate(RotateArea),
}

fn quadrant(corner: Corner) -> (f64, f64) {
    match corner {
        Corner::Ne => (0.0, 90.0),
        Corner::Se => (90.0, 180.0),
        Corner::Sw => (180.0, 270.0),
        _ => (270.0, 360.0),
    }
}

/// Handle geometry for `bounds` at overlay `scale`. Empty bounds get none.
#[must_use]
pub fn handle_set(bounds: &Bounds, scale: f64) -> HandleSet {
    if bounds.is_empty() {
        return HandleSet::default();
    }
    let bounds = bounds.normalize();
    let resize = Corner::ALL.iter().map(|&corner| Handle { corner, point: corner.position_on(&bounds) }).collect();
    let rotate = Corner::DIAGONALS
        .iter()
        .map(|&corner| {
            let (start_deg, end_deg) = quadrant(corner);
            RotateArea {
                corner,
                center: corner.position_on(&bounds),
                inner_radius: ROOT_SIZE_PX * ROTATE_INNER_REM * scale,
                outer_radius: ROOT_SIZE_PX * ROTATE_OUTER_REM * scale,
                start_deg,
                end_deg,
            }
        })
        .collect();
    HandleSet { anchor_radius: ROOT_SIZE_PX * ANCHOR_RADIUS_REM * scale, resize, rotate }
}

/// Find the handle under `pt`. Resize anchors win over rotate areas, and the
/// nearest anchor wins when several overlap.
#[must_use]
pub fn hit_test(pt: Point, bounds: &Bounds, scale: f64) -> Option<HitPart> {
    let handles = handle_set(bounds, scale);
    let nearest = handles
        .resize
        .iter()
        .map(|h| (h, h.point.distance(pt)))
        .filter(|(_, d)| *d <= handles.anchor_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((handle, _)) = nearest {
        return Some(HitPart::Resize(*handle));
    }
    handles.rotate.iter().find(|area| area.contains(pt)).map(|area| HitPart::Rotate(*area))
}
