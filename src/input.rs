//! Input model: handle keys, mouse buttons, modifier keys, and pointer ticks.
//!
//! These are the types a pointer-event source feeds into the drag session.
//! They carry no behavior beyond small classification helpers.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, Point};

/// One of the eight handle positions around a selection.
///
/// Resizing may use any of the eight; rotation only uses the four diagonal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Corner {
    /// All eight keys, clockwise from the top-left.
    pub const ALL: [Corner; 8] = [
        Corner::Nw,
        Corner::N,
        Corner::Ne,
        Corner::E,
        Corner::Se,
        Corner::S,
        Corner::Sw,
        Corner::W,
    ];

    /// The four diagonal keys used by rotate areas.
    pub const DIAGONALS: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    /// Corner keys; the only ones a rotation can start from.
    #[must_use]
    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::Nw | Self::Ne | Self::Se | Self::Sw)
    }

    /// Replace a west component with east (`nw` -> `ne`, `w` -> `e`).
    #[must_use]
    pub fn to_east(self) -> Self {
        match self {
            Self::W => Self::E,
            Self::Nw => Self::Ne,
            Self::Sw => Self::Se,
            other => other,
        }
    }

    /// Replace an east component with west.
    #[must_use]
    pub fn to_west(self) -> Self {
        match self {
            Self::E => Self::W,
            Self::Ne => Self::Nw,
            Self::Se => Self::Sw,
            other => other,
        }
    }

    /// Replace a north component with south.
    #[must_use]
    pub fn to_south(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::Ne => Self::Se,
            Self::Nw => Self::Sw,
            other => other,
        }
    }

    /// Replace a south component with north.
    #[must_use]
    pub fn to_north(self) -> Self {
        match self {
            Self::S => Self::N,
            Self::Se => Self::Ne,
            Self::Sw => Self::Nw,
            other => other,
        }
    }

    /// Where this handle sits on `bounds`.
    #[must_use]
    pub fn position_on(self, bounds: &Bounds) -> Point {
        let (xc, yc) = (bounds.x_center(), bounds.y_center());
        match self {
            Self::Nw => Point::new(bounds.left, bounds.top),
            Self::N => Point::new(xc, bounds.top),
            Self::Ne => Point::new(bounds.right, bounds.top),
            Self::E => Point::new(bounds.right, yc),
            Self::Se => Point::new(bounds.right, bounds.bottom),
            Self::S => Point::new(xc, bounds.bottom),
            Self::Sw => Point::new(bounds.left, bounds.bottom),
            Self::W => Point::new(bounds.left, yc),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Keyboard modifier keys held during a pointer event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift: proportional resize, snapped rotation steps, big nudge.
    pub shift: bool,
    /// Alt / Option: mirror-on-edge resize.
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

/// A single pointer tick in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
    pub button: Button,
}

impl Pointer {
    /// A primary-button pointer with no modifiers held.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, modifiers: Modifiers::default(), button: Button::Primary }
    }

    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    #[must_use]
    pub fn with_button(self, button: Button) -> Self {
        Self { button, ..self }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Keyboard nudge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map an arrow-key name as reported by the browser (`"ArrowUp"`, ...).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit vector for this direction, y growing downward.
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}
