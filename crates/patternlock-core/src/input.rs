//! Pointer events consumed by the pattern widget.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A single-pointer touch event.
///
/// One gesture is the sequence Down, zero or more Moves, Up. The widget
/// ignores Move and Up events that arrive without a preceding Down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    /// The pointer position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}
