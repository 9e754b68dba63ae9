//! Pattern Lock Core Library
//!
//! Platform-agnostic grid geometry, gesture tracking and the
//! finish-callback protocol for the pattern lock widget.

pub mod grid;
pub mod input;
pub mod snapshot;
pub mod widget;

pub use grid::{GridConfig, GridError, GridLayout};
pub use input::PointerEvent;
pub use snapshot::{PatternSnapshot, SnapshotError};
pub use widget::{
    DEFAULT_HOLD_INTERVAL, GestureResult, OnFinish, PatternConfig, PatternWidget,
    serialize_cells,
};
