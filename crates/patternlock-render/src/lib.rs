//! Pattern Lock Render Library
//!
//! Render target abstraction and frame assembly for the pattern lock
//! widget. Backends implement [`RenderTarget`]; the bundled
//! [`CommandRecorder`] records the issued commands for tests and replay.

mod cell;
mod scene;
mod target;

pub use cell::{CellVisual, draw_cell, inner_radius};
pub use scene::render_pattern;
pub use target::{CommandRecorder, DrawCommand, RenderTarget};
