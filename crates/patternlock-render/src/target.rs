//! Render target abstraction.
//!
//! The widget's frame is expressed through a small capability set;
//! concrete backends (GPU scene builders, software rasterizers, test
//! recorders) implement [`RenderTarget`].

use kurbo::{BezPath, Point};
use peniko::Color;

/// A single drawing primitive issued by the pattern renderer.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    FillPath {
        path: BezPath,
        color: Color,
    },
}

/// Capability set any concrete rendering backend implements.
pub trait RenderTarget {
    /// Outlined circle.
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color);

    /// Filled circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Straight line segment.
    fn draw_line(&mut self, from: Point, to: Point, width: f64, color: Color);

    /// Filled closed path.
    fn fill_path(&mut self, path: &BezPath, color: Color);
}

/// Render target that records commands instead of rasterizing.
///
/// The recorded command list is the unit under test for rendering logic,
/// and doubles as a replayable frame for any real backend.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far, in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl RenderTarget for CommandRecorder {
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }
}
