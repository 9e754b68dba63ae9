//! Stateless cell drawable.
//!
//! One dot of the lattice as a pure function over its visual parameters:
//! no shared state with the widget, every call emits the same fixed set of
//! commands for the same input.

use crate::target::RenderTarget;
use kurbo::{BezPath, Point};
use peniko::Color;

/// Visual parameters for a single cell.
#[derive(Debug, Clone, Copy)]
pub struct CellVisual {
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
    /// Selected cells gain a filled inner circle.
    pub selected: bool,
    /// Direction toward the next cell in the path, when a direction marker
    /// should render.
    pub angle: Option<f64>,
    pub color: Color,
}

/// Inner circle radius of a selected cell.
pub fn inner_radius(radius: f64) -> f64 {
    radius / 3.0
}

/// Emit the draw commands for one cell.
pub fn draw_cell<T: RenderTarget + ?Sized>(target: &mut T, cell: &CellVisual) {
    if cell.selected {
        target.fill_circle(cell.center, inner_radius(cell.radius), cell.color);
    }
    target.stroke_circle(cell.center, cell.radius, cell.stroke_width, cell.color);
    if let Some(angle) = cell.angle {
        draw_direction_marker(target, cell, angle);
    }
}

/// Filled triangle pointing from the cell toward the next one.
///
/// Suppressed when the radial space between the inner circle and the
/// outline is too small for non-degenerate geometry.
fn draw_direction_marker<T: RenderTarget + ?Sized>(target: &mut T, cell: &CellVisual, angle: f64) {
    let inner = inner_radius(cell.radius);
    if cell.radius - inner <= cell.stroke_width {
        return;
    }

    let height = (cell.radius - cell.stroke_width - inner) / 3.0;
    if height < cell.stroke_width {
        return;
    }

    // Apex sits two triangle heights past the inner circle; the base
    // vertices fan out symmetrically for an equilateral-ish shape.
    let apex_distance = 2.0 * height + inner;
    let base_spread = (height / 3f64.sqrt() / (apex_distance - height)).atan();
    let base_distance =
        (height * height / 3.0 + (apex_distance - height) * (apex_distance - height)).sqrt();

    let vertex = |distance: f64, theta: f64| {
        Point::new(
            cell.center.x + distance * theta.cos(),
            cell.center.y + distance * theta.sin(),
        )
    };

    let mut path = BezPath::new();
    path.move_to(vertex(apex_distance, angle));
    path.line_to(vertex(base_distance, angle + base_spread));
    path.line_to(vertex(base_distance, angle - base_spread));
    path.close_path();
    target.fill_path(&path, cell.color);
}
