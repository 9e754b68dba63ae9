//! Grid geometry and hit testing for the pattern lattice.
//!
//! Pure coordinate math: cell index to pixel center, pointer position to
//! cell index, and the direction angle between two cells. No gesture or
//! render state lives here.

use kurbo::Point;
use thiserror::Error;

/// Default base count (the grid is base count squared cells).
pub const DEFAULT_CELL_BASE_COUNT: usize = 3;

/// Default spacing between two neighbouring cells.
pub const DEFAULT_CELL_SPACING: f64 = 32.0;

/// Default stroke width for cell outlines and path lines.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Layout errors. Insufficient space is a fatal configuration error:
/// the widget cannot render a partial grid.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("not enough space for drawing the cells: {available:.1}px available for base count {base_count}")]
    InsufficientSpace { available: f64, base_count: usize },
    #[error("cell base count must be at least 1")]
    InvalidBaseCount,
}

/// Grid configuration prior to layout resolution.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Base count N; the grid has N * N cells.
    pub base_count: usize,
    /// Padding around the lattice.
    pub padding: f64,
    /// Requested spacing between two cells. May shrink during layout when
    /// an explicit radius leaves less room than requested.
    pub spacing: f64,
    /// Explicit cell radius, or `None` to derive it from the container.
    pub radius: Option<f64>,
    /// Stroke width for outlines and lines.
    pub stroke_width: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_count: DEFAULT_CELL_BASE_COUNT,
            padding: 0.0,
            spacing: DEFAULT_CELL_SPACING,
            radius: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Geometry resolved against a concrete container size.
///
/// Immutable per layout pass; rebuilt on reconfiguration or when the
/// container size changes.
#[derive(Debug, Clone)]
pub struct GridLayout {
    base_count: usize,
    padding: f64,
    spacing: f64,
    radius: f64,
    stroke_width: f64,
    center_offset: f64,
    width: f64,
    height: f64,
}

impl GridLayout {
    /// Resolve a configuration against a container size.
    ///
    /// With no explicit radius the cells fill the remaining space after
    /// padding and spacing. With an explicit radius the spacing shrinks to
    /// fit if needed; cells that do not fit at all are a hard error.
    pub fn new(config: &GridConfig, width: f64, height: f64) -> Result<Self, GridError> {
        if config.base_count == 0 {
            return Err(GridError::InvalidBaseCount);
        }

        let n = config.base_count as f64;
        let size = width.min(height);
        let mut spacing = config.spacing;
        let radius;
        let center_offset;

        match config.radius {
            None => {
                let remaining = size - 2.0 * config.padding - spacing * (n - 1.0);
                if remaining <= 0.0 {
                    return Err(GridError::InsufficientSpace {
                        available: remaining,
                        base_count: config.base_count,
                    });
                }
                radius = remaining / (2.0 * n);
                // Center the lattice horizontally when the container is wider
                // than it is tall.
                center_offset = if height <= width { (width - height) / 2.0 } else { 0.0 };
            }
            Some(r) => {
                radius = r;
                let cells_used = 2.0 * radius * n;
                let available = size - 2.0 * config.padding;
                if cells_used > available {
                    return Err(GridError::InsufficientSpace {
                        available,
                        base_count: config.base_count,
                    });
                }

                let remaining_spacing = available - cells_used;
                if remaining_spacing < spacing * (n - 1.0) && config.base_count > 1 {
                    spacing = remaining_spacing / (n - 1.0);
                }
                center_offset =
                    (width - cells_used - spacing * (n - 1.0)) / 2.0 - config.padding;
            }
        }

        Ok(Self {
            base_count: config.base_count,
            padding: config.padding,
            spacing,
            radius,
            stroke_width: config.stroke_width,
            center_offset,
            width,
            height,
        })
    }

    /// The base count N of the N * N lattice.
    pub fn base_count(&self) -> usize {
        self.base_count
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.base_count * self.base_count
    }

    /// The resolved cell radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The resolved spacing between two cells.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Stroke width for outlines and lines.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Distance between the centers of two neighbouring cells.
    fn pitch(&self) -> f64 {
        2.0 * self.radius + self.spacing
    }

    /// Pixel center of a cell, row-major indexing.
    pub fn cell_center(&self, index: usize) -> Point {
        let row = (index / self.base_count) as f64;
        let col = (index % self.base_count) as f64;
        Point::new(
            self.padding + self.center_offset + col * self.pitch() + self.radius,
            self.padding + row * self.pitch() + self.radius,
        )
    }

    /// Map a pointer position to the cell containing it.
    ///
    /// Positions outside the padded bounding box, past the last row or
    /// column, or inside the inter-cell gap resolve to `None`. The gap
    /// check keeps a finger sliding between dots from selecting either.
    pub fn hit_test(&self, position: Point) -> Option<usize> {
        if position.x < self.padding + self.center_offset
            || position.x > self.width - self.padding - self.center_offset
            || position.y < self.padding
            || position.y > self.height - self.padding
        {
            return None;
        }

        let pitch = self.pitch();
        let diameter = 2.0 * self.radius;

        let y_offset = position.y - self.padding;
        let row = (y_offset / pitch).floor() as usize;
        if row >= self.base_count || y_offset % pitch > diameter {
            return None;
        }

        let x_offset = position.x - self.padding - self.center_offset;
        let col = (x_offset / pitch).floor() as usize;
        if col >= self.base_count || x_offset % pitch > diameter {
            return None;
        }

        Some(row * self.base_count + col)
    }

    /// Direction angle from one cell's center to another's, in screen
    /// coordinates: 0 points right, +PI/2 points down (y grows downward),
    /// PI points left, -PI/2 points up.
    pub fn angle_between(&self, from: usize, to: usize) -> f64 {
        let a = self.cell_center(from);
        let b = self.cell_center(to);
        (b.y - a.y).atan2(b.x - a.x)
    }
}
