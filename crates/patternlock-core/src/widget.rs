//! The pattern widget: gesture tracking and the finish-callback protocol.
//!
//! All mutation happens on the host's event thread in response to pointer
//! events. The only deferred work is the post-gesture reset, modeled as a
//! generation-tagged deadline the host polls; a reset scheduled for an
//! older gesture never touches the state of a newer one.

use crate::grid::{GridConfig, GridError, GridLayout};
use crate::input::PointerEvent;
use crate::snapshot::{PatternSnapshot, SnapshotError};
use kurbo::Point;
use peniko::Color;
use std::time::{Duration, Instant};

/// How long a finished gesture stays visible while input is locked out.
pub const DEFAULT_HOLD_INTERVAL: Duration = Duration::from_millis(1000);

/// Join the selected indices with dashes: `[0, 1, 2]` becomes `"0-1-2"`.
pub fn serialize_cells(cells: &[usize]) -> String {
    let mut out = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(&cell.to_string());
    }
    out
}

/// Read-only view over one completed gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureResult {
    cells: Vec<usize>,
    serialized: String,
}

impl GestureResult {
    fn new(cells: &[usize]) -> Self {
        Self {
            cells: cells.to_vec(),
            serialized: serialize_cells(cells),
        }
    }

    /// Cell indices in the order they were touched.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// The canonical dash-joined form, e.g. `"0-1-2-3"`.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Number of cells in the gesture.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the gesture touched no cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Callback invoked when a gesture completes.
///
/// Returning `false` switches the widget into the error display state for
/// the hold interval; the widget does not otherwise interpret the value.
pub trait OnFinish {
    fn on_finish(&mut self, result: &GestureResult) -> bool;
}

impl<F: FnMut(&GestureResult) -> bool> OnFinish for F {
    fn on_finish(&mut self, result: &GestureResult) -> bool {
        self(result)
    }
}

/// Widget construction options.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Lattice geometry.
    pub grid: GridConfig,
    /// Draw connecting lines between selected cells outside setup mode.
    pub show_path: bool,
    /// Cell outline and path color.
    pub cell_color: Color,
    /// Color of the selected path while a rejected result is shown.
    pub error_color: Color,
    /// Lockout and display-hold duration after a finished gesture.
    pub hold_interval: Duration,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            show_path: true,
            cell_color: Color::from_rgba8(255, 255, 255, 255),
            error_color: Color::from_rgba8(255, 68, 68, 255),
            hold_interval: DEFAULT_HOLD_INTERVAL,
        }
    }
}

/// A reset deadline tagged with the gesture it was scheduled for.
#[derive(Debug, Clone, Copy)]
struct PendingReset {
    due: Instant,
    generation: u64,
}

/// A grid of selectable dots traced with one continuous gesture.
///
/// The host feeds [`PointerEvent`]s in, polls [`poll_reset`] from its
/// event loop, and reacts to the registered [`OnFinish`] listener.
///
/// [`poll_reset`]: PatternWidget::poll_reset
pub struct PatternWidget {
    config: PatternConfig,
    layout: Option<GridLayout>,
    container: Option<(f64, f64)>,
    /// Touched flag per cell, row-major.
    cell_status: Vec<bool>,
    /// Cell indices in the order they were touched.
    selected_cells: Vec<usize>,
    /// Live pointer position once the gesture has touched a cell.
    touch_point: Option<Point>,
    is_error: bool,
    showing_result: bool,
    is_setup: bool,
    tracking: bool,
    generation: u64,
    pending_reset: Option<PendingReset>,
    listener: Option<Box<dyn OnFinish>>,
    needs_redraw: bool,
}

impl std::fmt::Debug for PatternWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternWidget")
            .field("selected_cells", &self.selected_cells)
            .field("is_error", &self.is_error)
            .field("showing_result", &self.showing_result)
            .field("is_setup", &self.is_setup)
            .field("tracking", &self.tracking)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl PatternWidget {
    /// Create a widget. Call [`set_layout`](Self::set_layout) before
    /// feeding events.
    pub fn new(config: PatternConfig) -> Self {
        let cell_count = config.grid.base_count * config.grid.base_count;
        Self {
            config,
            layout: None,
            container: None,
            cell_status: vec![false; cell_count],
            selected_cells: Vec::new(),
            touch_point: None,
            is_error: false,
            showing_result: false,
            is_setup: false,
            tracking: false,
            generation: 0,
            pending_reset: None,
            listener: None,
            needs_redraw: false,
        }
    }

    /// Resolve the grid against a container size.
    ///
    /// A grid that does not fit is a fatal configuration error; the widget
    /// keeps no partial layout in that case.
    pub fn set_layout(&mut self, width: f64, height: f64) -> Result<(), GridError> {
        self.layout = Some(GridLayout::new(&self.config.grid, width, height)?);
        self.container = Some((width, height));
        self.needs_redraw = true;
        Ok(())
    }

    /// Change the base count, recomputing the radius from the container.
    ///
    /// Clears any in-progress gesture; the old indices are meaningless on
    /// the new lattice.
    pub fn set_base_count(&mut self, count: usize) -> Result<(), GridError> {
        self.config.grid.base_count = count;
        self.config.grid.radius = None;
        self.cell_status = vec![false; count * count];
        self.selected_cells.clear();
        self.touch_point = None;
        self.tracking = false;
        if let Some((width, height)) = self.container {
            self.layout = Some(GridLayout::new(&self.config.grid, width, height)?);
        }
        self.needs_redraw = true;
        Ok(())
    }

    /// Register the finish listener, replacing any previous one.
    pub fn set_on_finish(&mut self, listener: impl OnFinish + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Whether the widget is registering a new pattern.
    pub fn is_setup(&self) -> bool {
        self.is_setup
    }

    /// Toggle setup mode. Affects only whether path lines and direction
    /// markers render when path display is otherwise disabled.
    pub fn set_setup(&mut self, is_setup: bool) {
        self.is_setup = is_setup;
    }

    /// Whether connecting lines are drawn outside setup mode.
    pub fn show_path(&self) -> bool {
        self.config.show_path
    }

    pub fn set_show_path(&mut self, show_path: bool) {
        self.config.show_path = show_path;
    }

    /// The resolved layout, if [`set_layout`](Self::set_layout) succeeded.
    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn cell_color(&self) -> Color {
        self.config.cell_color
    }

    pub fn error_color(&self) -> Color {
        self.config.error_color
    }

    /// Cell indices in the order they were touched this gesture.
    pub fn selected_cells(&self) -> &[usize] {
        &self.selected_cells
    }

    /// Touched flag per cell, row-major.
    pub fn cell_status(&self) -> &[bool] {
        &self.cell_status
    }

    /// Live pointer position, present once the gesture touched a cell.
    pub fn touch_point(&self) -> Option<Point> {
        self.touch_point
    }

    /// Whether a rejected result is currently displayed.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Whether the post-gesture hold interval is active.
    pub fn is_showing_result(&self) -> bool {
        self.showing_result
    }

    /// Consume the pending redraw request, if any.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Feed a pointer event. Returns whether the event was consumed.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> bool {
        self.poll_reset(now);
        if self.layout.is_none() {
            log::warn!("pointer event before layout, ignoring");
            return false;
        }

        match event {
            PointerEvent::Down { position } => {
                if self.showing_result {
                    // Input lockout until the hold interval elapses.
                    return false;
                }
                self.begin_gesture();
                self.track(position);
                true
            }
            PointerEvent::Move { position } => {
                if !self.tracking {
                    return false;
                }
                self.track(position);
                true
            }
            PointerEvent::Up { position } => {
                if !self.tracking {
                    return false;
                }
                self.track(position);
                self.finish(now);
                true
            }
        }
    }

    /// Fire the scheduled reset if it is due.
    ///
    /// Call from the host's event loop. A pending reset tagged with an
    /// older gesture generation is dropped without touching state.
    pub fn poll_reset(&mut self, now: Instant) {
        let Some(pending) = self.pending_reset else {
            return;
        };
        if now < pending.due {
            return;
        }
        self.pending_reset = None;
        if pending.generation != self.generation {
            log::debug!("dropping stale reset for gesture {}", pending.generation);
            return;
        }
        self.reset();
        self.needs_redraw = true;
    }

    /// Snapshot the gesture-scoped state.
    pub fn save_state(&self) -> PatternSnapshot {
        PatternSnapshot {
            selected_cells: self.selected_cells.clone(),
            cell_status: self.cell_status.clone(),
        }
    }

    /// Restore a snapshot taken from a widget with the same base count.
    pub fn restore_state(&mut self, snapshot: PatternSnapshot) -> Result<(), SnapshotError> {
        if snapshot.cell_status.len() != self.cell_status.len() {
            return Err(SnapshotError::LengthMismatch {
                expected: self.cell_status.len(),
                found: snapshot.cell_status.len(),
            });
        }
        self.selected_cells = snapshot.selected_cells;
        self.cell_status = snapshot.cell_status;
        self.needs_redraw = true;
        Ok(())
    }

    /// Start a fresh gesture: clear gesture state, cancel any pending
    /// reset and advance the generation so a stale one can never fire.
    fn begin_gesture(&mut self) {
        self.reset();
        self.pending_reset = None;
        self.generation += 1;
        self.tracking = true;
        self.needs_redraw = true;
    }

    /// Clear all gesture-scoped state.
    fn reset(&mut self) {
        self.selected_cells.clear();
        self.cell_status.fill(false);
        self.touch_point = None;
        self.is_error = false;
        self.showing_result = false;
    }

    /// Hit-test the position and update the selection and live touch
    /// point. The touch point only goes live once a cell has been hit, so
    /// no rubber-band line renders for a gesture that never touched one.
    fn track(&mut self, position: Point) {
        let hit = self.layout.as_ref().and_then(|layout| layout.hit_test(position));
        if let Some(index) = hit {
            if !self.cell_status[index] {
                self.cell_status[index] = true;
                self.selected_cells.push(index);
                self.touch_point = Some(position);
                log::debug!("cell {index} selected");
            }
        }
        if self.touch_point.is_some() {
            self.touch_point = Some(position);
            self.needs_redraw = true;
        }
    }

    /// Finish the gesture: notify the listener (at most once, and only
    /// when a cell was touched) and schedule the hold-interval reset.
    fn finish(&mut self, now: Instant) {
        self.tracking = false;
        self.showing_result = true;

        if self.listener.is_some() && self.touch_point.is_some() {
            let result = GestureResult::new(&self.selected_cells);
            let accepted = self
                .listener
                .as_mut()
                .map(|listener| listener.on_finish(&result))
                .unwrap_or(true);
            if !accepted {
                self.is_error = true;
            }
        }
        self.needs_redraw = true;
        self.pending_reset = Some(PendingReset {
            due: now + self.config.hold_interval,
            generation: self.generation,
        });
    }
}
