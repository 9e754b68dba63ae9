//! Frame assembly for the pattern widget.
//!
//! Two passes per frame: unselected dots first, then the selected path
//! with its connecting lines, inner circles and direction markers.

use crate::cell::{CellVisual, draw_cell};
use crate::target::RenderTarget;
use patternlock_core::{GridLayout, PatternWidget};
use peniko::Color;

/// Issue the widget's current frame to a render target.
///
/// Renders nothing when the widget has no resolved layout.
pub fn render_pattern<T: RenderTarget + ?Sized>(widget: &PatternWidget, target: &mut T) {
    let Some(layout) = widget.layout() else {
        return;
    };
    draw_unselected_cells(widget, layout, target);
    draw_selected_cells(widget, layout, target);
}

fn draw_unselected_cells<T: RenderTarget + ?Sized>(
    widget: &PatternWidget,
    layout: &GridLayout,
    target: &mut T,
) {
    for (index, &selected) in widget.cell_status().iter().enumerate() {
        if selected {
            continue;
        }
        draw_cell(
            target,
            &CellVisual {
                center: layout.cell_center(index),
                radius: layout.radius(),
                stroke_width: layout.stroke_width(),
                selected: false,
                angle: None,
                color: widget.cell_color(),
            },
        );
    }
}

fn draw_selected_cells<T: RenderTarget + ?Sized>(
    widget: &PatternWidget,
    layout: &GridLayout,
    target: &mut T,
) {
    let show_lines = widget.show_path() || widget.is_setup();
    let color = path_color(widget);
    let selected = widget.selected_cells();

    for (i, &index) in selected.iter().enumerate() {
        let center = layout.cell_center(index);
        let mut angle = None;

        if let Some(&next) = selected.get(i + 1) {
            // Direction markers only matter while registering a pattern or
            // showing a rejected one.
            if widget.is_setup() || widget.is_error() {
                angle = Some(layout.angle_between(index, next));
            }
            if show_lines {
                target.draw_line(center, layout.cell_center(next), layout.stroke_width(), color);
            }
        } else if let Some(touch) = widget.touch_point() {
            // Rubber-band line from the last cell to the live pointer.
            if show_lines {
                target.draw_line(center, touch, layout.stroke_width(), color);
            }
        }

        draw_cell(
            target,
            &CellVisual {
                center,
                radius: layout.radius(),
                stroke_width: layout.stroke_width(),
                selected: true,
                angle,
                color,
            },
        );
    }
}

fn path_color(widget: &PatternWidget) -> Color {
    if widget.is_error() {
        widget.error_color()
    } else {
        widget.cell_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{CommandRecorder, DrawCommand};
    use patternlock_core::{GestureResult, PatternConfig, PatternWidget, PointerEvent};
    use std::time::Instant;

    fn widget() -> PatternWidget {
        let mut widget = PatternWidget::new(PatternConfig::default());
        widget.set_layout(480.0, 480.0).unwrap();
        widget
    }

    fn trace(widget: &mut PatternWidget, cells: &[usize], finish: bool) {
        let layout = widget.layout().unwrap().clone();
        let now = Instant::now();
        let mut positions = cells.iter().map(|&c| layout.cell_center(c));
        let first = positions.next().unwrap();
        widget.handle_pointer(PointerEvent::Down { position: first }, now);
        let mut last = first;
        for position in positions {
            widget.handle_pointer(PointerEvent::Move { position }, now);
            last = position;
        }
        if finish {
            widget.handle_pointer(PointerEvent::Up { position: last }, now);
        }
    }

    fn count_lines(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    fn count_markers(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath { .. }))
            .count()
    }

    #[test]
    fn test_idle_frame_is_all_outlines() {
        let widget = widget();
        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);

        let commands = recorder.commands();
        assert_eq!(commands.len(), 9);
        assert!(
            commands
                .iter()
                .all(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
        );
    }

    #[test]
    fn test_unlaid_out_widget_renders_nothing() {
        let widget = PatternWidget::new(PatternConfig::default());
        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);
        assert!(recorder.commands().is_empty());
    }

    #[test]
    fn test_selected_path_with_rubber_band() {
        let mut widget = widget();
        trace(&mut widget, &[0, 1, 2], false);

        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);
        let commands = recorder.commands();

        // 6 unselected outlines + 3 selected (inner fill + outline each),
        // 2 connecting lines + 1 rubber-band line to the touch point.
        assert_eq!(count_lines(commands), 3);
        let outlines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count();
        assert_eq!(outlines, 9);
        let fills = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(fills, 3);
    }

    #[test]
    fn test_lines_hidden_without_show_path() {
        let mut widget = widget();
        widget.set_show_path(false);
        trace(&mut widget, &[0, 1, 2], false);

        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);
        assert_eq!(count_lines(recorder.commands()), 0);
        assert_eq!(count_markers(recorder.commands()), 0);

        // Setup mode re-enables both lines and direction markers.
        widget.set_setup(true);
        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);
        assert_eq!(count_lines(recorder.commands()), 3);
        // Markers render for every selected cell with a successor.
        assert_eq!(count_markers(recorder.commands()), 2);
    }

    #[test]
    fn test_no_markers_outside_setup_or_error() {
        let mut widget = widget();
        trace(&mut widget, &[0, 1, 2], false);

        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);
        // show_path draws lines, but markers need setup mode or an error.
        assert_eq!(count_lines(recorder.commands()), 3);
        assert_eq!(count_markers(recorder.commands()), 0);
    }

    #[test]
    fn test_error_color_on_selected_path_only() {
        let mut widget = widget();
        widget.set_on_finish(|_: &GestureResult| false);
        trace(&mut widget, &[0, 1], true);
        assert!(widget.is_error());

        let mut recorder = CommandRecorder::new();
        render_pattern(&widget, &mut recorder);

        let error = widget.error_color().to_rgba8();
        let cell = widget.cell_color().to_rgba8();
        for command in recorder.commands() {
            match command {
                DrawCommand::Line { color, .. } | DrawCommand::FillCircle { color, .. } => {
                    assert_eq!(color.to_rgba8(), error);
                }
                DrawCommand::FillPath { color, .. } => {
                    assert_eq!(color.to_rgba8(), error);
                }
                DrawCommand::StrokeCircle { center, color, .. } => {
                    let expected = if *center == widget.layout().unwrap().cell_center(0)
                        || *center == widget.layout().unwrap().cell_center(1)
                    {
                        error
                    } else {
                        cell
                    };
                    assert_eq!(color.to_rgba8(), expected);
                }
            }
        }
        // Rejected selections render their direction markers.
        assert_eq!(count_markers(recorder.commands()), 1);
    }
}
