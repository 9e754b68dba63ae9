//! Scripted walkthrough of the pattern lock widget.
//!
//! Drives the full setup -> confirm -> authenticate flow through the
//! widget with synthetic pointer events, then dumps the final frame's
//! draw commands.

use patternlock_core::{
    GestureResult, GridError, PatternConfig, PatternWidget, PointerEvent,
};
use patternlock_demo::{LockScreen, Mode};
use patternlock_render::{CommandRecorder, render_pattern};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn main() {
    env_logger::init();
    log::info!("starting pattern lock demo");

    if let Err(e) = run() {
        log::error!("demo failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GridError> {
    let mut widget = PatternWidget::new(PatternConfig::default());
    widget.set_layout(480.0, 480.0)?;
    widget.set_setup(true);

    let screen = Rc::new(RefCell::new(LockScreen::new()));
    let cb = Rc::clone(&screen);
    widget.set_on_finish(move |result: &GestureResult| {
        let mut screen = cb.borrow_mut();
        let accepted = screen.on_finish(result);
        log::info!(
            "gesture \"{}\" {}: {}",
            result.as_str(),
            if accepted { "accepted" } else { "rejected" },
            screen.tips()
        );
        accepted
    });

    let mut clock = Instant::now();
    let hold = widget.config().hold_interval + Duration::from_millis(1);

    // Setup: too short, then register, then confirm.
    for gesture in [&[0usize, 1, 2][..], &[0, 1, 2, 3], &[0, 1, 2, 3]] {
        trace(&mut widget, gesture, clock);
        clock += hold;
        widget.poll_reset(clock);
        widget.set_setup(screen.borrow().mode() == Mode::Setup);
    }

    // Authenticate: one wrong attempt, then the real pattern.
    for gesture in [&[0usize, 1, 2, 4][..], &[0, 1, 2, 3]] {
        trace(&mut widget, gesture, clock);
        clock += hold;
        widget.poll_reset(clock);
    }

    // Render one idle frame into the recording target.
    let mut recorder = CommandRecorder::new();
    render_pattern(&widget, &mut recorder);
    log::info!("final frame: {} draw commands", recorder.commands().len());
    Ok(())
}

/// Replay a gesture as down/move/up events over the given cells.
fn trace(widget: &mut PatternWidget, cells: &[usize], now: Instant) {
    let Some(layout) = widget.layout().cloned() else {
        return;
    };
    let mut positions = cells.iter().map(|&c| layout.cell_center(c));
    let Some(first) = positions.next() else {
        return;
    };
    widget.handle_pointer(PointerEvent::Down { position: first }, now);
    let mut last = first;
    for position in positions {
        widget.handle_pointer(PointerEvent::Move { position }, now);
        last = position;
    }
    widget.handle_pointer(PointerEvent::Up { position: last }, now);
}
