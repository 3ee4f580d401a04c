//! Gesture sources — where each frame's hand comes from.
//!
//! The game loop only sees [`Reading`]s through the [`GestureSource`]
//! trait, so it does not know whether a hand came from a landmark helper
//! process, the keyboard/mouse simulator, or a test script.

use std::sync::mpsc::{Receiver, TryRecvError};

use balloon_field::{HandLandmarks, Landmark, PINCH_THRESHOLD};

// ════════════════════════════════════════════════════════════════════════════
// Reading
// ════════════════════════════════════════════════════════════════════════════

/// The outcome of acquiring one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Reading {
    /// The frame could not be acquired. The tick is skipped.
    Dropped,
    /// A frame arrived with no hand in it.
    NoHand,
    /// The first tracked hand in the frame.
    Hand(HandLandmarks),
}

// ════════════════════════════════════════════════════════════════════════════
// GestureSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can produce one [`Reading`] per tick.
pub trait GestureSource {
    /// Acquire the next frame. May block.
    fn poll(&mut self) -> Reading;
}

// ════════════════════════════════════════════════════════════════════════════
// SimGestureSource — keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Cursor inside the window, normalized to `[0, 1]`.
    Cursor { x: f32, y: f32 },
    /// Cursor left the window; reads as "no hand".
    CursorLost,
    /// Pinch button pressed or released.
    Pinch(bool),
    /// Camera dropout held or released.
    Blackout(bool),
}

/// Thumb offset from the index tip while not pinching.
const OPEN_SPREAD:   f32 = 0.10;
/// Thumb offset while pinching, comfortably under the threshold.
const CLOSED_SPREAD: f32 = (PINCH_THRESHOLD / 4.0) as f32;

/// Gesture source driven by [`SimInput`] events from the visualizer.
///
/// The mouse stands in for the index fingertip; holding the pinch button
/// pulls a virtual thumb onto it. All queued inputs are folded into the
/// current state on every poll.
pub struct SimGestureSource {
    rx:        Receiver<SimInput>,
    cursor:    Option<(f32, f32)>,
    pinching:  bool,
    blackout:  bool,
}

impl SimGestureSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimGestureSource { rx, cursor: None, pinching: false, blackout: false }
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(SimInput::Cursor { x, y }) => self.cursor = Some((x, y)),
                Ok(SimInput::CursorLost)      => self.cursor = None,
                Ok(SimInput::Pinch(down))     => self.pinching = down,
                Ok(SimInput::Blackout(down))  => self.blackout = down,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl GestureSource for SimGestureSource {
    fn poll(&mut self) -> Reading {
        self.drain();
        if self.blackout {
            return Reading::Dropped;
        }
        match self.cursor {
            None => Reading::NoHand,
            Some((x, y)) => {
                let spread = if self.pinching { CLOSED_SPREAD } else { OPEN_SPREAD };
                Reading::Hand(HandLandmarks::from_tips(
                    Landmark::new(x - spread, y + spread),
                    Landmark::new(x, y),
                ))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
