//! # balloon_shooter
//!
//! Pop rising balloons by pinching. The index fingertip steers a pointer;
//! bringing the thumb tip onto it fires at whatever balloon is under the
//! pointer.
//!
//! ## Hand sources
//!
//! * (default) — **Simulation mode**: the mouse is the index fingertip.
//! * `--camera` — **Camera mode** with the bundled
//!   `helper/hand_landmarks.py`, which captures the webcam, runs the
//!   hand-landmark model and streams landmarks as JSON lines (see
//!   [`stream`]).
//! * `--landmarks CMD` — camera mode with any other helper speaking the
//!   same line protocol.
//!
//! ### Simulation controls
//!
//! | Input | Effect |
//! |---|---|
//! | Mouse | Move the pointer |
//! | Left button / `Space` | Pinch |
//! | `F` (held) | Simulate a camera dropout |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod cli;
pub mod error;
pub mod gesture;
pub mod sound;
pub mod stream;
pub mod visualizer;
