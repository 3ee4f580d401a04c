//! # balloon_field
//!
//! The rules of a pinch-to-pop balloon game, free of any window, camera or
//! landmark detector.
//!
//! * Up to [`MAX_BALLOONS`] balloons rise from below the field, one new
//!   balloon per tick while under the cap.
//! * A balloon leaves the game once it is fully above the top edge.
//! * A hand pinch (thumb tip within [`PINCH_THRESHOLD`] of the index tip)
//!   pops the first balloon under the pointer and locks the trigger for
//!   [`COOLDOWN_TICKS`] ticks, whether or not anything was hit.
//!
//! ## Quick start
//!
//! ```rust
//! use balloon_field::{Field, GameState, Gesture, Point};
//! use rand::SeedableRng;
//!
//! let mut rng  = rand::rngs::StdRng::seed_from_u64(1);
//! let mut game = GameState::new(Field::new(1280, 720));
//!
//! let hand = Gesture { pointer: Point::new(640.0, 360.0), pinch: false };
//! for _ in 0..10 {
//!     game.tick(Some(hand), &mut rng);
//! }
//! assert_eq!(game.balloons().len(), 7);
//! ```

pub mod balloon;
pub mod game;
pub mod geometry;
pub mod hand;

pub use balloon::{Balloon, Ellipse, PALETTE};
pub use game::{GameState, Shot, TickReport, Trigger, COOLDOWN_TICKS, MAX_BALLOONS};
pub use geometry::{Field, Point};
pub use hand::{is_pinch, Gesture, HandLandmarks, Landmark, LANDMARK_COUNT, PINCH_THRESHOLD};
