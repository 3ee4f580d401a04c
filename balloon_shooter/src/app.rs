//! Top-level application state and the main loop.
//!
//! `AppState` owns the [`GameState`], the spawn RNG and the gesture source.
//! One call to [`AppState::tick`] is one frame of the game; [`run`] wraps
//! it with the window.

use std::path::PathBuf;
use std::sync::mpsc;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use balloon_field::{Field, GameState, Gesture, Shot, TickReport};

use crate::error::ShooterError;
use crate::gesture::{GestureSource, Reading, SimGestureSource};
use crate::sound::PopSound;
use crate::stream::LandmarkStream;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub field:     Field,
    /// Spawn RNG seed; `None` seeds from OS entropy.
    pub seed:      Option<u64>,
    /// Shell command of the landmark helper; `None` runs the simulator.
    pub landmarks: Option<String>,
    /// Mirror helper landmarks horizontally.
    pub mirror:    bool,
    pub pop_sound: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            field:     Field::default(),
            seed:      None,
            landmarks: None,
            mirror:    false,
            pop_sound: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

/// What happened in one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    /// No camera frame: nothing changed, nothing to draw.
    Skipped,
    Played(TickReport),
}

pub struct AppState {
    game:   GameState,
    rng:    StdRng,
    source: Box<dyn GestureSource>,
    frames: u64,
}

impl AppState {
    pub fn new(field: Field, seed: Option<u64>, source: Box<dyn GestureSource>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        AppState { game: GameState::new(field), rng, source, frames: 0 }
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self) -> Frame {
        self.frames += 1;

        let hand = match self.source.poll() {
            Reading::Dropped => {
                trace!("frame {}: camera read failed, skipping", self.frames);
                return Frame::Skipped;
            }
            Reading::NoHand  => None,
            Reading::Hand(h) => Some(Gesture::from_hand(&h, self.game.field())),
        };

        let report = self.game.tick(hand, &mut self.rng);
        match &report.shot {
            Shot::Pop(b) => debug!(
                "pop at ({:.0}, {:.0}) r={} → score {}",
                b.x, b.y, b.radius, self.game.score()
            ),
            Shot::Miss   => debug!("pinch missed at {:?}", self.game.pointer()),
            Shot::Held   => {}
        }
        Frame::Played(report)
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn game(&self)   -> &GameState { &self.game }
    pub fn score(&self)  -> u32        { self.game.score() }
    pub fn frames(&self) -> u64        { self.frames }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the window and the gesture source (the simulator unless a
/// landmark helper is configured) and drives the frame loop until the
/// window is closed or Q / Escape is pressed.
pub fn run(cfg: AppConfig) -> Result<(), ShooterError> {
    let _pop_sound = cfg.pop_sound.as_ref().map(PopSound::load).transpose()?;

    let (source, sim_tx) = match &cfg.landmarks {
        Some(cmd) => {
            let stream = LandmarkStream::spawn(cmd, cfg.mirror)?;
            (Box::new(stream) as Box<dyn GestureSource>, None)
        }
        None => {
            let (tx, rx) = mpsc::channel();
            (Box::new(SimGestureSource::new(rx)) as Box<dyn GestureSource>, Some(tx))
        }
    };

    let mut vis = Visualizer::new(cfg.field, sim_tx)?;
    let mut app = AppState::new(cfg.field, cfg.seed, source);
    info!("{}×{} field, window open", cfg.field.width, cfg.field.height);

    while vis.is_open() {
        vis.poll_input();

        match app.tick() {
            Frame::Skipped => vis.pump(),
            Frame::Played(report) => vis.render(app.game(), report.popped()),
        }

        if vis.exit_requested() { break; }
    }

    info!("game over after {} frames, final score {}", app.frames(), app.score());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
