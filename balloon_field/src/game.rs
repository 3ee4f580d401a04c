//! Game state and the per-tick update steps.
//!
//! A tick is: [`GameState::track`] the hand, [`GameState::advance`] the
//! balloons, then [`GameState::shoot`]. [`GameState::tick`] runs all three
//! in that order; the steps stay public so the loop driver and tests can
//! observe them one by one.

use rand::Rng;

use crate::balloon::Balloon;
use crate::geometry::{Field, Point};
use crate::hand::Gesture;

/// Active balloons are topped up to this many, one per tick.
pub const MAX_BALLOONS:   usize = 7;
/// Ticks a pinch locks the trigger for.
pub const COOLDOWN_TICKS: i32   = 20;

// ════════════════════════════════════════════════════════════════════════════
// Trigger / Shot
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger { Ready, Cooling }

/// What a call to [`GameState::shoot`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum Shot {
    /// No pinch, or the trigger was still cooling.
    Held,
    /// Pinched while ready, nothing under the pointer.
    Miss,
    /// Pinched while ready and popped this balloon.
    Pop(Balloon),
}

/// Summary of one full tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub spawned: bool,
    pub culled:  usize,
    pub shot:    Shot,
}

impl TickReport {
    /// The balloon this tick popped, as it was just before the pop.
    pub fn popped(&self) -> Option<&Balloon> {
        match &self.shot {
            Shot::Pop(b) => Some(b),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GameState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct GameState {
    field:    Field,
    balloons: Vec<Balloon>,
    score:    u32,
    cooldown: i32,
    pointer:  Point,
}

impl GameState {
    pub fn new(field: Field) -> Self {
        GameState {
            field,
            balloons: Vec::with_capacity(MAX_BALLOONS),
            score:    0,
            cooldown: 0,
            pointer:  field.centre(),
        }
    }

    // ── full tick ─────────────────────────────────────────────────────────

    pub fn tick<R: Rng + ?Sized>(&mut self, hand: Option<Gesture>, rng: &mut R) -> TickReport {
        let pinch = self.track(hand);
        let (spawned, culled) = self.advance(rng);
        let shot = self.shoot(pinch);
        TickReport { spawned, culled, shot }
    }

    // ── steps ─────────────────────────────────────────────────────────────

    /// Follow the hand. Returns this tick's pinch flag, which is false
    /// when no hand was seen; the pointer then stays where it was.
    pub fn track(&mut self, hand: Option<Gesture>) -> bool {
        match hand {
            Some(g) => {
                self.pointer = g.pointer;
                g.pinch
            }
            None => false,
        }
    }

    /// Spawn at most one balloon, raise all of them, drop the ones that
    /// left the field. Returns `(spawned, culled)`.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (bool, usize) {
        let spawned = self.balloons.len() < MAX_BALLOONS;
        if spawned {
            self.balloons.push(Balloon::spawn(self.field, rng));
        }

        for b in self.balloons.iter_mut() {
            b.rise();
        }

        let before = self.balloons.len();
        self.balloons.retain(|b| !b.is_gone());
        (spawned, before - self.balloons.len())
    }

    /// Fire if pinching and ready; otherwise let the trigger cool.
    ///
    /// A ready pinch always restarts the cooldown, hit or miss, and pops
    /// at most the first balloon (insertion order) containing the pointer.
    pub fn shoot(&mut self, pinch: bool) -> Shot {
        if !(pinch && self.trigger() == Trigger::Ready) {
            self.cooldown = self.cooldown.saturating_sub(1);
            return Shot::Held;
        }

        self.cooldown = COOLDOWN_TICKS;
        let pointer = self.pointer;
        match self.balloons.iter().position(|b| b.contains(pointer)) {
            Some(i) => {
                self.score += 1;
                Shot::Pop(self.balloons.remove(i))
            }
            None => Shot::Miss,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn field(&self)    -> Field      { self.field }
    pub fn balloons(&self) -> &[Balloon] { &self.balloons }
    pub fn score(&self)    -> u32        { self.score }
    pub fn cooldown(&self) -> i32        { self.cooldown }
    pub fn pointer(&self)  -> Point      { self.pointer }

    pub fn trigger(&self) -> Trigger {
        if self.cooldown <= 0 { Trigger::Ready } else { Trigger::Cooling }
    }

    /// Place a balloon directly, bypassing the spawner.
    pub fn insert_balloon(&mut self, balloon: Balloon) {
        self.balloons.push(balloon);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
