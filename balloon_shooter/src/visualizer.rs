//! Software-rendered visualizer using `minifb`.
//!
//! Drawing goes into a [`Canvas`] (a plain ARGB pixel buffer), which the
//! [`Visualizer`] then presents in its window. Keeping the two apart lets
//! the scene be rendered and inspected without a display.
//!
//! Draw order per frame: background, pointer, balloons (body then string),
//! score overlay. Balloons are drawn as they stood before the pinch was
//! resolved, so a popped balloon still shows on its last frame while the
//! score already counts it.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use balloon_field::{Balloon, Ellipse, Field, GameState, Point};

use crate::error::ShooterError;
use crate::gesture::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Colors / layout
// ════════════════════════════════════════════════════════════════════════════

pub const BG_COLOR:      u32 = 0xFFF5F5F5;
const POINTER_COLOR:     u32 = 0xFF000000;
const STRING_COLOR:      u32 = 0xFF000000;
const SCORE_COLOR:       u32 = 0xFF323232;

const POINTER_RADIUS:    f32   = 8.0;
const STRING_WIDTH:      isize = 2;
const SCORE_X:           usize = 30;
const SCORE_Y:           usize = 30;
/// Pixel size of one font cell; glyphs are 3×5 cells.
const SCORE_SCALE:       usize = 6;

const TITLE: &str = "Gesture Balloon Shooter";

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

/// Off-screen ARGB frame buffer with the handful of primitives the game
/// needs. All primitives clip against the buffer edges.
pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![BG_COLOR; width * height] }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn buffer(&self) -> &[u32] { &self.buf }

    /// Color at `(x, y)`, or `None` off the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    // ── scene ─────────────────────────────────────────────────────────────

    /// `popped` is the balloon removed by this tick's pinch, if any. It is
    /// drawn first among the balloons, being the first one under the
    /// pointer.
    pub fn draw_scene(&mut self, game: &GameState, popped: Option<&Balloon>) {
        self.clear(BG_COLOR);

        self.fill_circle(game.pointer(), POINTER_RADIUS, POINTER_COLOR);

        for b in popped.into_iter().chain(game.balloons()) {
            self.draw_balloon(b);
        }

        let score = format!("Score: {}", game.score());
        self.draw_label(&score, SCORE_X, SCORE_Y, SCORE_SCALE, SCORE_COLOR);
    }

    fn draw_balloon(&mut self, b: &Balloon) {
        self.fill_ellipse(b.body(), b.color);
        let (top, bottom) = b.string();
        self.vline(top, bottom, STRING_WIDTH, STRING_COLOR);
    }

    // ── primitives ────────────────────────────────────────────────────────

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn fill_ellipse(&mut self, e: Ellipse, color: u32) {
        if e.rx <= 0.0 || e.ry <= 0.0 { return; }

        let top    = (e.centre.y - e.ry).ceil()  as isize;
        let bottom = (e.centre.y + e.ry).floor() as isize;
        for py in top.max(0)..=bottom.min(self.height as isize - 1) {
            let dy   = (py as f32 - e.centre.y) / e.ry;
            let half = e.rx * (1.0 - dy * dy).max(0.0).sqrt();
            let x0   = (e.centre.x - half).ceil()  as isize;
            let x1   = (e.centre.x + half).floor() as isize;
            self.hline(x0, x1, py, color);
        }
    }

    pub fn fill_circle(&mut self, centre: Point, r: f32, color: u32) {
        self.fill_ellipse(Ellipse { centre, rx: r, ry: r }, color);
    }

    /// Vertical segment `width` pixels wide, starting at `top.x`.
    pub fn vline(&mut self, top: Point, bottom: Point, width: isize, color: u32) {
        let x  = top.x.floor() as isize;
        let y0 = top.y.round() as isize;
        let y1 = bottom.y.round() as isize;
        for py in y0..=y1 {
            self.hline(x, x + width - 1, py, color);
        }
    }

    fn hline(&mut self, x0: isize, x1: isize, y: isize, color: u32) {
        if y < 0 || y >= self.height as isize { return; }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as isize - 1);
        if x0 > x1 { return; }
        let row = y as usize * self.width;
        self.buf[row + x0 as usize..=row + x1 as usize].fill(color);
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Minimal bitmap font — 3×5 glyphs, each cell `scale` pixels square.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > self.width { break; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    canvas: Canvas,
    /// Present only in simulation mode.
    sim_tx: Option<Sender<SimInput>>,
}

impl Visualizer {
    pub fn new(field: Field, sim_tx: Option<Sender<SimInput>>) -> Result<Self, ShooterError> {
        let (w, h) = (field.width as usize, field.height as usize);
        let mut window = Window::new(
            TITLE,
            w, h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, canvas: Canvas::new(w, h), sim_tx })
    }

    /// Returns false once the window has been closed.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Q or Escape on the game window.
    pub fn exit_requested(&self) -> bool {
        self.window.is_key_down(Key::Q) || self.window.is_key_down(Key::Escape)
    }

    /// Translate mouse and keys into [`SimInput`]s for the simulated hand.
    ///
    /// Mouse = index fingertip, left button or Space = pinch, F = camera
    /// dropout.
    pub fn poll_input(&mut self) {
        let Some(tx) = &self.sim_tx else { return; };

        let (w, h) = (self.canvas.width as f32, self.canvas.height as f32);
        let cursor = match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((x, y)) => SimInput::Cursor { x: x / w, y: y / h },
            None         => SimInput::CursorLost,
        };
        let pinch = self.window.get_mouse_down(MouseButton::Left)
                 || self.window.is_key_down(Key::Space);
        let blackout = self.window.is_key_down(Key::F);

        for input in [cursor, SimInput::Pinch(pinch), SimInput::Blackout(blackout)] {
            let _ = tx.send(input);
        }
    }

    /// Process window events without drawing, for ticks with no frame.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Draw the game and present it.
    pub fn render(&mut self, game: &GameState, popped: Option<&Balloon>) {
        self.canvas.draw_scene(game, popped);
        let (w, h) = (self.canvas.width, self.canvas.height);
        if let Err(e) = self.window.update_with_buffer(&self.canvas.buf, w, h) {
            log::warn!("present failed: {}", e);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
