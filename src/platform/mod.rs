//! Platform abstraction layer
//!
//! The game only talks to the outside world through three seams:
//! - [`Renderer`]: immediate-mode 2D drawing
//! - [`Audio`]: fire-and-forget sound effects
//! - [`Input`]: keyboard state sampled once per frame
//!
//! Backends:
//! - `headless`: recording renderer and silent audio (native builds, tests)
//! - `web`: canvas 2D, HTML audio elements, DOM keyboard events (wasm32)

use std::collections::HashSet;

use glam::IVec2;

use crate::sim::{GameEvent, Side};

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Errors raised while acquiring platform resources
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("no browser window available")]
    NoWindow,
    #[error("canvas element `{0}` not found")]
    NoCanvas(String),
    #[error("could not get a 2D drawing context: {0}")]
    NoContext(String),
    #[error("failed to load sound `{path}`: {reason}")]
    SoundLoad { path: String, reason: String },
}

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS `rgba()` notation
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            f32::from(self.a) / 255.0
        )
    }
}

/// Immediate-mode drawing surface. Coordinates are court pixels, origin at
/// the top-left, y growing downward.
pub trait Renderer {
    /// Start a frame
    fn begin(&mut self);
    /// Present the frame
    fn end(&mut self);
    fn clear_background(&mut self, color: Color);
    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color);
    /// Filled rectangle with its top-left corner at `pos`
    fn draw_rectangle(&mut self, pos: IVec2, size: IVec2, color: Color);
    fn draw_circle(&mut self, center: IVec2, radius: i32, color: Color);
    /// `text` may contain `\n`; `pos` is the top-left of the first line
    fn draw_text(&mut self, text: &str, pos: IVec2, size: i32, color: Color);
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits the left paddle
    LeftPaddleHit,
    /// Ball hits the right paddle
    RightPaddleHit,
    /// A round is about to start (new game or after a point)
    RoundStart,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::LeftPaddleHit,
        SoundEffect::RightPaddleHit,
        SoundEffect::RoundStart,
    ];

    /// The sound a simulation event makes, if any
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit(Side::Left) => Some(SoundEffect::LeftPaddleHit),
            GameEvent::PaddleHit(Side::Right) => Some(SoundEffect::RightPaddleHit),
            GameEvent::RoundStart => Some(SoundEffect::RoundStart),
            // The round-start sound plays when the score delay begins
            GameEvent::Scored(_) => None,
        }
    }
}

/// Audio output. Backends load every [`SoundEffect`] up front and release
/// them when dropped.
pub trait Audio {
    fn play(&mut self, effect: SoundEffect);
}

/// Sound assets that failed to load
///
/// Browser audio fetches after construction, so failures arrive later through
/// callbacks. The first failure per effect yields the error to report; the
/// effect stays silent afterwards.
#[derive(Debug, Clone, Default)]
pub struct SoundFailures {
    failed: HashSet<SoundEffect>,
}

impl SoundFailures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed asset. Returns `None` if the effect already failed.
    pub fn record(
        &mut self,
        effect: SoundEffect,
        path: &str,
        reason: impl Into<String>,
    ) -> Option<PlatformError> {
        self.failed.insert(effect).then(|| PlatformError::SoundLoad {
            path: path.to_owned(),
            reason: reason.into(),
        })
    }

    pub fn has_failed(&self, effect: SoundEffect) -> bool {
        self.failed.contains(&effect)
    }
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Right paddle up
    Up,
    /// Right paddle down
    Down,
    /// Left paddle up
    W,
    /// Left paddle down
    S,
    /// Pause toggle
    P,
    /// Debug lines toggle
    D,
    /// Reset the game
    R,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "KeyW" => Some(Key::W),
            "KeyS" => Some(Key::S),
            "KeyP" => Some(Key::P),
            "KeyD" => Some(Key::D),
            "KeyR" => Some(Key::R),
            _ => None,
        }
    }
}

/// Keyboard state as seen by one frame
pub trait Input {
    /// Key is currently held
    fn is_key_down(&self, key: Key) -> bool;
    /// Key went down since the previous frame (edge-triggered)
    fn is_key_pressed(&self, key: Key) -> bool;
}

/// Key state fed by press/release events
///
/// Call [`KeyboardState::end_frame`] after each simulated frame so presses
/// fire once.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    down: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat events for a held key are ignored.
    pub fn key_down(&mut self, key: Key) {
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.down.remove(&key);
    }

    /// Forget everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }

    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl Input for KeyboardState {
    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}
