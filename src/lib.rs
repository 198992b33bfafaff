//! Classic Pong - two paddles, one ball, one keyboard
//!
//! Core modules:
//! - `sim`: Deterministic integer simulation (collisions, tick, scoring)
//! - `draw`: Presentation through the `Renderer` trait
//! - `session`: Per-frame host logic (ordering, pause latch, round delay)
//! - `platform`: Renderer/audio/input seams and their backends
//! - `settings`: Player preferences

pub mod draw;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FramePacer, Session};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Court dimensions in pixels
    pub const WIDTH: i32 = 800;
    pub const HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PLAYER_WIDTH: i32 = 10;
    pub const PLAYER_HEIGHT: i32 = 50;
    /// Vertical pixels per tick while a key is held
    pub const PLAYER_SPEED: i32 = 5;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 5;
    pub const INITIAL_BALL_SPEED: i32 = 2;

    /// One in N paddle contacts speeds the ball up
    pub const SPEED_BUMP_ODDS: u32 = 8;

    /// Simulation frames per second
    pub const TARGET_FPS: u32 = 120;
    /// Freeze after a serve or a point, in seconds
    pub const ROUND_DELAY_SECS: f64 = 3.0;

    /// Window title
    pub const TITLE: &str = "PONG!";
}
