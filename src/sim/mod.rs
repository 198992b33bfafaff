//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, integer positions
//! - Randomness only through the RNG the caller passes in
//! - No rendering or platform dependencies

pub mod collision;
pub mod predict;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{add_abs, is_colliding};
pub use predict::{MAX_PREDICTION_STEPS, Segment, predict_trajectory};
pub use scoring::points_system;
pub use state::{Ball, Game, GameEvent, GamePhase, Player, Side};
pub use tick::{TickInput, roll_speed_bump, step, tick};
