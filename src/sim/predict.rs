//! Ball trajectory prediction for the debug overlay
//!
//! Replays the ball forward on a copy of its state, bouncing off the
//! ceiling, the floor and the (stationary) paddles, until it leaves the court.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::is_colliding;
use super::state::Game;
use crate::consts::*;

/// Upper bound on predicted steps. A ball sitting inside a paddle flips
/// direction every step and would otherwise never leave the court.
pub const MAX_PREDICTION_STEPS: usize = 4096;

/// One simulated step of the ball's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: IVec2,
    pub to: IVec2,
}

/// Predict the ball's path until it crosses `x <= 0` or `x >= WIDTH`
///
/// Unlike the real tick, paddle contact only reverses the horizontal speed
/// and never applies a speed bump.
pub fn predict_trajectory(game: &Game) -> Vec<Segment> {
    let mut pos = game.ball.pos;
    let mut speed = game.ball.speed;
    let mut path = Vec::new();

    while pos.x > 0 && pos.x < WIDTH && path.len() < MAX_PREDICTION_STEPS {
        let next = pos + speed;

        if next.y > HEIGHT - BALL_RADIUS || next.y < BALL_RADIUS {
            speed.y = -speed.y;
        }
        if is_colliding(&game.left, next) || is_colliding(&game.right, next) {
            speed.x = -speed.x;
        }

        path.push(Segment { from: pos, to: next });
        pos = next;
    }

    path
}
