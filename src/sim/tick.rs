//! Per-frame simulation tick
//!
//! Advances the ball and paddles by one frame. The only randomness is the
//! speed bump, drawn once per tick from the caller's RNG.

use rand::Rng;

use super::collision::{add_abs, is_colliding};
use super::state::{Game, GameEvent, Player, Side};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// W held
    pub left_up: bool,
    /// S held
    pub left_down: bool,
    /// Up arrow held
    pub right_up: bool,
    /// Down arrow held
    pub right_down: bool,
    /// D pressed this frame (edge-triggered)
    pub toggle_debug: bool,
}

/// Draw this tick's speed bump: 1 with probability `1 / SPEED_BUMP_ODDS`, else 0
pub fn roll_speed_bump<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    i32::from(rng.random_ratio(1, SPEED_BUMP_ODDS))
}

/// Advance the game by one frame
pub fn tick<R: Rng + ?Sized>(game: &mut Game, input: &TickInput, rng: &mut R) {
    let bump = roll_speed_bump(rng);
    step(game, input, bump);
}

/// Advance the game by one frame with a known speed bump
///
/// The same `bump` applies to both paddle checks. Both checks run even if
/// the first one hit.
pub fn step(game: &mut Game, input: &TickInput, bump: i32) {
    if is_colliding(&game.left, game.ball.pos) {
        let speed = &mut game.ball.speed;
        speed.x = speed.x.abs() + bump;
        speed.y = add_abs(speed.y, bump);
        game.events.push(GameEvent::PaddleHit(Side::Left));
        log::debug!("Left paddle hit, ball speed {:?}", game.ball.speed);
    }
    if is_colliding(&game.right, game.ball.pos) {
        let speed = &mut game.ball.speed;
        speed.x = -(speed.x + bump).abs();
        speed.y = add_abs(speed.y, bump);
        game.events.push(GameEvent::PaddleHit(Side::Right));
        log::debug!("Right paddle hit, ball speed {:?}", game.ball.speed);
    }

    game.ball.pos += game.ball.speed;

    move_paddle(&mut game.left);
    move_paddle(&mut game.right);

    // Ceiling and floor. Left/right edges are scoring, not bounces.
    if game.ball.pos.y > HEIGHT - BALL_RADIUS || game.ball.pos.y < BALL_RADIUS {
        game.ball.speed.y = -game.ball.speed.y;
    }

    // Speeds applied next tick
    game.left.speed = held_speed(input.left_up, input.left_down);
    game.right.speed = held_speed(input.right_up, input.right_down);

    if input.toggle_debug {
        game.debug = !game.debug;
        log::info!("Debug lines {}", if game.debug { "on" } else { "off" });
    }
}

/// Apply the paddle's speed unless it would push further into a bound it
/// has already reached. Moving away from a bound is always allowed.
fn move_paddle(player: &mut Player) {
    let y = player.pos.y;
    let can_go_down = y < HEIGHT - PLAYER_HEIGHT + 3 || player.speed == -PLAYER_SPEED;
    let can_go_up = y > 3 || player.speed == PLAYER_SPEED;
    if can_go_down && can_go_up {
        player.pos.y += player.speed;
    }
}

/// Down wins when both keys are held
fn held_speed(up: bool, down: bool) -> i32 {
    if down {
        PLAYER_SPEED
    } else if up {
        -PLAYER_SPEED
    } else {
        0
    }
}
