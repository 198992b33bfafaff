//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`Game`]. Positions and speeds
//! are whole pixels per tick.

use std::ops::Not;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Just (re)started, waiting out the serve delay
    Init,
    /// Simulation frozen by the player
    Pause,
    /// Active gameplay
    Run,
    /// A point was just scored, waiting out the round delay
    Score,
    /// Never entered by the simulation. A host may set it to request a full
    /// reset, which the session performs on its next frame.
    Reset,
}

impl GamePhase {
    /// Phases that freeze play until the round delay elapses
    pub fn is_waiting(self) -> bool {
        matches!(self, GamePhase::Init | GamePhase::Score)
    }
}

/// Which end of the court a paddle defends.
///
/// `!side` gives the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Not for Side {
    type Output = Side;
    fn not(self) -> Self::Output {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Something the host should react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball touched this side's paddle
    PaddleHit(Side),
    /// This side won a point
    Scored(Side),
    /// A fresh game was set up
    RoundStart,
}

/// A paddle and its owner's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Vertical velocity: `-PLAYER_SPEED`, 0 or `PLAYER_SPEED`
    pub speed: i32,
    /// Top-left corner; `x` never changes after creation
    pub pos: IVec2,
    pub points: u32,
}

impl Player {
    /// Vertical offset that centers a paddle on the court
    pub const CENTER_Y: i32 = HEIGHT / 2 - PLAYER_HEIGHT / 2;

    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PLAYER_WIDTH,
            Side::Right => WIDTH - 2 * PLAYER_WIDTH,
        };
        Self {
            speed: 0,
            pos: IVec2::new(x, Self::CENTER_Y),
            points: 0,
        }
    }

    pub fn recenter(&mut self) {
        self.pos.y = Self::CENTER_Y;
    }
}

/// The ball, treated as a point for collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    pub speed: IVec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::CENTER,
            speed: IVec2::new(-INITIAL_BALL_SPEED, 2),
        }
    }
}

impl Ball {
    pub const CENTER: IVec2 = IVec2::new(WIDTH / 2, HEIGHT / 2);

    /// Serve from the center, back the way the ball came
    pub fn respawn_from(old: &Ball) -> Self {
        let flip = |v: i32| if v > 0 { -INITIAL_BALL_SPEED } else { INITIAL_BALL_SPEED };
        Self {
            pos: Self::CENTER,
            speed: IVec2::new(flip(old.speed.x), flip(old.speed.y)),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub left: Player,
    pub right: Player,
    pub ball: Ball,
    pub phase: GamePhase,
    /// Draw the reference grid and the predicted ball path
    pub debug: bool,
    /// Pending events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            left: Player::new(Side::Left),
            right: Player::new(Side::Right),
            ball: Ball::default(),
            phase: GamePhase::Init,
            debug: false,
            events: Vec::new(),
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Start over: fresh paddles (scores zeroed), centered ball, `Init` phase.
    /// The debug overlay setting survives.
    pub fn reset(&mut self) {
        self.left = Player::new(Side::Left);
        self.right = Player::new(Side::Right);
        self.ball = Ball::default();
        self.phase = GamePhase::Init;
        self.events.push(GameEvent::RoundStart);
        log::info!("Game reset");
    }

    /// Flip between `Run` and `Pause`. Returns false (and does nothing) in
    /// any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Run => GamePhase::Pause,
            GamePhase::Pause => GamePhase::Run,
            _ => return false,
        };
        log::info!("Phase -> {:?}", self.phase);
        true
    }

    /// End the round delay
    pub fn resume(&mut self) {
        if self.phase.is_waiting() {
            self.phase = GamePhase::Run;
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_inversion() {
        assert_eq!(!Side::Left, Side::Right);
        assert_eq!(!Side::Right, Side::Left);
    }

    #[test]
    fn test_new_game_layout() {
        let game = Game::new();
        assert_eq!(game.phase, GamePhase::Init);
        assert_eq!(game.left.pos, IVec2::new(10, 275));
        assert_eq!(game.right.pos, IVec2::new(780, 275));
        assert_eq!(game.ball.pos, IVec2::new(400, 300));
        assert_eq!(game.ball.speed, IVec2::new(-2, 2));
        assert!(!game.debug);
        assert!(game.events.is_empty());
    }

    #[test]
    fn test_reset_zeroes_scores() {
        let mut game = Game::new();
        game.left.points = 4;
        game.right.points = 7;
        game.right.pos.y = 10;
        game.ball.pos = IVec2::new(3, 3);
        game.phase = GamePhase::Pause;
        game.debug = true;

        game.reset();

        assert_eq!(game.phase, GamePhase::Init);
        assert_eq!(game.left.points, 0);
        assert_eq!(game.right.points, 0);
        assert_eq!(game.right.pos.y, Player::CENTER_Y);
        assert_eq!(game.ball, Ball::default());
        assert!(game.debug, "debug overlay survives a reset");
        assert_eq!(game.drain_events(), vec![GameEvent::RoundStart]);
    }

    #[test]
    fn test_pause_toggle_round_trip() {
        let mut game = Game::new();
        game.phase = GamePhase::Run;
        let before = game.clone();

        assert!(game.toggle_pause());
        assert_eq!(game.phase, GamePhase::Pause);
        assert!(game.toggle_pause());
        assert_eq!(game.phase, GamePhase::Run);

        assert_eq!(game.ball, before.ball);
        assert_eq!(game.left, before.left);
        assert_eq!(game.right, before.right);
    }

    #[test]
    fn test_pause_ignored_while_waiting() {
        let mut game = Game::new();
        assert!(!game.toggle_pause());
        assert_eq!(game.phase, GamePhase::Init);

        game.phase = GamePhase::Score;
        assert!(!game.toggle_pause());
        assert_eq!(game.phase, GamePhase::Score);
    }

    #[test]
    fn test_resume_only_from_waiting_phases() {
        let mut game = Game::new();
        game.resume();
        assert_eq!(game.phase, GamePhase::Run);

        game.phase = GamePhase::Pause;
        game.resume();
        assert_eq!(game.phase, GamePhase::Pause);
    }

    #[test]
    fn test_respawn_inverts_direction() {
        let old = Ball {
            pos: IVec2::new(805, 40),
            speed: IVec2::new(7, -4),
        };
        let ball = Ball::respawn_from(&old);
        assert_eq!(ball.pos, Ball::CENTER);
        assert_eq!(ball.speed, IVec2::new(-2, 2));

        // Zero counts as "not positive"
        let old = Ball {
            pos: IVec2::ZERO,
            speed: IVec2::new(-3, 0),
        };
        assert_eq!(Ball::respawn_from(&old).speed, IVec2::new(2, 2));
    }

    #[test]
    fn test_snapshot_skips_events() {
        let mut game = Game::new();
        game.events.push(GameEvent::RoundStart);
        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert!(back.events.is_empty());
        assert_eq!(back.ball, game.ball);
        assert_eq!(back.phase, game.phase);
    }
}
