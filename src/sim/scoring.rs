//! Points system: detects a ball that left the court and starts a new round

use super::state::{Ball, Game, GameEvent, GamePhase, Side};
use crate::consts::WIDTH;

/// Award points for a ball past either end and respawn it
///
/// Runs before the tick each frame. Past the right edge scores for the left
/// player; near the left edge (x < 2) scores for the right player. There is
/// no debounce; the host's round delay keeps a ball from scoring twice.
pub fn points_system(game: &mut Game) {
    let left_scored = game.ball.pos.x > WIDTH;
    let right_scored = game.ball.pos.x < 2;

    if left_scored {
        award(game, Side::Left);
    }
    if right_scored {
        award(game, Side::Right);
    }

    if left_scored || right_scored {
        game.phase = GamePhase::Score;
        game.left.recenter();
        game.right.recenter();
        game.ball = Ball::respawn_from(&game.ball);
    }
}

fn award(game: &mut Game, side: Side) {
    game.player_mut(side).points += 1;
    log::info!(
        "{side:?} scores on {:?}: {} to {}",
        !side,
        game.player(side).points,
        game.player(!side).points
    );
    game.events.push(GameEvent::Scored(side));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HEIGHT;
    use crate::sim::state::Player;
    use glam::IVec2;

    fn running_game(pos: IVec2, speed: IVec2) -> Game {
        let mut game = Game::new();
        game.phase = GamePhase::Run;
        game.ball = Ball { pos, speed };
        game
    }

    #[test]
    fn test_left_scores_when_ball_exits_right() {
        let mut game = running_game(IVec2::new(WIDTH + 1, 123), IVec2::new(3, -4));
        game.left.pos.y = 40;
        game.right.pos.y = 500;

        points_system(&mut game);

        assert_eq!(game.left.points, 1);
        assert_eq!(game.right.points, 0);
        assert_eq!(game.phase, GamePhase::Score);
        assert_eq!(game.left.pos.y, Player::CENTER_Y);
        assert_eq!(game.right.pos.y, Player::CENTER_Y);
        assert_eq!(game.events, vec![GameEvent::Scored(Side::Left)]);
    }

    #[test]
    fn test_right_scores_when_ball_exits_left() {
        let mut game = running_game(IVec2::new(1, 300), IVec2::new(-2, 2));
        points_system(&mut game);
        assert_eq!(game.right.points, 1);
        assert_eq!(game.left.points, 0);
        assert_eq!(game.phase, GamePhase::Score);
        assert_eq!(game.events, vec![GameEvent::Scored(Side::Right)]);
    }

    #[test]
    fn test_ball_respawns_at_center_reversed() {
        let mut game = running_game(IVec2::new(WIDTH + 3, 20), IVec2::new(6, -5));
        points_system(&mut game);
        assert_eq!(game.ball.pos, IVec2::new(WIDTH / 2, HEIGHT / 2));
        assert_eq!(game.ball.speed, IVec2::new(-2, 2));

        let mut game = running_game(IVec2::new(0, 20), IVec2::new(-4, 3));
        points_system(&mut game);
        assert_eq!(game.ball.speed, IVec2::new(2, -2));
    }

    #[test]
    fn test_no_score_in_bounds() {
        for x in [2, 400, WIDTH] {
            let mut game = running_game(IVec2::new(x, 300), IVec2::new(2, 2));
            points_system(&mut game);
            assert_eq!(game.left.points + game.right.points, 0);
            assert_eq!(game.phase, GamePhase::Run);
            assert_eq!(game.ball.pos, IVec2::new(x, 300));
        }
    }

    #[test]
    fn test_only_scorer_gains_a_point() {
        for (x, side) in [(WIDTH + 1, Side::Left), (0, Side::Right)] {
            let mut game = running_game(IVec2::new(x, 300), IVec2::new(2, 2));
            game.player_mut(!side).points = 4;
            points_system(&mut game);
            assert_eq!(game.player(side).points, 1);
            assert_eq!(game.player(!side).points, 4);
        }
    }

    #[test]
    fn test_scores_accumulate() {
        let mut game = running_game(IVec2::new(WIDTH + 1, 300), IVec2::new(2, 2));
        points_system(&mut game);
        game.phase = GamePhase::Run;
        game.ball.pos.x = WIDTH + 1;
        points_system(&mut game);
        assert_eq!(game.left.points, 2);
    }
}
