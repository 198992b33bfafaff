//! Presentation: draws the court, the HUD, the debug overlay and the pause
//! screen through a [`Renderer`]. Reads game state, never writes it.

use glam::IVec2;

use crate::consts::*;
use crate::platform::Renderer;
use crate::sim::{Game, Player, predict_trajectory};

/// Colors for game elements
pub mod colors {
    use crate::platform::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
    pub const COURT_LINE: Color = Color::rgb(130, 130, 130);
    pub const PADDLE: Color = Color::rgb(255, 255, 255);
    pub const BALL: Color = Color::rgb(255, 255, 255);
    pub const SCORE: Color = Color::rgb(255, 255, 255);
    pub const HELP_TEXT: Color = Color::rgb(130, 130, 130);
    pub const DEBUG_GRID: Color = Color::rgb(230, 41, 55);
    pub const TRAJECTORY: Color = Color::rgb(253, 249, 0);
    pub const PAUSE_TEXT: Color = Color::rgb(245, 245, 245);
}

const SCORE_SIZE: i32 = 50;
const HELP_SIZE: i32 = 20;
const PAUSE_SIZE: i32 = 100;

pub const HELP_TEXT: &str = "P: Pause\nD: Debug lines";

/// Middle line, paddles, ball, scores and key help
pub fn draw_game(renderer: &mut impl Renderer, game: &Game) {
    renderer.draw_line(
        IVec2::new(WIDTH / 2, HEIGHT),
        IVec2::new(WIDTH / 2, 0),
        colors::COURT_LINE,
    );

    draw_paddle(renderer, &game.left);
    draw_paddle(renderer, &game.right);

    renderer.draw_circle(game.ball.pos, BALL_RADIUS, colors::BALL);

    let score_y = HEIGHT / 8 - 23;
    renderer.draw_text(
        &game.left.points.to_string(),
        IVec2::new(WIDTH / 4 - 13, score_y),
        SCORE_SIZE,
        colors::SCORE,
    );
    renderer.draw_text(
        &game.right.points.to_string(),
        IVec2::new(WIDTH / 4 + WIDTH / 2 - 13, score_y),
        SCORE_SIZE,
        colors::SCORE,
    );

    renderer.draw_text(
        HELP_TEXT,
        IVec2::new(5, HEIGHT - 47),
        HELP_SIZE,
        colors::HELP_TEXT,
    );
}

fn draw_paddle(renderer: &mut impl Renderer, player: &Player) {
    renderer.draw_rectangle(
        player.pos,
        IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        colors::PADDLE,
    );
}

/// Reference grid through the score anchors plus the predicted ball path
pub fn draw_debug_lines(renderer: &mut impl Renderer, game: &Game) {
    let grid = [
        (IVec2::new(0, HEIGHT / 2), IVec2::new(WIDTH, HEIGHT / 2)),
        (IVec2::new(0, HEIGHT / 8), IVec2::new(WIDTH, HEIGHT / 8)),
        (IVec2::new(WIDTH / 4, 0), IVec2::new(WIDTH / 4, HEIGHT)),
        (
            IVec2::new(WIDTH / 4 + WIDTH / 2, 0),
            IVec2::new(WIDTH / 4 + WIDTH / 2, HEIGHT),
        ),
    ];
    for (from, to) in grid {
        renderer.draw_line(from, to, colors::DEBUG_GRID);
    }

    for segment in predict_trajectory(game) {
        renderer.draw_line(segment.from, segment.to, colors::TRAJECTORY);
    }
}

/// Blank the frame and show the pause banner
pub fn draw_paused(renderer: &mut impl Renderer) {
    renderer.clear_background(colors::BACKGROUND);
    renderer.draw_text(
        "PAUSE",
        IVec2::new(WIDTH / 4 + 30, HEIGHT / 2 - 50),
        PAUSE_SIZE,
        colors::PAUSE_TEXT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{DrawCommand, RecordingRenderer};
    use crate::sim::Ball;

    #[test]
    fn test_draw_game_layout() {
        let mut game = Game::new();
        game.left.points = 3;
        game.right.points = 11;
        let mut renderer = RecordingRenderer::new();

        draw_game(&mut renderer, &game);

        let rects: Vec<_> = renderer
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rectangle { pos, size, .. } => Some((*pos, *size)),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (IVec2::new(10, 275), IVec2::new(10, 50)),
                (IVec2::new(780, 275), IVec2::new(10, 50)),
            ]
        );
        assert!(renderer.commands.contains(&DrawCommand::Circle {
            center: IVec2::new(400, 300),
            radius: BALL_RADIUS,
            color: colors::BALL,
        }));
        assert!(renderer.commands.contains(&DrawCommand::Text {
            text: "11".into(),
            pos: IVec2::new(587, 52),
            size: 50,
            color: colors::SCORE,
        }));
        let texts: Vec<_> = renderer.texts().collect();
        assert_eq!(texts, vec!["3", "11", HELP_TEXT]);
        assert_eq!(renderer.lines_with(colors::COURT_LINE), 1);
    }

    #[test]
    fn test_debug_lines_follow_prediction() {
        let mut game = Game::new();
        game.ball = Ball {
            pos: IVec2::new(100, 100),
            speed: IVec2::new(-10, 0),
        };
        let mut renderer = RecordingRenderer::new();

        draw_debug_lines(&mut renderer, &game);

        assert_eq!(renderer.lines_with(colors::DEBUG_GRID), 4);
        assert_eq!(renderer.lines_with(colors::TRAJECTORY), 10);
    }

    #[test]
    fn test_pause_screen() {
        let mut renderer = RecordingRenderer::new();
        draw_paused(&mut renderer);
        assert_eq!(renderer.commands[0], DrawCommand::Clear(colors::BACKGROUND));
        assert_eq!(renderer.texts().collect::<Vec<_>>(), vec!["PAUSE"]);
    }
}
