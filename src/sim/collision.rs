//! Collision detection between the ball and the paddles
//!
//! The ball is a point and a paddle is a closed axis-aligned rectangle, so
//! touching an edge counts as a hit.

use glam::IVec2;

use super::state::Player;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Check whether a ball at `point` is touching the paddle
///
/// Boundaries are inclusive: `[x, x + PLAYER_WIDTH] × [y, y + PLAYER_HEIGHT]`.
#[inline]
pub fn is_colliding(player: &Player, point: IVec2) -> bool {
    let min = player.pos;
    let max = player.pos + IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
    point.cmpge(min).all() && point.cmple(max).all()
}

/// Grow the magnitude of `target` by `add`, keeping its sign.
/// Zero counts as positive.
#[inline]
pub fn add_abs(target: i32, add: i32) -> i32 {
    if target < 0 { target - add } else { target + add }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use proptest::prelude::*;

    fn paddle_at(x: i32, y: i32) -> Player {
        let mut player = Player::new(Side::Left);
        player.pos = IVec2::new(x, y);
        player
    }

    #[test]
    fn test_collision_inside() {
        let paddle = paddle_at(10, 100);
        assert!(is_colliding(&paddle, IVec2::new(15, 125)));
    }

    #[test]
    fn test_collision_edges_inclusive() {
        let paddle = paddle_at(10, 100);
        assert!(is_colliding(&paddle, IVec2::new(10, 100)));
        assert!(is_colliding(&paddle, IVec2::new(20, 150)));
        assert!(is_colliding(&paddle, IVec2::new(10, 150)));
        assert!(is_colliding(&paddle, IVec2::new(20, 100)));
    }

    #[test]
    fn test_collision_just_outside() {
        let paddle = paddle_at(10, 100);
        assert!(!is_colliding(&paddle, IVec2::new(9, 125)));
        assert!(!is_colliding(&paddle, IVec2::new(21, 125)));
        assert!(!is_colliding(&paddle, IVec2::new(15, 99)));
        assert!(!is_colliding(&paddle, IVec2::new(15, 151)));
    }

    #[test]
    fn test_add_abs() {
        assert_eq!(add_abs(-5, 3), -8);
        assert_eq!(add_abs(5, 3), 8);
        assert_eq!(add_abs(0, 1), 1);
        assert_eq!(add_abs(-2, 0), -2);
    }

    proptest! {
        /// Every point of the closed rectangle is a hit
        #[test]
        fn prop_points_in_rect_collide(
            px in 0i32..790,
            py in 0i32..550,
            dx in 0i32..=PLAYER_WIDTH,
            dy in 0i32..=PLAYER_HEIGHT,
        ) {
            let paddle = paddle_at(px, py);
            prop_assert!(is_colliding(&paddle, IVec2::new(px + dx, py + dy)));
        }

        /// Anything left or right of the rectangle misses
        #[test]
        fn prop_points_beside_rect_miss(
            px in 0i32..790,
            py in 0i32..550,
            gap in 1i32..200,
            y in -100i32..700,
        ) {
            let paddle = paddle_at(px, py);
            prop_assert!(!is_colliding(&paddle, IVec2::new(px - gap, y)));
            prop_assert!(!is_colliding(&paddle, IVec2::new(px + PLAYER_WIDTH + gap, y)));
        }

        /// Anything above or below the rectangle misses
        #[test]
        fn prop_points_above_below_rect_miss(
            px in 0i32..790,
            py in 0i32..550,
            gap in 1i32..200,
            x in -100i32..900,
        ) {
            let paddle = paddle_at(px, py);
            prop_assert!(!is_colliding(&paddle, IVec2::new(x, py - gap)));
            prop_assert!(!is_colliding(&paddle, IVec2::new(x, py + PLAYER_HEIGHT + gap)));
        }
    }
}
