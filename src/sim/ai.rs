//! AI paddle controller
//!
//! Pure tracking: aim at the ball nearest to this paddle's face, wobbled by a
//! slow sine so the opponent is beatable, and hold still inside a dead-zone.

use super::state::{Ball, Paddle, Side};
use crate::consts::AI_JITTER_PERIOD;
use crate::settings::AiDifficulty;

/// Ball with the smallest horizontal distance to the paddle's face
pub fn target_ball<'a>(paddle: &Paddle, balls: &'a [Ball]) -> Option<&'a Ball> {
    let rect = paddle.rect();
    let face = match paddle.side {
        Side::Left => rect.right(),
        Side::Right => rect.x,
    };
    balls
        .iter()
        .min_by(|a, b| (a.pos.x - face).abs().total_cmp(&(b.pos.x - face).abs()))
}

/// Vertical velocity the AI wants this tick
///
/// Never exceeds the tier's top speed, and never moves farther than the
/// remaining distance to the aim point in one step. Inverted controls flip
/// the AI too.
pub fn desired_velocity(
    paddle: &Paddle,
    balls: &[Ball],
    difficulty: AiDifficulty,
    time: f32,
    dt: f32,
) -> f32 {
    let Some(ball) = target_ball(paddle, balls) else {
        return 0.0;
    };

    let dead_zone = difficulty.dead_zone();
    if (ball.pos.y - paddle.center_y()).abs() <= dead_zone {
        return 0.0;
    }

    let jitter = (time / AI_JITTER_PERIOD).sin() * difficulty.jitter();
    let aim = ball.pos.y - paddle.height / 2.0 + jitter;
    let dy = aim - paddle.y;
    if dy.abs() <= dead_zone {
        return 0.0;
    }

    let mut speed = difficulty.top_speed();
    if dt > 0.0 {
        speed = speed.min(dy.abs() / dt);
    }
    dy.signum() * speed * paddle.control_sign()
}

/// Set the paddle's velocity for this tick
pub fn drive(paddle: &mut Paddle, balls: &[Ball], difficulty: AiDifficulty, time: f32, dt: f32) {
    paddle.vy = desired_velocity(paddle, balls, difficulty, time, dt);
}
