//! Ball movement and contact resolution
//!
//! Each tick a ball is advanced along its velocity in short sub-steps, each
//! resolved in order against the top/bottom boundaries, obstacles (solid walls only),
//! both paddles, power-ups (power mode only) and finally the goal lines.

use glam::Vec2;

use super::geometry::{Rect, circle_circle_overlap, circle_rect_overlap};
use super::powerup;
use super::state::{Ball, GameState, Obstacle, Paddle, PowerUp, Side};
use crate::consts::*;
use crate::settings::{Mode, WallMode};

/// Contacts made by one ball during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallContacts {
    pub wall_bounce: bool,
    pub obstacle_hits: u32,
    /// Paddle that returned the ball
    pub paddle: Option<Side>,
}

/// Move a ball along its velocity
#[inline]
pub fn advance(ball: &mut Ball, dt: f32) {
    ball.pos += ball.vel * dt;
}

/// Top/bottom boundary handling
///
/// Open and solid walls reflect and clamp; wrap teleports to the opposite
/// edge with velocity untouched. Returns true on a reflection.
pub fn resolve_walls(ball: &mut Ball, walls: WallMode) -> bool {
    let r = ball.radius;
    match walls {
        WallMode::Open | WallMode::Solid => {
            if ball.pos.y - r < 0.0 {
                ball.pos.y = r;
                ball.vel.y = ball.vel.y.abs();
                true
            } else if ball.pos.y + r > FIELD_HEIGHT {
                ball.pos.y = FIELD_HEIGHT - r;
                ball.vel.y = -ball.vel.y.abs();
                true
            } else {
                false
            }
        }
        WallMode::Wrap => {
            if ball.pos.y < -r {
                ball.pos.y = FIELD_HEIGHT + r;
            } else if ball.pos.y > FIELD_HEIGHT + r {
                ball.pos.y = -r;
            }
            false
        }
    }
}

/// Bounce off a static rectangle along the axis of least penetration
pub fn resolve_obstacle(ball: &mut Ball, rect: &Rect) -> bool {
    let Some(contact) = circle_rect_overlap(ball.pos, ball.radius, rect) else {
        return false;
    };
    let r = ball.radius;

    if contact.overlap.x < contact.overlap.y {
        // Side face
        let normal = if contact.delta.x != 0.0 {
            contact.delta.x.signum()
        } else {
            -ball.vel.x.signum()
        };
        if ball.vel.x * normal < 0.0 {
            ball.vel.x = -ball.vel.x;
        }
        ball.pos.x = if normal > 0.0 {
            rect.right() + r
        } else {
            rect.x - r
        };
    } else {
        // Top/bottom face (also taken when the center is inside)
        let normal = if contact.delta.y != 0.0 {
            contact.delta.y.signum()
        } else {
            -ball.vel.y.signum()
        };
        if ball.vel.y * normal < 0.0 {
            ball.vel.y = -ball.vel.y;
        }
        ball.pos.y = if normal > 0.0 {
            rect.bottom() + r
        } else {
            rect.y - r
        };
    }
    true
}

/// Return the ball off a paddle
///
/// The ball is placed flush against the paddle face, its authoritative speed
/// grows, and velocity is rebuilt from the relative hit offset:
/// `vy = offset * max_vy`, `|vx| = sqrt(max(floor, speed² - vy²))`.
/// Balls already moving away from the paddle, or whose center is already
/// behind the paddle's center line, are left alone.
///
/// Returns the hit offset in `[-1, 1]` on contact.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> Option<f32> {
    let rect = paddle.rect();
    circle_rect_overlap(ball.pos, ball.radius, &rect)?;

    // Direction the ball must leave in
    let away = paddle.side.opposite().direction();
    if ball.vel.x * away > 0.0 {
        return None;
    }
    let behind = match paddle.side {
        Side::Left => ball.pos.x < rect.center().x,
        Side::Right => ball.pos.x > rect.center().x,
    };
    if behind {
        return None;
    }

    ball.pos.x = match paddle.side {
        Side::Left => rect.right() + ball.radius,
        Side::Right => rect.x - ball.radius,
    };

    let offset = ((ball.pos.y - rect.center().y) / (rect.h / 2.0)).clamp(-1.0, 1.0);
    ball.speed *= ball.growth;

    let vy = offset * ball.max_vy;
    let vx = (ball.speed * ball.speed - vy * vy).max(MIN_VX_SQUARED).sqrt();
    ball.vel = Vec2::new(vx * away, vy);

    if ball.spin > 0.0 {
        apply_curve(ball, offset, away);
    }

    Some(offset)
}

/// Spin nudge after the primary reflection
///
/// A small push in the direction of travel and some damping of the vertical
/// component, both proportional to the hit offset.
fn apply_curve(ball: &mut Ball, offset: f32, away: f32) {
    let s = ball.spin * offset;
    ball.vel.x += away * s.abs() * CURVE_HORIZONTAL_NUDGE;
    ball.vel.y -= s * CURVE_VERTICAL_DAMPING;
}

/// Side awarded a point if the ball has fully left the field
pub fn goal_scored(ball: &Ball) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x - ball.radius > FIELD_WIDTH {
        Some(Side::Left)
    } else {
        None
    }
}

#[inline]
pub fn touches_powerup(ball: &Ball, powerup: &PowerUp) -> bool {
    circle_circle_overlap(ball.pos, ball.radius, powerup.pos, powerup.radius)
}

/// Longest distance a ball may travel between contact checks
///
/// A ball can only touch a paddle while its center is within
/// `PADDLE_WIDTH + 2 * radius` of the paddle horizontally; half of that keeps
/// every step landing inside the band in front of the paddle's center line.
#[inline]
pub fn max_step_distance(ball: &Ball) -> f32 {
    PADDLE_WIDTH / 2.0 + ball.radius
}

/// Advance one ball and resolve walls, obstacles and paddles
///
/// The frame is split into sub-steps no longer than [`max_step_distance`].
/// Time left over after `MAX_BALL_SUBSTEPS` steps is dropped.
pub fn resolve_ball(
    ball: &mut Ball,
    dt: f32,
    walls: WallMode,
    obstacles: &[Obstacle],
    paddles: [&Paddle; 2],
) -> BallContacts {
    let mut contacts = BallContacts::default();
    let mut remaining = dt.max(0.0);

    for _ in 0..MAX_BALL_SUBSTEPS {
        let speed = ball.vel.length();
        let step = if speed > 0.0 {
            remaining.min(max_step_distance(ball) / speed)
        } else {
            remaining
        };

        advance(ball, step);
        contacts.wall_bounce |= resolve_walls(ball, walls);

        if walls == WallMode::Solid {
            for obstacle in obstacles {
                if resolve_obstacle(ball, &obstacle.rect) {
                    contacts.obstacle_hits += 1;
                }
            }
        }

        for paddle in paddles {
            if resolve_paddle(ball, paddle).is_some() {
                contacts.paddle = Some(paddle.side);
            }
        }

        remaining -= step;
        if remaining <= 0.0 {
            break;
        }
    }

    contacts
}

/// Advance every live ball for one tick
///
/// Stops at the first goal and returns the side awarded the point. Balls
/// spawned during the pass start moving on the next tick.
pub fn step_balls(state: &mut GameState, dt: f32) -> Option<Side> {
    let power_mode = state.settings.mode == Mode::Power;
    let count = state.balls.len();

    for i in 0..count {
        let contacts = resolve_ball(
            &mut state.balls[i],
            dt,
            state.settings.walls,
            &state.obstacles,
            [&state.left, &state.right],
        );

        if contacts.wall_bounce {
            state.events.wall_bounces += 1;
        }
        state.events.obstacle_hits += contacts.obstacle_hits;

        if contacts.paddle.is_some() {
            state.events.paddle_hits += 1;
            if power_mode {
                powerup::maybe_spawn(state);
            }
        }

        if power_mode {
            powerup::collect(state, i);
        }

        if let Some(scorer) = goal_scored(&state.balls[i]) {
            return Some(scorer);
        }
    }

    None
}
