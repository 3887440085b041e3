//! Power-up spawning, expiry and effects (power mode only)

use glam::Vec2;
use rand::Rng;

use super::collision::touches_powerup;
use super::state::{GameState, PowerUp, PowerUpKind, Side};
use crate::consts::*;

/// Roll the spawn chance after a paddle contact
pub fn maybe_spawn(state: &mut GameState) -> Option<PowerUpKind> {
    if !state.rng.random_bool(POWERUP_CHANCE) {
        return None;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = Vec2::new(
        state
            .rng
            .random_range(POWERUP_MARGIN_X..FIELD_WIDTH - POWERUP_MARGIN_X),
        state
            .rng
            .random_range(POWERUP_MARGIN_Y..FIELD_HEIGHT - POWERUP_MARGIN_Y),
    );
    spawn(state, kind, pos);
    Some(kind)
}

/// Place a power-up on the field
pub fn spawn(state: &mut GameState, kind: PowerUpKind, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        kind,
        pos,
        radius: POWERUP_RADIUS,
        ttl: POWERUP_LIFETIME,
    });
    state.events.powerups_spawned.push(kind);
    log::debug!("Spawned {kind:?} #{id} at ({:.0}, {:.0})", pos.x, pos.y);
    id
}

/// Age every power-up and drop the expired ones
pub fn age(state: &mut GameState, dt: f32) {
    let before = state.powerups.len();
    for p in &mut state.powerups {
        p.ttl -= dt;
    }
    state.powerups.retain(|p| p.ttl > 0.0);
    state.events.powerups_expired += (before - state.powerups.len()) as u32;
}

/// Apply and remove every power-up the ball is touching
///
/// The pickup is credited to the side the ball is travelling toward.
pub fn collect(state: &mut GameState, ball_index: usize) {
    let Some(ball) = state.balls.get(ball_index) else {
        return;
    };
    let credited = Side::from_velocity(ball.vel.x);
    let (taken, kept): (Vec<PowerUp>, Vec<PowerUp>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| touches_powerup(ball, p));
    state.powerups = kept;

    for p in taken {
        apply(state, p.kind, credited);
        state.events.powerups_collected.push((p.kind, credited));
    }
}

/// Apply an effect on behalf of `credited`
///
/// Enlarge helps the credited side; shrink and invert hit the opponent.
/// Speed changes touch every ball.
pub fn apply(state: &mut GameState, kind: PowerUpKind, credited: Side) {
    log::debug!("{} collected {kind:?}", credited.as_str());
    match kind {
        PowerUpKind::EnlargePaddle => {
            let paddle = state.paddle_mut(credited);
            paddle.grow.push();
            paddle.refresh_height();
        }
        PowerUpKind::ShrinkPaddle => {
            let paddle = state.paddle_mut(credited.opposite());
            paddle.shrink.push();
            paddle.refresh_height();
        }
        PowerUpKind::SlowBall => scale_balls(state, SLOW_FACTOR),
        PowerUpKind::SpeedBall => scale_balls(state, FAST_FACTOR),
        PowerUpKind::ExtraBall => {
            let mut ball = state.make_ball();
            let toward = if state.rng.random_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            };
            let tilt = state.serve_tilt();
            ball.serve(toward, tilt);
            state.balls.push(ball);
        }
        PowerUpKind::InvertControls => {
            state.paddle_mut(credited.opposite()).invert_timer = INVERT_DURATION;
        }
    }
}

fn scale_balls(state: &mut GameState, factor: f32) {
    for ball in &mut state.balls {
        ball.vel *= factor;
        ball.speed *= factor;
    }
}
