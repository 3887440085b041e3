//! Per-frame simulation tick
//!
//! Order within a tick: paddles (human intent or AI), balls, power-up aging,
//! then scoring and win checks.

use super::state::{GameState, MatchPhase, Side};
use super::{ai, collision, powerup, rules};
use crate::consts::*;
use crate::settings::Mode;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left paddle intent, -1 (up) to +1 (down)
    pub left: f32,
    /// Right paddle intent, -1 (up) to +1 (down)
    pub right: f32,
    /// Serve (ignored unless waiting to serve)
    pub serve: bool,
    /// Pause toggle (ignored unless a rally is live)
    pub pause: bool,
    /// Rebuild the match from current settings
    pub reset: bool,
}

impl TickInput {
    pub fn intent(&self, side: Side) -> f32 {
        let axis = match side {
            Side::Left => self.left,
            Side::Right => self.right,
        };
        if axis.is_finite() {
            axis.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Clamp a frame's elapsed time into `[0, MAX_FRAME_DT]`
pub fn clamp_dt(elapsed: f32) -> f32 {
    if elapsed.is_finite() && elapsed > 0.0 {
        elapsed.min(MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: f32) {
    state.events.clear();

    if input.reset {
        state.reset();
        return;
    }

    if input.pause {
        rules::toggle_pause(state);
    }
    if state.paused {
        return;
    }

    let dt = clamp_dt(elapsed);
    state.elapsed += dt;

    if input.serve {
        rules::serve(state);
    }

    drive_paddles(state, input, dt);

    let point = if state.phase == MatchPhase::Active {
        collision::step_balls(state, dt)
    } else {
        None
    };

    if state.settings.mode == Mode::Power && state.phase != MatchPhase::Finished {
        powerup::age(state, dt);
    }

    if let Some(scorer) = point {
        rules::award_point(state, scorer);
    }
    rules::advance_clock(state, dt);

    state.normalize_order();
}

fn drive_paddles(state: &mut GameState, input: &TickInput, dt: f32) {
    let difficulty = state.settings.ai;
    let time = state.elapsed;

    for side in Side::BOTH {
        let paddle = match side {
            Side::Left => &mut state.left,
            Side::Right => &mut state.right,
        };
        if paddle.ai {
            ai::drive(paddle, &state.balls, difficulty, time, dt);
        } else {
            paddle.vy = input.intent(side) * PADDLE_SPEED * paddle.control_sign();
        }
        paddle.integrate(dt);
        paddle.tick_effects(dt);
    }
}
