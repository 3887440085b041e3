//! Match rules: serving, scoring, win conditions and the countdown
//!
//! ```text
//! WaitingToServe --serve--> Active --point--> ScoredPause --0.75s--> WaitingToServe
//!                             |                    |
//!                             +--win / time up--> Finished <--time up--+
//! ```
//!
//! Pause is a flag on top of `Active`; only `reset` leaves `Finished`.

use super::state::{GameState, MatchPhase, Outcome, Side};
use crate::consts::SCORE_PAUSE;
use crate::settings::Mode;

/// Launch every ball toward `next_serve`
///
/// Ignored outside `WaitingToServe`. Returns true if the serve happened.
pub fn serve(state: &mut GameState) -> bool {
    if state.phase != MatchPhase::WaitingToServe {
        return false;
    }
    let toward = state.next_serve;
    for i in 0..state.balls.len() {
        let tilt = state.serve_tilt();
        state.balls[i].serve(toward, tilt);
    }
    state.phase = MatchPhase::Active;
    log::debug!("Serve toward {}", toward.as_str());
    true
}

/// Flip the pause flag (only while a rally is live)
pub fn toggle_pause(state: &mut GameState) -> bool {
    if state.phase != MatchPhase::Active {
        return false;
    }
    state.paused = !state.paused;
    true
}

/// Credit a point and move to the post-point hold or the end of the match
///
/// Power-ups on the field and paddle effects carry over to the next rally.
pub fn award_point(state: &mut GameState, scorer: Side) {
    if state.phase == MatchPhase::Finished {
        return;
    }
    state.scores.award(scorer);
    state.last_point = Some(scorer);
    state.events.point = Some(scorer);
    state.next_serve = if state.settings.serve_toward_conceder {
        scorer.opposite()
    } else {
        scorer
    };
    log::info!(
        "Point {}: {} - {}",
        scorer.as_str(),
        state.scores.left,
        state.scores.right
    );

    state.setup_round();

    match score_outcome(state) {
        Some(outcome) => finish(state, outcome),
        None => {
            state.phase = MatchPhase::ScoredPause;
            state.score_pause = SCORE_PAUSE;
        }
    }
}

/// Outcome decided by points alone, per mode
pub fn score_outcome(state: &GameState) -> Option<Outcome> {
    let mode = state.settings.mode;
    let needed = if mode.uses_target_score() {
        state.settings.target
    } else if mode == Mode::SuddenDeath {
        1
    } else {
        return None;
    };
    let scores = state.scores;
    if scores.left.max(scores.right) >= needed {
        scores.leader().map(Outcome::Won)
    } else {
        None
    }
}

/// Outcome when the countdown runs out
pub fn time_outcome(state: &GameState) -> Outcome {
    match state.scores.leader() {
        Some(side) => Outcome::TimeWon(side),
        None => Outcome::TimeDraw,
    }
}

/// Run the post-point hold and the timed-mode countdown
pub fn advance_clock(state: &mut GameState, dt: f32) {
    let counting = matches!(state.phase, MatchPhase::Active | MatchPhase::ScoredPause);
    if state.settings.mode == Mode::Timed && counting {
        state.time_left = (state.time_left - dt).max(0.0);
        if state.time_left <= 0.0 {
            let outcome = time_outcome(state);
            finish(state, outcome);
            return;
        }
    }

    if state.phase == MatchPhase::ScoredPause {
        state.score_pause -= dt;
        if state.score_pause <= 0.0 {
            state.score_pause = 0.0;
            state.phase = MatchPhase::WaitingToServe;
        }
    }
}

/// Enter `Finished` and freeze the balls
pub fn finish(state: &mut GameState, outcome: Outcome) {
    state.phase = MatchPhase::Finished;
    state.paused = false;
    state.outcome = Some(outcome);
    state.events.finished = Some(outcome);
    for ball in &mut state.balls {
        ball.vel = glam::Vec2::ZERO;
    }
    log::info!("{}", outcome.message());
}
