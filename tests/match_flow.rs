use glam::Vec2;

use pong_deluxe::consts::*;
use pong_deluxe::persistence::{load_settings, save_settings};
use pong_deluxe::sim::{MatchPhase, Outcome, PowerUpKind, Side, TickInput, powerup, tick};
use pong_deluxe::snapshot::Frame;
use pong_deluxe::{GameState, Mode, Settings, WallMode};

fn serve() -> TickInput {
    TickInput {
        serve: true,
        ..Default::default()
    }
}

/// Put the ball just past a goal line, heading out
fn force_goal(state: &mut GameState, scorer: Side) {
    let x = match scorer {
        Side::Left => FIELD_WIDTH + 2.0,
        Side::Right => -2.0,
    };
    state.balls[0].pos = Vec2::new(x, FIELD_HEIGHT / 2.0);
    state.balls[0].vel = Vec2::new(scorer.opposite().direction() * 600.0, 0.0);
}

fn play_point(state: &mut GameState, scorer: Side) {
    tick(state, &serve(), SIM_DT);
    assert_eq!(state.phase, MatchPhase::Active);
    force_goal(state, scorer);
    tick(state, &TickInput::default(), SIM_DT);
    assert_eq!(state.events.point, Some(scorer));
    while state.phase == MatchPhase::ScoredPause {
        tick(state, &TickInput::default(), SIM_DT);
    }
}

#[test]
fn classic_match_to_target() {
    let settings = Settings {
        players: 2,
        target: 3,
        ..Default::default()
    };
    let mut state = GameState::new(settings, 21);

    play_point(&mut state, Side::Left);
    play_point(&mut state, Side::Right);
    play_point(&mut state, Side::Left);
    assert_eq!(state.phase, MatchPhase::WaitingToServe);
    play_point(&mut state, Side::Left);

    assert_eq!(state.phase, MatchPhase::Finished);
    assert_eq!(state.outcome, Some(Outcome::Won(Side::Left)));
    assert_eq!(Frame::capture(&state).hud.overlay, Some("Left Wins!"));

    // Reset returns to a fresh match with the same settings
    let reset = TickInput {
        reset: true,
        ..Default::default()
    };
    tick(&mut state, &reset, SIM_DT);
    assert_eq!(state.phase, MatchPhase::WaitingToServe);
    assert_eq!((state.scores.left, state.scores.right), (0, 0));
    assert_eq!(state.settings.target, 3);
}

#[test]
fn serve_heads_toward_conceder() {
    let settings = Settings {
        players: 2,
        ..Default::default()
    };
    let mut state = GameState::new(settings, 3);
    play_point(&mut state, Side::Left);
    assert_eq!(state.next_serve, Side::Right);

    tick(&mut state, &serve(), SIM_DT);
    assert!(state.balls[0].vel.x > 0.0);
}

#[test]
fn timed_match_ends_on_countdown() {
    let settings = Settings {
        players: 2,
        mode: Mode::Timed,
        timer_sec: 15.0,
        ..Default::default()
    };
    let mut state = GameState::new(settings, 5);
    play_point(&mut state, Side::Right);

    // Countdown is frozen while waiting to serve
    let frozen = state.time_left;
    for _ in 0..120 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert_eq!(state.time_left, frozen);

    tick(&mut state, &serve(), SIM_DT);
    // Pin the ball at midfield until time runs out
    for _ in 0..(60 * 20) {
        if state.phase == MatchPhase::Finished {
            break;
        }
        state.balls[0].pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert_eq!(state.phase, MatchPhase::Finished);
    assert_eq!(state.outcome, Some(Outcome::TimeWon(Side::Right)));
    assert_eq!(state.time_left, 0.0);
}

#[test]
fn multiball_serves_every_ball() {
    let settings = Settings {
        players: 2,
        mode: Mode::Multiball,
        ..Default::default()
    };
    let mut state = GameState::new(settings, 17);
    assert_eq!(state.balls.len(), 3);
    tick(&mut state, &serve(), SIM_DT);
    assert!(state.balls.iter().all(|b| b.is_moving()));
    let toward = state.next_serve.direction();
    assert!(state.balls.iter().all(|b| b.vel.x * toward > 0.0));
}

#[test]
fn power_mode_pickup_and_expiry() {
    let settings = Settings {
        players: 2,
        mode: Mode::Power,
        ..Default::default()
    };
    let mut state = GameState::new(settings, 8);
    state.next_serve = Side::Right;
    tick(&mut state, &serve(), SIM_DT);

    // Drop an enlarge right in the ball's path
    let ahead = state.balls[0].pos + state.balls[0].vel * SIM_DT;
    powerup::spawn(&mut state, PowerUpKind::EnlargePaddle, ahead);
    powerup::spawn(&mut state, PowerUpKind::SlowBall, Vec2::new(120.0, 80.0));
    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(
        state.events.powerups_collected,
        vec![(PowerUpKind::EnlargePaddle, Side::Right)]
    );
    assert!(state.right.height > state.left.height);
    assert_eq!(state.powerups.len(), 1);

    // The other one times out, but not while paused
    let pause = TickInput {
        pause: true,
        ..Default::default()
    };
    tick(&mut state, &pause, SIM_DT);
    for _ in 0..(60 * 13) {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    assert_eq!(state.powerups.len(), 1, "paused tick must not age power-ups");
    tick(&mut state, &pause, SIM_DT);
    for _ in 0..(60 * 13) {
        tick(&mut state, &TickInput::default(), SIM_DT);
        state.balls.iter_mut().for_each(|b| b.pos = Vec2::new(FIELD_WIDTH / 2.0, 40.0));
    }
    assert!(state.powerups.is_empty());
}

#[test]
fn solid_walls_keep_ball_on_field() {
    let settings = Settings {
        players: 0,
        walls: WallMode::Solid,
        mode: Mode::Endless,
        ..Default::default()
    };
    let mut state = GameState::new(settings, 77);
    for _ in 0..(60 * 30) {
        let input = TickInput {
            serve: state.phase == MatchPhase::WaitingToServe,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        for ball in &state.balls {
            assert!(ball.pos.y >= ball.radius - 1e-3);
            assert!(ball.pos.y <= FIELD_HEIGHT - ball.radius + 1e-3);
        }
    }
}

#[test]
fn saved_settings_drive_a_new_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings {
        mode: Mode::Curve,
        paddle_height: 140.0,
        ..Default::default()
    };
    save_settings(&path, &settings).unwrap();

    let state = GameState::new(load_settings(&path), 1);
    assert_eq!(state.settings.mode, Mode::Curve);
    assert_eq!(state.left.height, 140.0);
    assert_eq!(state.balls[0].spin, CURVE_SPIN);
}
