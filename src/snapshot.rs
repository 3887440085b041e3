//! Per-tick outputs for front ends
//!
//! A [`Frame`] is everything a renderer needs: instanced rectangles and
//! circles in field coordinates plus the HUD state. Instances are plain
//! `Pod` data so they can be uploaded to a GPU buffer as-is.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::settings::Mode;
use crate::sim::{GameState, MatchPhase, PowerUpKind};

/// One rectangle or circle to draw
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct Instance {
    /// Center in field coordinates
    pub position: [f32; 2],
    /// Full width and height (circles use the diameter for both)
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl Instance {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            size: [w, h],
            color,
        }
    }

    pub fn circle(x: f32, y: f32, radius: f32, color: [f32; 4]) -> Self {
        Self::new(x, y, radius * 2.0, radius * 2.0, color)
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.043, 0.059, 0.102, 1.0];
    pub const CENTER_LINE: [f32; 4] = [0.165, 0.2, 0.345, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.094, 0.129, 0.29, 1.0];
    pub const HUD_TEXT: [f32; 4] = [0.91, 0.918, 0.965, 1.0];
    pub const PADDLE: [f32; 4] = [0.722, 0.757, 1.0, 1.0];
    pub const BALL: [f32; 4] = [0.659, 0.941, 1.0, 1.0];

    pub const POWERUP_GROW: [f32; 4] = [0.345, 0.878, 0.624, 1.0];
    pub const POWERUP_SHRINK: [f32; 4] = [1.0, 0.365, 0.49, 1.0];
    pub const POWERUP_SLOW: [f32; 4] = [0.467, 0.714, 1.0, 1.0];
    pub const POWERUP_FAST: [f32; 4] = [1.0, 0.82, 0.4, 1.0];
    pub const POWERUP_MULTI: [f32; 4] = [0.78, 0.573, 0.918, 1.0];
    pub const POWERUP_INVERT: [f32; 4] = [1.0, 0.62, 0.392, 1.0];
}

pub fn powerup_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::EnlargePaddle => colors::POWERUP_GROW,
        PowerUpKind::ShrinkPaddle => colors::POWERUP_SHRINK,
        PowerUpKind::SlowBall => colors::POWERUP_SLOW,
        PowerUpKind::SpeedBall => colors::POWERUP_FAST,
        PowerUpKind::ExtraBall => colors::POWERUP_MULTI,
        PowerUpKind::InvertControls => colors::POWERUP_INVERT,
    }
}

/// Scoreboard, countdown and overlay text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub left_score: u32,
    pub right_score: u32,
    /// Whole seconds remaining (timed mode only)
    pub time_left: Option<u32>,
    /// Centered message, if any
    pub overlay: Option<&'static str>,
}

/// Overlay text for the current phase
pub fn overlay_text(state: &GameState) -> Option<&'static str> {
    if let Some(outcome) = state.outcome {
        return Some(outcome.message());
    }
    if state.paused {
        return Some("Paused (P to resume)");
    }
    match state.phase {
        MatchPhase::WaitingToServe if state.last_point.is_some() => {
            Some("Point scored! Press SPACE to serve")
        }
        MatchPhase::WaitingToServe => Some("Press SPACE to serve"),
        MatchPhase::ScoredPause => Some("Point scored!"),
        MatchPhase::Active | MatchPhase::Finished => None,
    }
}

/// Everything needed to draw one tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Paddles then obstacles
    pub rects: Vec<Instance>,
    /// Power-ups then balls
    pub circles: Vec<Instance>,
    pub hud: Hud,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let mut rects = Vec::with_capacity(2 + state.obstacles.len());
        for paddle in [&state.left, &state.right] {
            let r = paddle.rect();
            let c = r.center();
            rects.push(Instance::new(c.x, c.y, r.w, r.h, colors::PADDLE));
        }
        for obstacle in &state.obstacles {
            let r = obstacle.rect;
            let c = r.center();
            rects.push(Instance::new(c.x, c.y, r.w, r.h, colors::OBSTACLE));
        }

        let mut circles = Vec::with_capacity(state.powerups.len() + state.balls.len());
        for p in &state.powerups {
            circles.push(Instance::circle(p.pos.x, p.pos.y, p.radius, powerup_color(p.kind)));
        }
        for b in &state.balls {
            circles.push(Instance::circle(b.pos.x, b.pos.y, b.radius, colors::BALL));
        }

        let time_left = (state.settings.mode == Mode::Timed)
            .then(|| state.time_left.max(0.0).ceil() as u32);

        Self {
            rects,
            circles,
            hud: Hud {
                left_score: state.scores.left,
                right_score: state.scores.right,
                time_left,
                overlay: overlay_text(state),
            },
        }
    }

    /// Raw instance bytes for upload
    pub fn rect_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rects)
    }

    pub fn circle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.circles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, WallMode};
    use crate::sim::{Side, rules};

    #[test]
    fn test_capture_counts() {
        let settings = Settings {
            mode: Mode::Multiball,
            walls: WallMode::Solid,
            ..Default::default()
        };
        let state = GameState::new(settings, 8);
        let frame = Frame::capture(&state);
        assert_eq!(frame.rects.len(), 2 + state.obstacles.len());
        assert_eq!(frame.circles.len(), 3);
        assert_eq!(frame.rect_bytes().len(), frame.rects.len() * 32);
        assert_eq!(frame.hud.time_left, None);
    }

    #[test]
    fn test_overlay_follows_phase() {
        let mut state = GameState::new(Settings::default(), 8);
        assert_eq!(overlay_text(&state), Some("Press SPACE to serve"));

        rules::serve(&mut state);
        assert_eq!(overlay_text(&state), None);
        rules::toggle_pause(&mut state);
        assert_eq!(overlay_text(&state), Some("Paused (P to resume)"));
        rules::toggle_pause(&mut state);

        rules::award_point(&mut state, Side::Left);
        state.phase = MatchPhase::WaitingToServe;
        assert_eq!(
            overlay_text(&state),
            Some("Point scored! Press SPACE to serve")
        );
    }

    #[test]
    fn test_timed_hud_rounds_up() {
        let settings = Settings {
            mode: Mode::Timed,
            timer_sec: 30.0,
            ..Default::default()
        };
        let mut state = GameState::new(settings, 8);
        state.time_left = 12.2;
        let frame = Frame::capture(&state);
        assert_eq!(frame.hud.time_left, Some(13));
    }

    #[test]
    fn test_finished_overlay() {
        let settings = Settings {
            mode: Mode::SuddenDeath,
            ..Default::default()
        };
        let mut state = GameState::new(settings, 8);
        rules::award_point(&mut state, Side::Right);
        assert_eq!(Frame::capture(&state).hud.overlay, Some("Right Wins!"));
    }
}
