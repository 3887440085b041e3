//! Game state and core simulation types
//!
//! Everything the tick function mutates lives in [`GameState`]. Construction
//! and [`GameState::reset`] are the only lifecycle boundaries.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp};
use crate::consts::*;
use crate::settings::{Mode, Settings, WallMode};

/// Which half of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing toward this side (-1 left, +1 right)
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// The side a horizontal velocity is heading toward
    pub fn from_velocity(vx: f32) -> Self {
        if vx > 0.0 { Side::Right } else { Side::Left }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Bounded counter of like-kind paddle effects, decaying linearly
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectStack {
    pub level: f32,
}

impl EffectStack {
    /// Add one level, capped at the stack limit
    pub fn push(&mut self) {
        self.level = (self.level + 1.0).min(EFFECT_STACK_CAP);
    }

    /// Lose levels over time; never drops below zero
    pub fn decay(&mut self, dt: f32) {
        if self.level > 0.0 {
            self.level = (self.level - dt * EFFECT_DECAY_RATE).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.level > 0.0
    }
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Top edge of the effective rectangle
    pub y: f32,
    /// Height before grow/shrink effects
    pub base_height: f32,
    /// Current effective height (always within the height band)
    pub height: f32,
    /// Vertical velocity this tick (pixels/s, positive = down)
    pub vy: f32,
    /// Driven by the AI controller instead of player intent
    pub ai: bool,
    pub grow: EffectStack,
    pub shrink: EffectStack,
    /// Seconds of control inversion remaining
    pub invert_timer: f32,
}

impl Paddle {
    pub fn new(side: Side, base_height: f32, ai: bool) -> Self {
        let height = clamp(base_height, MIN_PADDLE_HEIGHT, MAX_PADDLE_HEIGHT);
        Self {
            side,
            y: (FIELD_HEIGHT - height) / 2.0,
            base_height,
            height,
            vy: 0.0,
            ai,
            grow: EffectStack::default(),
            shrink: EffectStack::default(),
            invert_timer: 0.0,
        }
    }

    /// Left edge of the paddle
    pub fn x(&self) -> f32 {
        match self.side {
            Side::Left => PADDLE_INSET,
            Side::Right => FIELD_WIDTH - PADDLE_INSET - PADDLE_WIDTH,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x(), self.y, PADDLE_WIDTH, self.height)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Height after stacked effects, clamped to the height band
    pub fn effective_height(&self) -> f32 {
        let grow = 1.0 + self.grow.level * GROW_PER_LEVEL;
        let shrink = 1.0 - self.shrink.level * SHRINK_PER_LEVEL;
        clamp(
            self.base_height * grow * shrink,
            MIN_PADDLE_HEIGHT,
            MAX_PADDLE_HEIGHT,
        )
    }

    /// Recompute height around the current center, then re-clamp
    pub fn refresh_height(&mut self) {
        let center = self.center_y();
        self.height = self.effective_height();
        self.y = center - self.height / 2.0;
        self.clamp_position();
    }

    pub fn clamp_position(&mut self) {
        self.y = clamp(self.y, 0.0, FIELD_HEIGHT - self.height);
    }

    /// -1 while controls are inverted, +1 otherwise
    pub fn control_sign(&self) -> f32 {
        if self.invert_timer > 0.0 { -1.0 } else { 1.0 }
    }

    /// Apply velocity for one step and keep the paddle on the field
    pub fn integrate(&mut self, dt: f32) {
        self.y += self.vy * dt;
        self.clamp_position();
    }

    /// Age timed effects
    pub fn tick_effects(&mut self, dt: f32) {
        self.invert_timer = (self.invert_timer - dt).max(0.0);
        self.grow.decay(dt);
        self.shrink.decay(dt);
        self.refresh_height();
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Authoritative speed; `vel` is rebuilt from it on paddle contact
    pub speed: f32,
    /// Multiplier on `speed` per paddle contact
    pub growth: f32,
    /// Vertical speed produced by an edge hit
    pub max_vy: f32,
    /// Curve coefficient (zero outside curve mode)
    pub spin: f32,
}

impl Ball {
    pub fn new(id: u32, settings: &Settings) -> Self {
        Self {
            id,
            pos: field_center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed: settings.ball_speed,
            growth: settings.speed_growth,
            max_vy: BALL_MAX_VY,
            spin: if settings.mode == Mode::Curve {
                CURVE_SPIN
            } else {
                0.0
            },
        }
    }

    /// Stop at the center of the field
    pub fn center(&mut self) {
        self.pos = field_center();
        self.vel = Vec2::ZERO;
    }

    /// Launch from center toward `toward` at `speed`, tilted by `tilt` radians
    pub fn serve(&mut self, toward: Side, tilt: f32) {
        self.pos = field_center();
        self.vel = Vec2::new(
            tilt.cos() * self.speed * toward.direction(),
            tilt.sin() * self.speed,
        );
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// Static rectangle in solid-wall mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// Power-up effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    EnlargePaddle,
    ShrinkPaddle,
    SlowBall,
    SpeedBall,
    ExtraBall,
    InvertControls,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::EnlargePaddle,
        PowerUpKind::ShrinkPaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::SpeedBall,
        PowerUpKind::ExtraBall,
        PowerUpKind::InvertControls,
    ];
}

/// A power-up waiting on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Seconds until it disappears
    pub ttl: f32,
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Balls frozen at center until a serve arrives
    WaitingToServe,
    /// Physics running
    Active,
    /// Brief hold after a point, before the next serve is accepted
    ScoredPause,
    /// Match over; only a reset leaves this phase
    Finished,
}

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A side reached the winning score
    Won(Side),
    /// Countdown expired with a leader
    TimeWon(Side),
    /// Countdown expired level
    TimeDraw,
}

impl Outcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Won(side) | Outcome::TimeWon(side) => Some(*side),
            Outcome::TimeDraw => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won(Side::Left) => "Left Wins!",
            Outcome::Won(Side::Right) => "Right Wins!",
            Outcome::TimeWon(Side::Left) => "Time! Left wins.",
            Outcome::TimeWon(Side::Right) => "Time! Right wins.",
            Outcome::TimeDraw => "Time! Tie game.",
        }
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub left: u32,
    pub right: u32,
}

impl Scores {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// Side strictly ahead, if any
    pub fn leader(&self) -> Option<Side> {
        if self.left > self.right {
            Some(Side::Left)
        } else if self.right > self.left {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Things that happened during the last tick (for audio/visual feedback)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    pub paddle_hits: u32,
    pub wall_bounces: u32,
    pub obstacle_hits: u32,
    /// Side awarded a point this tick
    pub point: Option<Side>,
    pub powerups_spawned: Vec<PowerUpKind>,
    /// Collected kind and the side credited with the pickup
    pub powerups_collected: Vec<(PowerUpKind, Side)>,
    pub powerups_expired: u32,
    pub finished: Option<Outcome>,
}

impl TickEvents {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn field_center() -> Vec2 {
    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Configuration the match was built from
    pub settings: Settings,
    /// Seed the RNG was created with
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: MatchPhase,
    /// Orthogonal to `phase`; skips all advancement while set
    pub paused: bool,
    pub scores: Scores,
    /// Seconds left on the countdown (timed mode)
    pub time_left: f32,
    /// Seconds left in the post-point hold
    pub score_pause: f32,
    /// Side the next serve heads toward
    pub next_serve: Side,
    /// Side that won the most recent point
    pub last_point: Option<Side>,
    pub outcome: Option<Outcome>,
    /// Simulation seconds elapsed since construction/reset
    pub elapsed: f32,
    pub left: Paddle,
    pub right: Paddle,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    pub obstacles: Vec<Obstacle>,
    /// Power-ups on the field (sorted by id)
    pub powerups: Vec<PowerUp>,
    /// Events from the most recent tick
    pub events: TickEvents,
    next_id: u32,
}

impl GameState {
    /// Build a fresh match from settings
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitize();
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_serve = if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let mut state = Self {
            left: Paddle::new(Side::Left, settings.paddle_height, settings.is_ai(Side::Left)),
            right: Paddle::new(
                Side::Right,
                settings.paddle_height,
                settings.is_ai(Side::Right),
            ),
            time_left: settings.timer_sec,
            settings,
            seed,
            rng,
            phase: MatchPhase::WaitingToServe,
            paused: false,
            scores: Scores::default(),
            score_pause: 0.0,
            next_serve,
            last_point: None,
            outcome: None,
            elapsed: 0.0,
            balls: Vec::new(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            events: TickEvents::default(),
            next_id: 1,
        };
        state.setup_round();
        log::info!(
            "Match ready: mode={} walls={} ai={} players={}",
            state.settings.mode.as_str(),
            state.settings.walls.as_str(),
            state.settings.ai.as_str(),
            state.settings.players
        );
        state
    }

    /// Discard everything and rebuild from the current settings
    ///
    /// The next match is seeded from the current RNG so consecutive matches
    /// differ.
    pub fn reset(&mut self) {
        let settings = self.settings.clone();
        self.apply_settings(settings);
    }

    /// Rebuild the match from new settings
    pub fn apply_settings(&mut self, settings: Settings) {
        let seed = self.rng.random::<u64>();
        *self = Self::new(settings, seed);
        log::info!("Match reset (seed {seed})");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Create a ball at center with base speed and growth from settings
    pub fn make_ball(&mut self) -> Ball {
        let id = self.next_entity_id();
        Ball::new(id, &self.settings)
    }

    /// Fresh balls and obstacles for the next serve
    ///
    /// Balls spawned mid-rally by power-ups are discarded; every ball returns
    /// to center at base speed.
    pub fn setup_round(&mut self) {
        let count = if self.settings.mode == Mode::Multiball {
            MULTIBALL_COUNT
        } else {
            1
        };
        self.balls.clear();
        for _ in 0..count {
            let ball = self.make_ball();
            self.balls.push(ball);
        }
        self.regenerate_obstacles();
    }

    /// Place 1-3 random obstacles around midfield (solid walls only)
    pub fn regenerate_obstacles(&mut self) {
        self.obstacles.clear();
        if self.settings.walls != WallMode::Solid {
            return;
        }
        let count = self.rng.random_range(MIN_OBSTACLES..=MAX_OBSTACLES);
        for _ in 0..count {
            let w = self.rng.random_range(20.0..80.0);
            let h = self.rng.random_range(60.0..200.0);
            let x = FIELD_WIDTH / 2.0 - w / 2.0 + self.rng.random_range(-80.0..80.0);
            let y = FIELD_HEIGHT / 2.0 - h / 2.0 + self.rng.random_range(-110.0..110.0);
            let x = clamp(x, 0.0, FIELD_WIDTH - w);
            let y = clamp(y, 0.0, FIELD_HEIGHT - h);
            self.obstacles.push(Obstacle {
                rect: Rect::new(x, y, w, h),
            });
        }
    }

    /// Random serve tilt in radians
    pub fn serve_tilt(&mut self) -> f32 {
        self.rng.random_range(-SERVE_TILT..SERVE_TILT)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.powerups.sort_by_key(|p| p.id);
    }
}
