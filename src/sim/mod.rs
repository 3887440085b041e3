//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod geometry;
pub mod powerup;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::BallContacts;
pub use geometry::{Rect, RectContact, circle_circle_overlap, circle_rect_overlap};
pub use state::{
    Ball, EffectStack, GameState, MatchPhase, Obstacle, Outcome, Paddle, PowerUp, PowerUpKind,
    Scores, Side, TickEvents,
};
pub use tick::{TickInput, clamp_dt, tick};
