//! Geometry primitives for circle-vs-box contact
//!
//! Every overlap test in the simulation reduces to one of two shapes: an
//! axis-aligned rectangle (paddles, obstacles) or a circle (balls, power-ups).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Clamp `v` into `[lo, hi]` without panicking when `lo > hi`
///
/// `f32::clamp` asserts `lo <= hi`; a paddle taller than the field would trip
/// that. Here the lower bound wins instead.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Nearest point of the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp(p.x, self.x, self.right()),
            clamp(p.y, self.y, self.bottom()),
        )
    }
}

/// Circle/rectangle contact from closest-point projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectContact {
    /// Circle center minus the nearest rectangle point
    pub delta: Vec2,
    /// Penetration along x and y (radius minus separation on that axis)
    pub overlap: Vec2,
}

/// Test a circle against a rectangle
///
/// Overlap holds when the squared distance from the center to the nearest
/// point of the rectangle is at most radius².
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> Option<RectContact> {
    let nearest = rect.closest_point(center);
    let delta = center - nearest;
    if delta.length_squared() <= radius * radius {
        Some(RectContact {
            delta,
            overlap: Vec2::new(radius - delta.x.abs(), radius - delta.y.abs()),
        })
    } else {
        None
    }
}

/// Test two circles for overlap (touching counts)
#[inline]
pub fn circle_circle_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}
