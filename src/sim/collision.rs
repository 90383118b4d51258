//! Collision detection and response for axis-aligned boxes
//!
//! Stands in for the engine's contact detection: every entity is a box
//! (top-left corner plus size) and a contact yields the separating normal
//! from the other box toward this one.

use glam::Vec2;

use super::entity::Body;

/// Result of an overlapping box pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Surface normal at the contact (pointing toward this body, for reflection)
    pub normal: Vec2,
    /// Penetration depth along the normal (for position correction)
    pub penetration: f32,
}

impl Collision {
    /// The same contact seen from the other body
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

/// Check whether `body` overlaps `other`
///
/// The contact axis is the one with the smaller overlap, so a ball clipping
/// the side of a brick bounces sideways instead of vertically.
pub fn box_collision(body: &Body, other: &Body) -> Option<Collision> {
    let (min_a, max_a) = (body.top_left, body.top_left + body.size);
    let (min_b, max_b) = (other.top_left, other.top_left + other.size);

    let overlap_x = max_a.x.min(max_b.x) - min_a.x.max(min_b.x);
    let overlap_y = max_a.y.min(max_b.y) - min_a.y.max(min_b.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let delta = body.center() - other.center();
    let collision = if overlap_x < overlap_y {
        Collision {
            normal: Vec2::new(if delta.x < 0.0 { -1.0 } else { 1.0 }, 0.0),
            penetration: overlap_x,
        }
    } else {
        Collision {
            normal: Vec2::new(0.0, if delta.y < 0.0 { -1.0 } else { 1.0 }),
            penetration: overlap_y,
        }
    };
    Some(collision)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
