#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use strider_core::Vec3;

use crate::curve::smoothstep;

/// Precomputed off-mesh jump segment.
///
/// The flight path is a cubic Bezier whose inner control points sit
/// `jump_height` above the endpoints, sampled with a smoothstep time warp so
/// the agent eases out of the takeoff and into the landing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JumpLink {
    pub start: Vec3,
    pub end: Vec3,
    pub jump_height: f32,
    pub duration: f32,
}

impl JumpLink {
    pub fn new(start: Vec3, end: Vec3, jump_height: f32, duration: f32) -> Self {
        Self {
            start,
            end,
            jump_height,
            duration: duration.max(f32::EPSILON),
        }
    }

    /// Flight position at normalized time `t` in `[0, 1]`.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let lift = Vec3::UP * self.jump_height;
        cubic_bezier(
            self.start,
            self.start + lift,
            self.end + lift,
            self.end,
            smoothstep(t),
        )
    }
}

fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, s: f32) -> Vec3 {
    let u = 1.0 - s;
    p0 * (u * u * u) + p1 * (3.0 * u * u * s) + p2 * (3.0 * u * s * s) + p3 * (s * s * s)
}

/// Drives an agent along a [`JumpLink`], one tick at a time.
///
/// The embedding world owns this while the link is being traversed; the
/// traversal state machine only receives the start/end notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkTraversal {
    link: JumpLink,
    elapsed: f32,
}

impl LinkTraversal {
    pub fn new(link: JumpLink) -> Self {
        Self { link, elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.link.duration);
        self.link.position_at(self.elapsed / self.link.duration)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.link.duration
    }

    pub fn link(&self) -> &JumpLink {
        &self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_path_interpolates_endpoints() {
        let link = JumpLink::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 2.0, 1.0);
        assert_eq!(link.position_at(0.0), Vec3::ZERO);
        let end = link.position_at(1.0);
        assert!(end.distance(Vec3::new(0.0, 0.0, 4.0)) <= 1e-5);

        // Mid-flight the agent is airborne.
        assert!(link.position_at(0.5).y > 1.0);
    }

    #[test]
    fn traversal_finishes_after_duration() {
        let link = JumpLink::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 2.0, 1.0);
        let mut flight = LinkTraversal::new(link);

        let mut steps = 0;
        while !flight.finished() {
            flight.advance(0.1);
            steps += 1;
            assert!(steps <= 11, "flight should end after ~10 steps");
        }
        assert!(flight.advance(0.1).distance(link.end) <= 1e-5);
    }
}
