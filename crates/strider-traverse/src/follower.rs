#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use strider_core::Vec3;

/// External path-following component.
///
/// Owns the agent's transform during free locomotion. The state machine only
/// reads its progress and toggles its authority: while `is_enabled()` is
/// false the follower must not move the agent, so transform ownership swaps
/// exclusively and atomically at maneuver boundaries.
pub trait PathFollower {
    /// Distance left along the current route.
    fn remaining_distance(&self) -> f32;

    fn is_stopped(&self) -> bool;
    fn set_stopped(&mut self, stopped: bool);

    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

/// Reference follower: constant-speed advance along a fixed polyline.
///
/// Stands in for a navigation-library follower in tests and simulations. The
/// embedding world calls [`WaypointFollower::advance`] each tick with the
/// agent's current position and applies the returned one.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointFollower {
    waypoints: Vec<Vec3>,
    next_index: usize,
    position: Vec3,
    speed: f32,
    stopped: bool,
    enabled: bool,
}

impl WaypointFollower {
    pub fn new(start: Vec3, waypoints: Vec<Vec3>, speed: f32) -> Self {
        Self {
            waypoints,
            next_index: 0,
            position: start,
            speed: speed.max(0.0),
            stopped: false,
            enabled: true,
        }
    }

    /// Advance from `position` along the remaining waypoints by `speed * dt`.
    ///
    /// Consumes waypoints exactly when reached, the same loop a navigation
    /// corridor follower runs over its corners. No-op while stopped or
    /// disabled.
    pub fn advance(&mut self, position: Vec3, dt: f32) -> Vec3 {
        self.position = position;
        if !self.enabled || self.stopped {
            return position;
        }

        let mut remaining = self.speed * dt.max(0.0);
        let mut current = position;

        while self.next_index < self.waypoints.len() && remaining > 0.0 {
            let target = self.waypoints[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                self.next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            break;
        }

        self.position = current;
        current
    }
}

impl PathFollower for WaypointFollower {
    fn remaining_distance(&self) -> f32 {
        let mut total = 0.0;
        let mut from = self.position;
        for &point in &self.waypoints[self.next_index.min(self.waypoints.len())..] {
            total += from.distance(point);
            from = point;
        }
        total
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_consumes_waypoints_and_arrives() {
        let start = Vec3::ZERO;
        let mut follower = WaypointFollower::new(
            start,
            vec![Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 2.0)],
            1.0,
        );

        let mut pos = start;
        for _ in 0..25 {
            pos = follower.advance(pos, 0.1);
        }
        assert!(pos.distance(Vec3::new(0.0, 0.0, 2.0)) <= 1e-4);
        assert!(follower.remaining_distance() <= 1e-4);
    }

    #[test]
    fn disabled_follower_does_not_move() {
        let start = Vec3::ZERO;
        let mut follower = WaypointFollower::new(start, vec![Vec3::new(0.0, 0.0, 5.0)], 2.0);
        follower.set_enabled(false);
        assert_eq!(follower.advance(start, 1.0), start);

        follower.set_enabled(true);
        follower.set_stopped(true);
        assert_eq!(follower.advance(start, 1.0), start);
    }

    #[test]
    fn remaining_distance_tracks_position() {
        let start = Vec3::ZERO;
        let mut follower = WaypointFollower::new(start, vec![Vec3::new(0.0, 0.0, 4.0)], 1.0);
        assert!((follower.remaining_distance() - 4.0).abs() <= 1e-5);

        follower.advance(start, 1.0);
        assert!((follower.remaining_distance() - 3.0).abs() <= 1e-5);
    }
}
