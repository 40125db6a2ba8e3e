use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use strider_sense::Layers;

use crate::curve::JumpArc;

/// Numeric tunables for the traversal state machine.
///
/// All distances are meters, speeds meters/second, delays seconds. Defaults
/// carry the values the behavior was tuned with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraversalConfig {
    /// Layers obstacle/wall rays test against.
    pub obstacle_layers: Layers,
    /// Layers ground/cliff queries test against.
    pub ground_layers: Layers,

    /// Height above the agent origin the forward obstacle ray starts from.
    pub ray_origin_height: f32,
    /// Reach of the forward obstacle ray.
    pub forward_check_distance: f32,
    /// Bounds height at or above which an obstacle classifies as a wall.
    ///
    /// Ties break toward `Wall` (`>=`).
    pub climbable_height_threshold: f32,

    /// Forward offset of the downward cliff probe.
    pub cliff_forward_offset: f32,
    /// Extra forward margin of the pre-descent anchor past the probe point.
    pub anchor_margin: f32,
    /// Vertical drop below which a ledge is walked off rather than descended.
    pub allowable_cliff_drop: f32,

    /// Peak height added by the obstacle hop.
    pub jump_height: f32,
    /// Duration of the hop's airborne phase.
    pub jump_duration: f32,
    /// Landing distance past the over-obstacle point.
    pub obstacle_clearance: f32,
    /// Vertical easing profile of the hop.
    pub jump_arc: JumpArc,

    /// Horizontal speed while walking to a maneuver start point.
    pub approach_speed: f32,
    /// Vertical speed of the wall climb.
    pub climb_speed: f32,
    /// Vertical speed of the cliff descent.
    pub descent_speed: f32,

    /// Distance at which an approach point counts as reached.
    pub reach_epsilon: f32,
    /// Vertical distance at which the descent counts as complete.
    pub descent_epsilon: f32,

    /// Remaining path distance above which the walking flag is set.
    pub walk_distance_threshold: f32,
    /// Remaining path distance at or below which the route counts as complete.
    pub completion_distance: f32,
    /// Radius of the airborne ground-contact probe.
    pub ground_probe_radius: f32,

    /// Delay between the off-mesh jump cue and becoming airborne.
    pub launch_delay: f32,
    /// Delay between landing (or link end) and resuming path following.
    pub settle_delay: f32,
    /// Delay between route completion and the terminal cue.
    pub victory_delay: f32,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            obstacle_layers: Layers::bit(1),
            ground_layers: Layers::bit(0),
            ray_origin_height: 0.25,
            forward_check_distance: 1.0,
            climbable_height_threshold: 1.5,
            cliff_forward_offset: 1.0,
            anchor_margin: 0.5,
            allowable_cliff_drop: 1.0,
            jump_height: 1.5,
            jump_duration: 0.75,
            obstacle_clearance: 0.5,
            jump_arc: JumpArc::Parabola,
            approach_speed: 4.0,
            climb_speed: 1.5,
            descent_speed: 1.0,
            reach_epsilon: 1e-3,
            descent_epsilon: 0.1,
            walk_distance_threshold: 1.0,
            completion_distance: 0.5,
            ground_probe_radius: 0.25,
            launch_delay: 0.2,
            settle_delay: 0.5,
            victory_delay: 1.0,
        }
    }
}

impl TraversalConfig {
    /// Reject configurations the state machine cannot run with.
    ///
    /// Called by [`crate::TraversalStateMachine::new`]; configuration errors
    /// surface at initialization, never per-tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("forward_check_distance", self.forward_check_distance),
            ("climbable_height_threshold", self.climbable_height_threshold),
            ("jump_duration", self.jump_duration),
            ("approach_speed", self.approach_speed),
            ("climb_speed", self.climb_speed),
            ("descent_speed", self.descent_speed),
            ("reach_epsilon", self.reach_epsilon),
            ("descent_epsilon", self.descent_epsilon),
            ("ground_probe_radius", self.ground_probe_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("ray_origin_height", self.ray_origin_height),
            ("cliff_forward_offset", self.cliff_forward_offset),
            ("anchor_margin", self.anchor_margin),
            ("allowable_cliff_drop", self.allowable_cliff_drop),
            ("jump_height", self.jump_height),
            ("obstacle_clearance", self.obstacle_clearance),
            ("walk_distance_threshold", self.walk_distance_threshold),
            ("completion_distance", self.completion_distance),
            ("launch_delay", self.launch_delay),
            ("settle_delay", self.settle_delay),
            ("victory_delay", self.victory_delay),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.obstacle_layers.is_empty() {
            return Err(ConfigError::EmptyLayers {
                name: "obstacle_layers",
            });
        }
        if self.ground_layers.is_empty() {
            return Err(ConfigError::EmptyLayers {
                name: "ground_layers",
            });
        }

        Ok(())
    }
}

/// Errors rejected at state machine construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must include at least one layer")]
    EmptyLayers { name: &'static str },
}
