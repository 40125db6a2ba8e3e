#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use strider_core::Vec3;
use strider_sense::ObstacleId;

/// How a sensed collider is handled, decided once on first detection from its
/// bounds height and held for the maneuver's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObstacleClass {
    /// Low enough to hop over.
    Obstacle,
    /// At or above the climbable-height threshold; climbed instead.
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HopPhase {
    /// Walking to the sensed hit point.
    Approaching,
    /// Parametric jump between takeoff and landing.
    Jumping {
        start: Vec3,
        target: Vec3,
        /// Monotone in `[0, 1]`; reset to 0 on entry.
        progress: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClimbPhase {
    Approaching,
    /// Vertical-only move to `dest`.
    Climbing { dest: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DescentPhase {
    Approaching,
    Descending,
}

/// Current traversal mode. Exactly one is active per agent; `Idle` is both
/// the initial state and the state every maneuver returns to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraversalState {
    #[default]
    Idle,
    ObstacleHop {
        obstacle: ObstacleId,
        /// Sensed impact point, walked to during the approach.
        hit: Vec3,
        /// Point past the collider's center along its facing.
        over: Vec3,
        phase: HopPhase,
    },
    WallClimb {
        obstacle: ObstacleId,
        hit: Vec3,
        /// Height of `hit` plus the wall's bounds height.
        top: f32,
        /// Planar direction the agent approached along; faced while climbing.
        approach_dir: Vec3,
        phase: ClimbPhase,
    },
    CliffDescent {
        /// Pre-descent anchor ahead of the ledge.
        anchor: Vec3,
        /// Sensed ground point below the ledge.
        dest: Vec3,
        approach_dir: Vec3,
        phase: DescentPhase,
    },
    OffMeshJump {
        landed: bool,
    },
}

impl TraversalState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TraversalState::Idle)
    }

    /// Whether a ground-based maneuver currently owns the transform.
    pub fn is_maneuver(&self) -> bool {
        matches!(
            self,
            TraversalState::ObstacleHop { .. }
                | TraversalState::WallClimb { .. }
                | TraversalState::CliffDescent { .. }
        )
    }

    /// Coarse discriminant for trace events.
    pub fn code(&self) -> u64 {
        match self {
            TraversalState::Idle => 0,
            TraversalState::ObstacleHop { .. } => 1,
            TraversalState::WallClimb { .. } => 2,
            TraversalState::CliffDescent { .. } => 3,
            TraversalState::OffMeshJump { .. } => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TraversalState::Idle => "idle",
            TraversalState::ObstacleHop { .. } => "obstacle_hop",
            TraversalState::WallClimb { .. } => "wall_climb",
            TraversalState::CliffDescent { .. } => "cliff_descent",
            TraversalState::OffMeshJump { .. } => "off_mesh_jump",
        }
    }
}
