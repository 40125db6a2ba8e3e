use strider_core::{Vec3, Yaw};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Layers;

/// Backend-defined identifier for a sensed obstacle.
///
/// This value is intended to be stable across replays and serialization of
/// baked scenes; traversal records are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObstacleId(pub u32);

/// Result of a ray query against the scene.
///
/// Carries everything the traversal logic reads from a hit: the impact point,
/// the obstacle's record key (ground geometry has none), and enough of the
/// collider's bounds to classify it and aim over it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RayHit {
    pub point: Vec3,
    pub obstacle: Option<ObstacleId>,
    /// Vertical extent of the collider's bounds.
    pub bounds_height: f32,
    pub bounds_center: Vec3,
    /// The collider's authored facing.
    pub facing: Yaw,
}

/// Spatial queries abstracted from the engine's physics scene.
///
/// A miss is the normal "nothing to do" signal, never an error.
pub trait SpatialQuery {
    /// First hit along the ray within `max_distance`, filtered by `layers`.
    ///
    /// `direction` need not be normalized; a degenerate direction misses.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: Layers)
        -> Option<RayHit>;

    /// Whether a sphere overlaps any geometry on `layers` (ground contact test).
    fn check_sphere(&self, center: Vec3, radius: f32, layers: Layers) -> bool;
}

/// Per-obstacle persistent traversal flags.
///
/// The flag is owned by the obstacle, not the agent: once an obstacle is
/// marked traversed it never re-triggers a maneuver, even while still in
/// sensor range.
pub trait ObstacleRecords {
    fn is_traversed(&self, obstacle: ObstacleId) -> bool;
    fn mark_traversed(&mut self, obstacle: ObstacleId);
}
