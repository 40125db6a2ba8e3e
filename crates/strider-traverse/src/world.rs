use strider_core::{Vec3, WorldMut, WorldView, Yaw};
use strider_sense::{ObstacleId, SpatialQuery};

use crate::cue::AnimationDriver;
use crate::follower::PathFollower;

/// Read access the traversal state machine needs from its world.
///
/// Collaborators are supplied by the world implementation, so a "missing
/// sensor" is a compile error rather than a runtime configuration fault.
pub trait TraversalWorldView: WorldView {
    /// Agent origin (foot level). `None` when the agent is gone; the state
    /// machine then skips the tick.
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    fn yaw(&self, agent: Self::Agent) -> Option<Yaw>;

    fn sensor(&self) -> &dyn SpatialQuery;

    fn follower(&self, agent: Self::Agent) -> &dyn PathFollower;

    fn is_traversed(&self, obstacle: ObstacleId) -> bool;
}

/// Write access: transform mutation during maneuvers plus effect sinks.
pub trait TraversalWorldMut: WorldMut + TraversalWorldView {
    fn set_position(&mut self, agent: Self::Agent, position: Vec3);

    fn set_yaw(&mut self, agent: Self::Agent, yaw: Yaw);

    fn follower_mut(&mut self, agent: Self::Agent) -> &mut dyn PathFollower;

    fn animator_mut(&mut self, agent: Self::Agent) -> &mut dyn AnimationDriver;

    fn mark_traversed(&mut self, obstacle: ObstacleId);
}
