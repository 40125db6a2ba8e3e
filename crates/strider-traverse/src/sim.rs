use strider_core::{TickContext, Vec3, WorldMut, WorldView, Yaw};
use strider_sense::{ObstacleId, ObstacleRecords, SpatialQuery, StaticScene};

use crate::cue::{AnimationDriver, RecordingDriver};
use crate::follower::{PathFollower, WaypointFollower};
use crate::link::{JumpLink, LinkTraversal};
use crate::machine::TraversalStateMachine;
use crate::world::{TraversalWorldMut, TraversalWorldView};

/// Single-agent reference world over a [`StaticScene`].
///
/// Wires a [`WaypointFollower`], a [`RecordingDriver`], and an optional
/// in-flight [`JumpLink`] to the traversal state machine. Used by the
/// integration tests and benches; embeddings with a real engine implement
/// [`TraversalWorldMut`] themselves instead.
#[derive(Debug)]
pub struct SimWorld {
    scene: StaticScene,
    follower: WaypointFollower,
    animator: RecordingDriver,
    position: Vec3,
    yaw: Yaw,
    link: Option<LinkTraversal>,
}

impl SimWorld {
    pub const AGENT: u64 = 0;

    pub fn new(scene: StaticScene, follower: WaypointFollower, position: Vec3, yaw: Yaw) -> Self {
        Self {
            scene,
            follower,
            animator: RecordingDriver::default(),
            position,
            yaw,
            link: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn agent_yaw(&self) -> Yaw {
        self.yaw
    }

    pub fn animator(&self) -> &RecordingDriver {
        &self.animator
    }

    pub fn path(&self) -> &WaypointFollower {
        &self.follower
    }

    pub fn in_flight(&self) -> bool {
        self.link.is_some()
    }

    /// Hand the transform to a jump link, notifying the state machine.
    pub fn begin_link(
        &mut self,
        machine: &mut TraversalStateMachine,
        ctx: &TickContext,
        link: JumpLink,
    ) {
        machine.on_link_start(ctx, Self::AGENT, self);
        self.link = Some(LinkTraversal::new(link));
    }

    /// One fixed step: machine tick, then whichever component owns the
    /// transform this tick (jump link, else the follower) moves the agent.
    pub fn step(&mut self, machine: &mut TraversalStateMachine, ctx: &TickContext) {
        machine.tick(ctx, Self::AGENT, self);

        if let Some(flight) = self.link.as_mut() {
            let next = flight.advance(ctx.dt());
            let finished = flight.finished();
            self.face_towards(next);
            self.position = next;
            if finished {
                self.link = None;
                machine.on_link_end(ctx, Self::AGENT, self);
            }
            return;
        }

        if machine.state().is_idle()
            && self.follower.is_enabled()
            && !self.follower.is_stopped()
        {
            let next = self.follower.advance(self.position, ctx.dt());
            self.face_towards(next);
            self.position = next;
        }
    }

    fn face_towards(&mut self, next: Vec3) {
        if let Some(yaw) = Yaw::look_at(self.position, next) {
            self.yaw = yaw;
        }
    }
}

impl WorldView for SimWorld {
    type Agent = u64;
}

impl WorldMut for SimWorld {}

impl TraversalWorldView for SimWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        (agent == Self::AGENT).then_some(self.position)
    }

    fn yaw(&self, agent: u64) -> Option<Yaw> {
        (agent == Self::AGENT).then_some(self.yaw)
    }

    fn sensor(&self) -> &dyn SpatialQuery {
        &self.scene
    }

    fn follower(&self, _agent: u64) -> &dyn PathFollower {
        &self.follower
    }

    fn is_traversed(&self, obstacle: ObstacleId) -> bool {
        self.scene.is_traversed(obstacle)
    }
}

impl TraversalWorldMut for SimWorld {
    fn set_position(&mut self, agent: u64, position: Vec3) {
        if agent == Self::AGENT {
            self.position = position;
        }
    }

    fn set_yaw(&mut self, agent: u64, yaw: Yaw) {
        if agent == Self::AGENT {
            self.yaw = yaw;
        }
    }

    fn follower_mut(&mut self, _agent: u64) -> &mut dyn PathFollower {
        &mut self.follower
    }

    fn animator_mut(&mut self, _agent: u64) -> &mut dyn AnimationDriver {
        &mut self.animator
    }

    fn mark_traversed(&mut self, obstacle: ObstacleId) {
        self.scene.mark_traversed(obstacle);
    }
}
