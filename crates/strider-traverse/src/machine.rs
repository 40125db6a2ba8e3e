use strider_core::{Countdown, TickContext, Vec3, Yaw};
use strider_tools::{TraceEvent, TraceLog, TraceSink};
use tracing::{debug, warn};

use crate::config::{ConfigError, TraversalConfig};
use crate::cue::{Cue, Flag};
use crate::state::{ClimbPhase, DescentPhase, HopPhase, ObstacleClass, TraversalState};
use crate::world::TraversalWorldMut;

/// Per-agent traversal state machine.
///
/// Each fixed simulation step, [`tick`](Self::tick) either leaves the agent to
/// its path follower or advances the active maneuver, mutating the transform
/// directly. The follower is disabled exactly once on maneuver entry and
/// re-enabled exactly once on completion; a maneuver always runs to completion
/// once entered.
pub struct TraversalStateMachine {
    config: TraversalConfig,
    state: TraversalState,
    /// Delay between the off-mesh jump cue and becoming airborne.
    launch: Countdown,
    /// Delay between landing (or link end) and resuming path following.
    settle: Countdown,
    victory: Countdown,
    victory_fired: bool,
    trace: TraceLog,
    sink: Option<Box<dyn TraceSink>>,
}

impl TraversalStateMachine {
    pub fn new(config: TraversalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: TraversalState::Idle,
            launch: Countdown::idle(),
            settle: Countdown::idle(),
            victory: Countdown::idle(),
            victory_fired: false,
            trace: TraceLog::default(),
            sink: None,
        })
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// In-memory transition log, comparable across replays.
    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn take_trace(&mut self) -> TraceLog {
        core::mem::take(&mut self.trace)
    }

    /// Stream transition events into an external sink as well.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Return to `Idle` and clear timers and the victory latch, e.g. when the
    /// agent is given a new route.
    pub fn reset(&mut self) {
        self.state = TraversalState::Idle;
        self.launch.cancel();
        self.settle.cancel();
        self.victory.cancel();
        self.victory_fired = false;
    }

    /// Advance one fixed simulation step.
    pub fn tick<W: TraversalWorldMut>(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        let dt = ctx.dt();
        if world.position(agent).is_none() || world.yaw(agent).is_none() {
            return;
        }

        // Airborne: ground sensing is suspended until the jump resolves.
        if matches!(self.state, TraversalState::OffMeshJump { .. }) {
            self.tick_airborne(ctx, dt, agent, world);
            return;
        }
        if self.launch.is_running() {
            // The link driver owns the transform between the jump cue and
            // liftoff; nothing else may trigger meanwhile.
            if self.launch.tick(dt) {
                self.transition(ctx.tick, TraversalState::OffMeshJump { landed: false });
            }
            return;
        }

        self.tick_obstacles(ctx, dt, agent, world);

        // Cliff sensing is mutually exclusive with obstacle maneuvers.
        if matches!(
            self.state,
            TraversalState::Idle | TraversalState::CliffDescent { .. }
        ) {
            self.tick_cliffs(ctx, dt, agent, world);
        }

        self.update_walk_flag(agent, world);
        self.update_victory(dt, agent, world);
    }

    /// Notification that the path follower began traversing an off-mesh jump
    /// segment. The external link driver owns the transform until
    /// [`on_link_end`](Self::on_link_end).
    pub fn on_link_start<W: TraversalWorldMut>(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) {
        if !self.state.is_idle() || self.launch.is_running() {
            return;
        }
        self.victory.cancel();
        let animator = world.animator_mut(agent);
        animator.cue(Cue::Jump);
        animator.set_flag(Flag::Walking, false);
        self.launch.start(self.config.launch_delay);
    }

    /// Notification that the off-mesh link traversal finished.
    pub fn on_link_end<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) {
        if self.state.is_maneuver() {
            return;
        }
        self.launch.cancel();
        world.follower_mut(agent).set_stopped(true);
        self.transition(ctx.tick, TraversalState::OffMeshJump { landed: true });
        self.settle.start(self.config.settle_delay);
    }

    fn transition(&mut self, tick: u64, next: TraversalState) {
        if next.code() != self.state.code() {
            let event = TraceEvent::new(tick, "transition").with_states(self.state.code(), next.code());
            self.trace.push(event.clone());
            if let Some(sink) = self.sink.as_mut() {
                sink.emit(event);
            }
            debug!(
                from = self.state.label(),
                to = next.label(),
                tick,
                "traversal transition"
            );
        }
        self.state = next;
    }

    fn begin_maneuver<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        next: TraversalState,
    ) {
        world.follower_mut(agent).set_enabled(false);
        self.victory.cancel();
        self.transition(ctx.tick, next);
    }

    fn finish_maneuver<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) {
        world.follower_mut(agent).set_enabled(true);
        self.transition(ctx.tick, TraversalState::Idle);
    }

    fn tick_airborne<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        dt: f32,
        agent: W::Agent,
        world: &mut W,
    ) {
        let TraversalState::OffMeshJump { landed } = self.state else {
            return;
        };

        if !landed {
            let Some(position) = world.position(agent) else {
                return;
            };
            let grounded = world.sensor().check_sphere(
                position,
                self.config.ground_probe_radius,
                self.config.ground_layers,
            );
            if grounded {
                world.animator_mut(agent).cue(Cue::Land);
                self.state = TraversalState::OffMeshJump { landed: true };
                self.settle.start(self.config.settle_delay);
            }
            return;
        }

        if self.settle.tick(dt) {
            world.follower_mut(agent).set_stopped(false);
            self.transition(ctx.tick, TraversalState::Idle);
        }
    }

    fn tick_obstacles<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        dt: f32,
        agent: W::Agent,
        world: &mut W,
    ) {
        match self.state {
            TraversalState::ObstacleHop { .. } => self.advance_hop(ctx, dt, agent, world),
            TraversalState::WallClimb { .. } => self.advance_climb(ctx, dt, agent, world),
            TraversalState::Idle => self.detect_obstacle(ctx, agent, world),
            _ => {}
        }
    }

    fn detect_obstacle<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) {
        let (Some(position), Some(yaw)) = (world.position(agent), world.yaw(agent)) else {
            return;
        };

        let origin = position + Vec3::UP * self.config.ray_origin_height;
        let Some(hit) = world.sensor().cast_ray(
            origin,
            yaw.direction(),
            self.config.forward_check_distance,
            self.config.obstacle_layers,
        ) else {
            return;
        };
        let Some(obstacle) = hit.obstacle else {
            return;
        };
        if world.is_traversed(obstacle) {
            return;
        }

        // Ties break toward Wall.
        let class = if hit.bounds_height >= self.config.climbable_height_threshold {
            ObstacleClass::Wall
        } else {
            ObstacleClass::Obstacle
        };

        let next = match class {
            ObstacleClass::Obstacle => TraversalState::ObstacleHop {
                obstacle,
                hit: hit.point,
                over: hit.bounds_center + hit.facing.direction(),
                phase: HopPhase::Approaching,
            },
            ObstacleClass::Wall => {
                let approach_dir = (hit.point - position)
                    .with_y(0.0)
                    .normalized()
                    .unwrap_or_else(|| yaw.direction());
                TraversalState::WallClimb {
                    obstacle,
                    hit: hit.point,
                    top: hit.point.y + hit.bounds_height,
                    approach_dir,
                    phase: ClimbPhase::Approaching,
                }
            }
        };
        self.begin_maneuver(ctx, agent, world, next);
    }

    fn advance_hop<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        dt: f32,
        agent: W::Agent,
        world: &mut W,
    ) {
        let TraversalState::ObstacleHop {
            obstacle,
            hit,
            over,
            phase,
        } = self.state
        else {
            return;
        };
        let (Some(position), Some(yaw)) = (world.position(agent), world.yaw(agent)) else {
            return;
        };

        match phase {
            HopPhase::Approaching => {
                let next = position.move_towards(hit, self.config.approach_speed * dt);
                world.set_position(agent, next);
                if next.distance(hit) < self.config.reach_epsilon {
                    let target = over + yaw.direction() * self.config.obstacle_clearance;
                    match Yaw::look_at(next, target) {
                        Some(look) => world.set_yaw(agent, look),
                        None => warn!("degenerate hop target; keeping current facing"),
                    }
                    self.state = TraversalState::ObstacleHop {
                        obstacle,
                        hit,
                        over,
                        phase: HopPhase::Jumping {
                            start: next,
                            target,
                            progress: 0.0,
                        },
                    };
                }
            }
            HopPhase::Jumping {
                start,
                target,
                progress,
            } => {
                let progress = (progress + dt / self.config.jump_duration).min(1.0);
                let horizontal = start.lerp(target, progress);
                let lift = self.config.jump_arc.evaluate(progress) * self.config.jump_height;
                world.set_position(
                    agent,
                    Vec3::new(horizontal.x, start.y + lift, horizontal.z),
                );
                self.state = TraversalState::ObstacleHop {
                    obstacle,
                    hit,
                    over,
                    phase: HopPhase::Jumping {
                        start,
                        target,
                        progress,
                    },
                };
                if progress >= 1.0 {
                    world.mark_traversed(obstacle);
                    self.finish_maneuver(ctx, agent, world);
                }
            }
        }
    }

    fn advance_climb<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        dt: f32,
        agent: W::Agent,
        world: &mut W,
    ) {
        let TraversalState::WallClimb {
            obstacle,
            hit,
            top,
            approach_dir,
            phase,
        } = self.state
        else {
            return;
        };
        let Some(position) = world.position(agent) else {
            return;
        };

        match phase {
            ClimbPhase::Approaching => {
                let next = position.move_towards(hit, self.config.approach_speed * dt);
                world.set_position(agent, next);
                if next.distance(hit) < self.config.reach_epsilon {
                    match Yaw::from_direction(approach_dir) {
                        Some(face) => world.set_yaw(agent, face),
                        None => warn!("degenerate wall approach; keeping current facing"),
                    }
                    world.animator_mut(agent).cue(Cue::Climb);
                    let dest = Vec3::new(next.x, top, next.z);
                    self.state = TraversalState::WallClimb {
                        obstacle,
                        hit,
                        top,
                        approach_dir,
                        phase: ClimbPhase::Climbing { dest },
                    };
                }
            }
            ClimbPhase::Climbing { dest } => {
                let next = position.move_towards(
                    position.with_y(dest.y),
                    self.config.climb_speed * dt,
                );
                world.set_position(agent, next);
                if (next.y - dest.y).abs() < self.config.reach_epsilon {
                    world.mark_traversed(obstacle);
                    self.finish_maneuver(ctx, agent, world);
                }
            }
        }
    }

    fn tick_cliffs<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        dt: f32,
        agent: W::Agent,
        world: &mut W,
    ) {
        if matches!(self.state, TraversalState::CliffDescent { .. }) {
            self.advance_descent(ctx, dt, agent, world);
            return;
        }

        let (Some(position), Some(yaw)) = (world.position(agent), world.yaw(agent)) else {
            return;
        };

        let probe = position + yaw.direction() * self.config.cliff_forward_offset;
        let Some(hit) = world.sensor().cast_ray(
            probe,
            Vec3::DOWN,
            f32::INFINITY,
            self.config.ground_layers,
        ) else {
            return;
        };
        if (position.y - hit.point.y).abs() <= self.config.allowable_cliff_drop {
            return;
        }

        let anchor = position
            + yaw.direction() * (self.config.cliff_forward_offset + self.config.anchor_margin);
        let approach_dir = (anchor - position)
            .normalized()
            .unwrap_or_else(|| yaw.direction());
        world.animator_mut(agent).set_flag(Flag::Walking, false);
        self.begin_maneuver(
            ctx,
            agent,
            world,
            TraversalState::CliffDescent {
                anchor,
                dest: hit.point,
                approach_dir,
                phase: DescentPhase::Approaching,
            },
        );
    }

    fn advance_descent<W: TraversalWorldMut>(
        &mut self,
        ctx: &TickContext,
        dt: f32,
        agent: W::Agent,
        world: &mut W,
    ) {
        let TraversalState::CliffDescent {
            anchor,
            dest,
            approach_dir,
            phase,
        } = self.state
        else {
            return;
        };
        let Some(position) = world.position(agent) else {
            return;
        };

        match phase {
            DescentPhase::Approaching => {
                let next = position.move_towards(anchor, self.config.approach_speed * dt);
                world.set_position(agent, next);
                if next.distance(anchor) < self.config.reach_epsilon {
                    // Snap to face away from the ledge before backing down it.
                    match Yaw::from_direction(approach_dir) {
                        Some(face) => world.set_yaw(agent, face.reversed()),
                        None => warn!("degenerate descent approach; keeping current facing"),
                    }
                    world.animator_mut(agent).set_flag(Flag::DescendingCliff, true);
                    self.state = TraversalState::CliffDescent {
                        anchor,
                        dest,
                        approach_dir,
                        phase: DescentPhase::Descending,
                    };
                }
            }
            DescentPhase::Descending => {
                let next = position.move_towards(
                    position.with_y(dest.y),
                    self.config.descent_speed * dt,
                );
                world.set_position(agent, next);
                if (next.y - dest.y).abs() < self.config.descent_epsilon {
                    world.animator_mut(agent).set_flag(Flag::DescendingCliff, false);
                    self.finish_maneuver(ctx, agent, world);
                }
            }
        }
    }

    fn update_walk_flag<W: TraversalWorldMut>(&self, agent: W::Agent, world: &mut W) {
        let follower = world.follower(agent);
        if !follower.is_enabled() {
            return;
        }
        let walking = follower.remaining_distance() > self.config.walk_distance_threshold
            && !follower.is_stopped();
        world.animator_mut(agent).set_flag(Flag::Walking, walking);
    }

    fn update_victory<W: TraversalWorldMut>(&mut self, dt: f32, agent: W::Agent, world: &mut W) {
        if self.victory_fired {
            return;
        }

        let follower = world.follower(agent);
        let at_goal = self.state.is_idle()
            && follower.is_enabled()
            && follower.remaining_distance() <= self.config.completion_distance;

        if at_goal {
            if !self.victory.is_running() {
                self.victory.start(self.config.victory_delay);
            }
        } else {
            self.victory.cancel();
        }

        if self.victory.tick(dt) {
            world.animator_mut(agent).cue(Cue::Victory);
            self.victory_fired = true;
        }
    }
}
