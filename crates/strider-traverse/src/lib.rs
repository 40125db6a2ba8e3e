//! Traversal state machine for path-following agents.
//!
//! Coordinates free locomotion (delegated to a [`PathFollower`]) with scripted
//! maneuvers: obstacle hops, wall climbs, cliff descents, and off-mesh jump
//! hand-off. Deterministic and engine-agnostic: sensing, path following, and
//! animation are traits implemented by the embedding world.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod cue;
pub mod curve;
pub mod follower;
pub mod link;
pub mod machine;
pub mod sim;
pub mod state;
pub mod world;

pub use config::{ConfigError, TraversalConfig};
pub use cue::{AnimationDriver, Cue, Flag, NullDriver, RecordingDriver};
pub use curve::{smoothstep, JumpArc};
pub use follower::{PathFollower, WaypointFollower};
pub use link::{JumpLink, LinkTraversal};
pub use machine::TraversalStateMachine;
pub use sim::SimWorld;
pub use state::{ClimbPhase, DescentPhase, HopPhase, ObstacleClass, TraversalState};
pub use world::{TraversalWorldMut, TraversalWorldView};
