//! Deterministic, engine-agnostic traversal kernel primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod math;
pub mod tick;
pub mod timer;
pub mod world;

pub use agent::AgentId;
pub use math::{Vec3, Yaw};
pub use tick::TickContext;
pub use timer::Countdown;
pub use world::{WorldMut, WorldView};
