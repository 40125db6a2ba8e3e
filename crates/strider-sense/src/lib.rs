//! Spatial sensing primitives (layers, ray queries, and a reference scene backend).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod layers;
pub mod query;
pub mod scene;

pub use layers::Layers;
pub use query::{ObstacleId, ObstacleRecords, RayHit, SpatialQuery};
pub use scene::{GroundPatch, SceneBox, StaticScene};
