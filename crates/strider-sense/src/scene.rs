use strider_core::{Vec3, Yaw};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Layers, ObstacleId, ObstacleRecords, RayHit, SpatialQuery};

const AXIS_EPSILON: f32 = 1e-6;

/// Axis-aligned obstacle volume.
///
/// `facing` is the collider's authored forward direction; the traversal logic
/// uses it to compute the landing point past the obstacle. Each box owns its
/// `traversed` record flag.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneBox {
    pub min: Vec3,
    pub max: Vec3,
    pub layers: Layers,
    pub facing: Yaw,
    traversed: bool,
}

impl SceneBox {
    pub fn new(min: Vec3, max: Vec3, layers: Layers) -> Self {
        Self {
            min,
            max,
            layers,
            facing: Yaw::ZERO,
            traversed: false,
        }
    }

    pub fn with_facing(mut self, facing: Yaw) -> Self {
        self.facing = facing;
        self
    }

    pub fn is_traversed(&self) -> bool {
        self.traversed
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Horizontal walkable rectangle at a fixed height.
///
/// Ground geometry has no traversal record; a downward ray reports it with
/// zero bounds height.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundPatch {
    pub y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub layers: Layers,
}

impl GroundPatch {
    pub fn new(y: f32, min_x: f32, max_x: f32, min_z: f32, max_z: f32, layers: Layers) -> Self {
        Self {
            y,
            min_x,
            max_x,
            min_z,
            max_z,
            layers,
        }
    }

    fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

/// Deterministic reference backend for [`SpatialQuery`].
///
/// Good enough to stand in for an engine physics scene in tests and
/// simulations: boxes and ground patches on layers, exact slab intersection,
/// nearest hit wins with ties broken by insertion order (boxes before ground).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaticScene {
    boxes: Vec<SceneBox>,
    patches: Vec<GroundPatch>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_box(&mut self, scene_box: SceneBox) -> ObstacleId {
        let id = ObstacleId(self.boxes.len() as u32);
        self.boxes.push(scene_box);
        id
    }

    pub fn add_ground(&mut self, patch: GroundPatch) {
        self.patches.push(patch);
    }

    pub fn boxes(&self) -> &[SceneBox] {
        &self.boxes
    }

    fn box_hit(&self, index: usize, origin: Vec3, dir: Vec3, t: f32) -> RayHit {
        let b = &self.boxes[index];
        RayHit {
            point: origin + dir * t,
            obstacle: Some(ObstacleId(index as u32)),
            bounds_height: b.height(),
            bounds_center: b.center(),
            facing: b.facing,
        }
    }
}

/// Entry distance of a ray into an AABB, within `[0, max_distance]`.
fn ray_box_entry(origin: Vec3, dir: Vec3, max_distance: f32, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = 0.0f32;
    let mut t_exit = max_distance;

    for (o, d, lo, hi) in [
        (origin.x, dir.x, min.x, max.x),
        (origin.y, dir.y, min.y, max.y),
        (origin.z, dir.z, min.z, max.z),
    ] {
        if d.abs() < AXIS_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let mut t0 = (lo - o) / d;
        let mut t1 = (hi - o) / d;
        if t0 > t1 {
            core::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

fn ray_patch_entry(origin: Vec3, dir: Vec3, max_distance: f32, patch: &GroundPatch) -> Option<f32> {
    if dir.y.abs() < AXIS_EPSILON {
        return None;
    }
    let t = (patch.y - origin.y) / dir.y;
    if t < 0.0 || t > max_distance {
        return None;
    }
    let p = origin + dir * t;
    patch.contains_xz(p.x, p.z).then_some(t)
}

impl SpatialQuery for StaticScene {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: Layers,
    ) -> Option<RayHit> {
        let dir = direction.normalized()?;
        if max_distance <= 0.0 {
            return None;
        }

        let mut best: Option<(f32, RayHit)> = None;

        for (index, b) in self.boxes.iter().enumerate() {
            if !b.layers.intersects(layers) {
                continue;
            }
            let Some(t) = ray_box_entry(origin, dir, max_distance, b.min, b.max) else {
                continue;
            };
            if best.as_ref().map_or(true, |(bt, _)| t < *bt) {
                best = Some((t, self.box_hit(index, origin, dir, t)));
            }
        }

        for patch in &self.patches {
            if !patch.layers.intersects(layers) {
                continue;
            }
            let Some(t) = ray_patch_entry(origin, dir, max_distance, patch) else {
                continue;
            };
            if best.as_ref().map_or(true, |(bt, _)| t < *bt) {
                let point = origin + dir * t;
                best = Some((
                    t,
                    RayHit {
                        point,
                        obstacle: None,
                        bounds_height: 0.0,
                        bounds_center: point,
                        facing: Yaw::ZERO,
                    },
                ));
            }
        }

        best.map(|(_, hit)| hit)
    }

    fn check_sphere(&self, center: Vec3, radius: f32, layers: Layers) -> bool {
        if radius <= 0.0 {
            return false;
        }
        let r2 = radius * radius;

        for b in &self.boxes {
            if !b.layers.intersects(layers) {
                continue;
            }
            let closest = Vec3::new(
                center.x.clamp(b.min.x, b.max.x),
                center.y.clamp(b.min.y, b.max.y),
                center.z.clamp(b.min.z, b.max.z),
            );
            if (center - closest).length_squared() <= r2 {
                return true;
            }
        }

        for patch in &self.patches {
            if !patch.layers.intersects(layers) {
                continue;
            }
            let dx = center.x - center.x.clamp(patch.min_x, patch.max_x);
            let dy = center.y - patch.y;
            let dz = center.z - center.z.clamp(patch.min_z, patch.max_z);
            if dx * dx + dy * dy + dz * dz <= r2 {
                return true;
            }
        }

        false
    }
}

impl ObstacleRecords for StaticScene {
    fn is_traversed(&self, obstacle: ObstacleId) -> bool {
        self.boxes
            .get(obstacle.0 as usize)
            .map(|b| b.traversed)
            .unwrap_or(false)
    }

    fn mark_traversed(&mut self, obstacle: ObstacleId) {
        if let Some(b) = self.boxes.get_mut(obstacle.0 as usize) {
            b.traversed = true;
        }
    }
}
