#![cfg(feature = "serde")]

use strider_core::Vec3;
use strider_sense::{GroundPatch, Layers, SceneBox, SpatialQuery, StaticScene};

const GROUND: Layers = Layers::bit(0);
const OBSTACLE: Layers = Layers::bit(1);

#[test]
fn scene_roundtrips_via_serde() {
    let mut scene = StaticScene::new();
    scene.add_ground(GroundPatch::new(0.0, -5.0, 5.0, -5.0, 15.0, GROUND));
    scene.add_box(SceneBox::new(
        Vec3::new(-1.0, 0.0, 3.0),
        Vec3::new(1.0, 1.2, 3.5),
        OBSTACLE,
    ));

    let json = serde_json::to_string(&scene).expect("serialize scene");
    let scene2: StaticScene = serde_json::from_str(&json).expect("deserialize scene");

    let origin = Vec3::new(0.0, 0.25, 0.0);
    let forward = Vec3::new(0.0, 0.0, 1.0);

    let h1 = scene.cast_ray(origin, forward, 10.0, OBSTACLE).expect("hit");
    let h2 = scene2.cast_ray(origin, forward, 10.0, OBSTACLE).expect("hit");
    assert_eq!(h1, h2);
}
