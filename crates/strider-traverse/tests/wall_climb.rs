use strider_core::{TickContext, Vec3, Yaw};
use strider_sense::{GroundPatch, Layers, ObstacleId, SceneBox, StaticScene};
use strider_traverse::{
    Cue, PathFollower, SimWorld, TraversalConfig, TraversalStateMachine, TraversalWorldView,
    WaypointFollower,
};

const DT: f32 = 0.05;

/// Flat ground with one box of the given height across the route.
fn climb_world(height: f32) -> (SimWorld, ObstacleId) {
    let mut scene = StaticScene::new();
    scene.add_ground(GroundPatch::new(0.0, -10.0, 10.0, -10.0, 30.0, Layers::bit(0)));
    let id = scene.add_box(SceneBox::new(
        Vec3::new(-1.0, 0.0, 4.0),
        Vec3::new(1.0, height, 4.5),
        Layers::bit(1),
    ));
    let follower = WaypointFollower::new(Vec3::ZERO, vec![Vec3::new(0.0, 0.0, 10.0)], 2.0);
    (SimWorld::new(scene, follower, Vec3::ZERO, Yaw::ZERO), id)
}

/// Step until the maneuver has been entered and exited, or `limit` ticks pass.
fn run_one_maneuver(world: &mut SimWorld, machine: &mut TraversalStateMachine, limit: u64) {
    for tick in 0..limit {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(machine, &ctx);
        if machine.trace().events.len() == 2 {
            return;
        }
    }
    panic!("maneuver did not complete within {limit} ticks");
}

#[test]
fn climbs_tall_wall_to_its_top() {
    let (mut world, id) = climb_world(1.8);
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    run_one_maneuver(&mut world, &mut machine, 2000);

    let codes: Vec<(u64, u64)> = machine
        .trace()
        .events
        .iter()
        .map(|e| (e.from, e.to))
        .collect();
    assert_eq!(codes, vec![(0, 2), (2, 0)]);

    // Climb destination is the hit height plus the wall's bounds height.
    assert!((world.position().y - 2.05).abs() <= 1e-3);
    assert_eq!(world.animator().cue_count(Cue::Climb), 1);
    assert!(world.is_traversed(id));
    assert!(world.path().is_enabled());
}

#[test]
fn threshold_height_classifies_as_wall() {
    // Exactly at the climbable-height threshold: ties go to the wall climb.
    let (mut world, _) = climb_world(1.5);
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    for tick in 0..2000u64 {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(&mut machine, &ctx);
        if let Some(first) = machine.trace().events.first() {
            assert_eq!((first.from, first.to), (0, 2));
            return;
        }
    }
    panic!("no maneuver started");
}

#[test]
fn below_threshold_classifies_as_hop() {
    let (mut world, _) = climb_world(1.49);
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    for tick in 0..2000u64 {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(&mut machine, &ctx);
        if let Some(first) = machine.trace().events.first() {
            assert_eq!((first.from, first.to), (0, 1));
            return;
        }
    }
    panic!("no maneuver started");
}
