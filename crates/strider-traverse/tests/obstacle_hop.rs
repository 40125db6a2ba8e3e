use strider_core::{TickContext, Vec3, Yaw};
use strider_sense::{GroundPatch, Layers, ObstacleId, SceneBox, StaticScene};
use strider_traverse::{
    Cue, SimWorld, TraversalConfig, TraversalStateMachine, TraversalWorldMut, TraversalWorldView,
    WaypointFollower,
};

const DT: f32 = 0.05;
const GROUND: Layers = Layers::bit(0);
const OBSTACLES: Layers = Layers::bit(1);

/// Flat ground with one low box across the route.
fn hop_world() -> (SimWorld, ObstacleId) {
    let mut scene = StaticScene::new();
    scene.add_ground(GroundPatch::new(0.0, -10.0, 10.0, -10.0, 30.0, GROUND));
    let id = scene.add_box(SceneBox::new(
        Vec3::new(-1.0, 0.0, 4.0),
        Vec3::new(1.0, 1.0, 4.5),
        OBSTACLES,
    ));
    let follower = WaypointFollower::new(Vec3::ZERO, vec![Vec3::new(0.0, 0.0, 10.0)], 2.0);
    (SimWorld::new(scene, follower, Vec3::ZERO, Yaw::ZERO), id)
}

fn run(world: &mut SimWorld, machine: &mut TraversalStateMachine, ticks: u64) {
    for tick in 0..ticks {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(machine, &ctx);
    }
}

#[test]
fn hops_over_low_obstacle_and_finishes_route() {
    let (mut world, id) = hop_world();
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    run(&mut world, &mut machine, 600);

    assert!(machine.state().is_idle());
    assert!(world.is_traversed(id));
    assert!(world.position().distance(Vec3::new(0.0, 0.0, 10.0)) <= 0.01);
    assert_eq!(world.animator().cue_count(Cue::Victory), 1);

    // One hop in, one hop out, nothing else.
    let codes: Vec<(u64, u64)> = machine
        .trace()
        .events
        .iter()
        .map(|e| (e.from, e.to))
        .collect();
    assert_eq!(codes, vec![(0, 1), (1, 0)]);
}

#[test]
fn hop_arc_peaks_near_configured_height() {
    let (mut world, _) = hop_world();
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    let mut peak = 0.0f32;
    for tick in 0..2000u64 {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(&mut machine, &ctx);
        peak = peak.max(world.position().y);
        if machine.trace().events.len() == 2 {
            break;
        }
    }

    // Takeoff is at the ray origin height; the parabola adds jump_height.
    assert!(peak > 1.4, "apex {peak} too low");
    assert!(peak <= 1.76, "apex {peak} too high");
}

#[test]
fn traversed_obstacle_is_not_detected_again() {
    let (mut world, id) = hop_world();
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();
    run(&mut world, &mut machine, 600);
    assert!(world.is_traversed(id));

    // Back in front of the same box, facing it.
    world.set_position(SimWorld::AGENT, Vec3::new(0.0, 0.0, 3.3));
    world.set_yaw(SimWorld::AGENT, Yaw::ZERO);
    machine.reset();
    machine.take_trace();

    run(&mut world, &mut machine, 100);
    assert!(machine.trace().events.is_empty());
    assert!(machine.state().is_idle());
}
