use strider_core::{TickContext, Vec3, Yaw};
use strider_sense::{GroundPatch, Layers, StaticScene};
use strider_traverse::{
    DescentPhase, Flag, PathFollower, SimWorld, TraversalConfig, TraversalState,
    TraversalStateMachine, WaypointFollower,
};

const DT: f32 = 0.05;
const GROUND: Layers = Layers::bit(0);

/// Upper plateau at y=3 ending at z=5, lower ground at y=0 beyond it.
fn cliff_world(upper_y: f32) -> SimWorld {
    let mut scene = StaticScene::new();
    scene.add_ground(GroundPatch::new(upper_y, -10.0, 10.0, -10.0, 5.0, GROUND));
    scene.add_ground(GroundPatch::new(0.0, -10.0, 10.0, 5.0, 20.0, GROUND));
    let start = Vec3::new(0.0, upper_y, 0.0);
    let follower = WaypointFollower::new(start, vec![Vec3::new(0.0, upper_y, 10.0)], 2.0);
    SimWorld::new(scene, follower, start, Yaw::ZERO)
}

#[test]
fn descends_cliff_facing_backwards() {
    let mut world = cliff_world(3.0);
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    let mut descending_yaw = None;
    let mut flag_while_descending = None;
    for tick in 0..2000u64 {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(&mut machine, &ctx);
        if let TraversalState::CliffDescent {
            phase: DescentPhase::Descending,
            ..
        } = machine.state()
        {
            descending_yaw = Some(world.agent_yaw());
            flag_while_descending = world.animator().flag(Flag::DescendingCliff);
        }
        if machine.trace().events.len() == 2 {
            break;
        }
    }

    let codes: Vec<(u64, u64)> = machine
        .trace()
        .events
        .iter()
        .map(|e| (e.from, e.to))
        .collect();
    assert_eq!(codes, vec![(0, 3), (3, 0)]);

    // Backed down the ledge: facing away from the approach direction.
    let yaw = descending_yaw.expect("descent phase never observed");
    assert!(yaw.direction().z < -0.99);
    assert_eq!(flag_while_descending, Some(true));

    // Landed within the descent tolerance (plus at most one follower step
    // after authority returns), flag cleared, follower back on.
    assert!(world.position().y <= 0.2);
    assert_eq!(world.animator().flag(Flag::DescendingCliff), Some(false));
    assert!(world.path().is_enabled());
    assert!(machine.state().is_idle());
}

#[test]
fn small_drop_is_walked_off() {
    // Drop of 0.8 is within the allowable threshold; no maneuver triggers.
    let mut world = cliff_world(0.8);
    let mut machine = TraversalStateMachine::new(TraversalConfig::default()).unwrap();

    for tick in 0..200u64 {
        let ctx = TickContext {
            tick,
            dt_seconds: DT,
        };
        world.step(&mut machine, &ctx);
    }
    assert!(machine.trace().events.is_empty());
}
