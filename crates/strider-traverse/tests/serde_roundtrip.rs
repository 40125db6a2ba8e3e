#![cfg(feature = "serde")]

use strider_traverse::{JumpArc, TraversalConfig, TraversalState};

#[test]
fn config_roundtrips_through_json() {
    let config = TraversalConfig {
        jump_arc: JumpArc::Keyframes(vec![(0.0, 0.0), (0.4, 1.0), (1.0, 0.0)]),
        ..TraversalConfig::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: TraversalConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn state_roundtrips_through_json() {
    let state = TraversalState::OffMeshJump { landed: true };
    let json = serde_json::to_string(&state).unwrap();
    let back: TraversalState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
