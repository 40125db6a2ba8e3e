#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classic smoothstep easing on `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Vertical easing profile of the obstacle hop.
///
/// Evaluated over hop progress in `[0, 1]`; the result scales the configured
/// jump height. Profiles start and end at zero so the hop lands back at the
/// takeoff height.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JumpArc {
    /// `4t(1-t)`: symmetric arc peaking at 1.0 mid-hop.
    Parabola,
    /// Piecewise-linear keyframes `(progress, height)`, sorted by progress.
    ///
    /// Stands in for authored animation curves; values outside the keyframe
    /// range clamp to the nearest endpoint.
    Keyframes(Vec<(f32, f32)>),
}

impl JumpArc {
    pub fn evaluate(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        match self {
            JumpArc::Parabola => 4.0 * t * (1.0 - t),
            JumpArc::Keyframes(keys) => evaluate_keyframes(keys, t),
        }
    }
}

fn evaluate_keyframes(keys: &[(f32, f32)], t: f32) -> f32 {
    let Some(first) = keys.first() else {
        return 0.0;
    };
    if t <= first.0 {
        return first.1;
    }
    let last = keys[keys.len() - 1];
    if t >= last.0 {
        return last.1;
    }

    for pair in keys.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * ((t - t0) / span);
        }
    }

    last.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parabola_starts_and_ends_grounded() {
        let arc = JumpArc::Parabola;
        assert_eq!(arc.evaluate(0.0), 0.0);
        assert_eq!(arc.evaluate(1.0), 0.0);
        assert!((arc.evaluate(0.5) - 1.0).abs() <= 1e-6);
    }

    #[test]
    fn keyframes_interpolate_and_clamp() {
        let arc = JumpArc::Keyframes(vec![(0.0, 0.0), (0.4, 1.0), (1.0, 0.0)]);
        assert_eq!(arc.evaluate(-1.0), 0.0);
        assert!((arc.evaluate(0.2) - 0.5).abs() <= 1e-6);
        assert!((arc.evaluate(0.7) - 0.5).abs() <= 1e-6);
        assert_eq!(arc.evaluate(2.0), 0.0);
    }

    #[test]
    fn smoothstep_is_monotone_on_unit_interval() {
        let mut last = 0.0;
        for i in 0..=20 {
            let v = smoothstep(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
    }
}
