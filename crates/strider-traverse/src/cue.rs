#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete animation cue, fired once to start a clip.
///
/// A stable enum instead of the engine's hashed-string lookup; the driver maps
/// these onto whatever animation graph it fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cue {
    Jump,
    Land,
    Climb,
    Victory,
}

/// Level-set animation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Flag {
    Walking,
    DescendingCliff,
}

/// Side-effect sink for animation.
///
/// Purely fire-and-forget: nothing the driver does feeds back into traversal
/// logic.
pub trait AnimationDriver {
    fn cue(&mut self, cue: Cue);
    fn set_flag(&mut self, flag: Flag, value: bool);
}

#[derive(Debug, Default)]
pub struct NullDriver;

impl AnimationDriver for NullDriver {
    fn cue(&mut self, _cue: Cue) {}
    fn set_flag(&mut self, _flag: Flag, _value: bool) {}
}

/// Records everything it is told, for tests and replay inspection.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub cues: Vec<Cue>,
    pub flags: Vec<(Flag, bool)>,
}

impl RecordingDriver {
    pub fn cue_count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    /// Most recent value set for `flag`, if any.
    pub fn flag(&self, flag: Flag) -> Option<bool> {
        self.flags
            .iter()
            .rev()
            .find(|(f, _)| *f == flag)
            .map(|(_, v)| *v)
    }
}

impl AnimationDriver for RecordingDriver {
    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags.push((flag, value));
    }
}
