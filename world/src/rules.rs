use serde::{Deserialize, Serialize};

/// Tunable booster durations.
///
/// Durations include the decrement applied at the end of the activating
/// action, so the defaults leave 50 and 30 usable turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Turns granted by one activation of fast wheels.
    pub wheels_duration: u32,
    /// Turns granted by one activation of the drill.
    pub drill_duration: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            wheels_duration: 51,
            drill_duration: 31,
        }
    }
}
