//! Observation data models
//!
//! One observation is produced per host sampling tick. The host (game
//! client adapter, replay file, test harness) owns sampling; the tracker
//! only consumes the resulting triples.

use serde::{Deserialize, Serialize};

/// A single sampled (value, identity, time) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Identity the value was observed under (the logged-in RSN)
    pub identity: String,

    /// Total coins observed across tracked containers (inventory + bank)
    pub total_coins: u64,

    /// Sampling time in milliseconds since the Unix epoch
    pub timestamp_millis: i64,
}

impl Observation {
    /// Create an observation stamped at the given time
    pub fn new(identity: impl Into<String>, total_coins: u64, timestamp_millis: i64) -> Self {
        Self {
            identity: identity.into(),
            total_coins,
            timestamp_millis,
        }
    }
}

/// A session-boundary event reported by the host
///
/// Both variants invalidate the tracked identity's context and force the
/// debounce gate back to its uninitialized state. Other disconnect kinds
/// (e.g. an abrupt connection loss) deliberately do not reset the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// The client returned to the login screen
    LoginScreen,
    /// The client is hopping to another account/world
    AccountHop,
}
