//! Notification data model

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Observation;

/// An emitted balance update, ready for formatting and delivery
///
/// Built by the debounce gate at decision time and consumed once by the
/// payload formatter; it has no lifecycle beyond a single emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Identity the balance belongs to
    pub identity: String,

    /// Total coins at emission time
    pub total_coins: u64,

    /// When the underlying observation was sampled
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Build a notification from the observation that triggered it
    ///
    /// The timestamp is derived from the observation's own sampling time,
    /// not from the wall clock at send time, so emissions are reproducible.
    pub fn from_observation(obs: &Observation) -> Self {
        let timestamp = Utc
            .timestamp_millis_opt(obs.timestamp_millis)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            identity: obs.identity.clone(),
            total_coins: obs.total_coins,
            timestamp,
        }
    }
}
