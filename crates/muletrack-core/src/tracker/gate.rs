//! Debounce gate
//!
//! The core decision unit. A two-threshold gate (magnitude of change plus
//! time since last send) prevents notification storms from minor balance
//! fluctuations while still catching a real step-change quickly; the
//! first observation after a session start always sends, so every session
//! produces at least one fresh reading.

use tracing::debug;

use crate::config::GateConfig;
use crate::models::{Notification, Observation};

/// Recorded state of the last emission this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastSent {
    total_coins: u64,
    at_millis: i64,
}

/// Threshold-and-cooldown gate deciding which observations become
/// notifications
///
/// Two states: uninitialized (nothing sent this session) and armed (value
/// and time of the last send recorded). State advances at decision time,
/// not at confirmed delivery; delivery outcomes never flow back here.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    config: GateConfig,
    last_sent: Option<LastSent>,
}

impl DebounceGate {
    /// Create an uninitialized gate with the given thresholds
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            last_sent: None,
        }
    }

    /// Feed one observation through the gate
    ///
    /// Returns the notification to deliver when the gate decides to emit,
    /// recording the observation's value and time in the same step.
    pub fn observe(&mut self, obs: &Observation) -> Option<Notification> {
        match self.last_sent {
            // First value after session start: send once, arm the gate
            None => {
                debug!(
                    identity = %obs.identity,
                    total_coins = obs.total_coins,
                    "Initial mule coin total for this session"
                );
                self.arm(obs);
                Some(Notification::from_observation(obs))
            }
            Some(last) => {
                let diff = obs.total_coins.abs_diff(last.total_coins);
                let elapsed = obs.timestamp_millis - last.at_millis;

                if diff >= self.config.change_threshold
                    && elapsed >= self.config.cooldown_millis
                {
                    debug!(
                        old = last.total_coins,
                        new = obs.total_coins,
                        diff,
                        "Mule coins changed"
                    );
                    self.arm(obs);
                    Some(Notification::from_observation(obs))
                } else {
                    None
                }
            }
        }
    }

    /// Forget the recorded value and time, returning to the
    /// uninitialized state
    ///
    /// Called on session boundaries; the next observation emits
    /// unconditionally.
    pub fn reset(&mut self) {
        self.last_sent = None;
    }

    /// Whether a value has been sent this session
    pub fn is_armed(&self) -> bool {
        self.last_sent.is_some()
    }

    fn arm(&mut self, obs: &Observation) {
        self.last_sent = Some(LastSent {
            total_coins: obs.total_coins,
            at_millis: obs.timestamp_millis,
        });
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(total_coins: u64, timestamp_millis: i64) -> Observation {
        Observation::new("Mule1", total_coins, timestamp_millis)
    }

    #[test]
    fn first_observation_always_emits() {
        let mut gate = DebounceGate::default();

        let emitted = gate.observe(&obs(1_000, 0));

        assert_eq!(emitted.map(|n| n.total_coins), Some(1_000));
        assert!(gate.is_armed());
    }

    #[test]
    fn small_change_does_not_emit() {
        let mut gate = DebounceGate::default();
        gate.observe(&obs(1_000, 0));

        // diff of 999_999, one short of the threshold
        assert!(gate.observe(&obs(1_000_999, 10_000)).is_none());
    }

    #[test]
    fn large_change_within_cooldown_does_not_emit() {
        let mut gate = DebounceGate::default();
        gate.observe(&obs(1_000, 0));

        assert!(gate.observe(&obs(5_000_000, 4_999)).is_none());
    }

    #[test]
    fn emission_requires_both_thresholds() {
        let mut gate = DebounceGate::default();
        gate.observe(&obs(1_000, 0));

        let emitted = gate.observe(&obs(2_000_000, 5_000));

        assert_eq!(emitted.map(|n| n.total_coins), Some(2_000_000));
    }

    #[test]
    fn decreases_count_as_change() {
        let mut gate = DebounceGate::default();
        gate.observe(&obs(10_000_000, 0));

        let emitted = gate.observe(&obs(1_000, 6_000));

        assert_eq!(emitted.map(|n| n.total_coins), Some(1_000));
    }

    #[test]
    fn reset_makes_the_next_observation_emit_unconditionally() {
        let mut gate = DebounceGate::default();
        gate.observe(&obs(1_000, 0));

        gate.reset();
        assert!(!gate.is_armed());

        // No change at all, still inside the cooldown window
        let emitted = gate.observe(&obs(1_000, 1));
        assert_eq!(emitted.map(|n| n.total_coins), Some(1_000));
    }

    #[test]
    fn cooldown_is_measured_from_the_last_send_not_the_last_attempt() {
        let mut gate = DebounceGate::default();
        let samples = [
            (1_000, 0),
            (1_000, 1_000),
            (2_500_000, 2_000),
            (2_500_000, 7_000),
        ];

        let emitted: Vec<u64> = samples
            .iter()
            .filter_map(|&(coins, at)| gate.observe(&obs(coins, at)))
            .map(|n| n.total_coins)
            .collect();

        // t=0 sends the initial value; t=2000 clears the change threshold
        // but not the cooldown; t=7000 clears both (elapsed from t=0).
        assert_eq!(emitted, vec![1_000, 2_500_000]);
    }
}
