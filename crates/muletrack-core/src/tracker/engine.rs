//! Per-tick tracking engine
//!
//! Runs the filter -> gate -> render -> deliver pass for each observation
//! and reacts to session-boundary events. The engine is driven from a
//! single logical task, so the gate needs no locking; delivery is the only
//! asynchronous step and is spawned without awaiting its result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Notification, Observation, SessionEvent};
use crate::notify::{render, DeliverySink};
use crate::source::{HostEvent, ObservationSource};

use super::filter::is_active;
use super::gate::DebounceGate;

/// Tick-driven balance tracker
pub struct Tracker<S: DeliverySink> {
    config: Config,
    gate: DebounceGate,
    sink: Arc<S>,
}

impl<S: DeliverySink> Tracker<S> {
    /// Create a tracker with an uninitialized gate
    pub fn new(config: Config, sink: S) -> Self {
        let gate = DebounceGate::new(config.gate.clone());
        Self {
            config,
            gate,
            sink: Arc::new(sink),
        }
    }

    /// Process one observation; at most one decision pass per tick
    ///
    /// Returns true when the gate emitted (whether or not a delivery was
    /// actually started; an empty endpoint skips the send but the gate has
    /// already advanced).
    pub fn handle_tick(&mut self, obs: &Observation) -> bool {
        // No observable identity means not logged in: skip the tick even
        // when the allow-list places no restriction
        if obs.identity.is_empty() {
            return false;
        }

        if !is_active(&self.config.account, Some(obs.identity.as_str())) {
            return false;
        }

        let Some(notification) = self.gate.observe(obs) else {
            return false;
        };

        self.dispatch_balance_update(&notification);
        true
    }

    /// React to a session boundary: drop the recorded value and time so
    /// the next observation emits unconditionally
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        debug!(?event, "Session boundary, resetting tracker state");
        self.gate.reset();
    }

    /// Whether a value has been sent this session
    pub fn is_armed(&self) -> bool {
        self.gate.is_armed()
    }

    /// Drive the tracker from a host event stream until it ends
    ///
    /// Deliveries still in flight when the stream ends are left to finish
    /// or fail in the background.
    pub async fn run<Src: ObservationSource>(mut self, mut source: Src) -> Result<()> {
        info!("Mule balance tracker started");

        while let Some(event) = source.next_event().await? {
            match event {
                HostEvent::Tick(obs) => {
                    self.handle_tick(&obs);
                }
                HostEvent::Session(ev) => self.handle_session_event(ev),
            }
        }

        info!("Mule balance tracker stopped");
        Ok(())
    }

    fn dispatch_balance_update(&self, notification: &Notification) {
        let endpoint = self.config.endpoint.url.trim();
        if endpoint.is_empty() {
            warn!("Endpoint URL is empty, cannot send balance update");
            return;
        }

        let body = match render(endpoint, notification) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to render balance payload");
                return;
            }
        };

        debug!(payload = %body, "Sending mule balance payload");

        // Fire and forget: the gate has already advanced, so a failed or
        // out-of-order completion has nothing left to corrupt.
        let sink = Arc::clone(&self.sink);
        let url = endpoint.to_string();
        tokio::spawn(async move {
            if let Err(e) = sink.post(&url, body).await {
                warn!(error = %e, "Failed to POST balance update");
            }
        });
    }
}
