//! Observation sources
//!
//! The host owns sampling: one observation per tick, plus session-boundary
//! events when the tracked identity's context becomes invalid. The
//! original host was a game-client event bus; anything that can produce
//! the same event stream (a pipe from the client, a replay file, a test
//! vector) plugs in through [`ObservationSource`].

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::warn;

use crate::error::Result;
use crate::models::{Observation, SessionEvent};

/// One event from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A sampling tick with the current observation
    Tick(Observation),
    /// A session boundary
    Session(SessionEvent),
}

/// Stream of host events driving the tracker
#[async_trait]
pub trait ObservationSource: Send {
    /// Next host event, or `None` when the stream has ended
    async fn next_event(&mut self) -> Result<Option<HostEvent>>;
}

// Wire format of one host line
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireEvent {
    Tick {
        identity: String,
        total_coins: u64,
        // Hosts that do not stamp ticks get the receive time
        timestamp_millis: Option<i64>,
    },
    LoginScreen,
    AccountHop,
}

/// JSON-lines host adapter
///
/// Reads one JSON object per line, e.g.
/// `{"type": "tick", "identity": "Mule1", "total_coins": 2500000}` or
/// `{"type": "login_screen"}`. Malformed lines are logged and skipped so a
/// misbehaving host degrades to dropped samples rather than a dead tracker.
pub struct JsonLineSource<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: tokio::io::AsyncRead + Unpin + Send> JsonLineSource<R> {
    /// Wrap a byte stream of newline-delimited host events
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

#[async_trait]
impl<R: tokio::io::AsyncRead + Unpin + Send> ObservationSource for JsonLineSource<R> {
    async fn next_event(&mut self) -> Result<Option<HostEvent>> {
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let wire: WireEvent = match serde_json::from_str(line) {
                Ok(wire) => wire,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed host line");
                    continue;
                }
            };

            let event = match wire {
                WireEvent::Tick {
                    identity,
                    total_coins,
                    timestamp_millis,
                } => HostEvent::Tick(Observation {
                    identity,
                    total_coins,
                    timestamp_millis: timestamp_millis
                        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
                }),
                WireEvent::LoginScreen => HostEvent::Session(SessionEvent::LoginScreen),
                WireEvent::AccountHop => HostEvent::Session(SessionEvent::AccountHop),
            };

            return Ok(Some(event));
        }

        Ok(None)
    }
}
