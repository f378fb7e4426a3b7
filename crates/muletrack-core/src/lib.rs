//! # Muletrack
//!
//! Debounced mule balance tracker.
//!
//! Muletrack watches the total coin balance observed on a mule account,
//! debounces change notifications through a threshold-and-cooldown gate,
//! and forwards updates to a remote HTTP endpoint (a backend API or a
//! Discord webhook). Delivery is best effort: one fire-and-forget POST per
//! emitted update, no retries, no persistence across restarts.
//!
//! ## Architecture
//!
//! - **Source**: host adapter supplying one observation per sampling tick
//! - **Tracker**: account filter, debounce gate, per-tick decision pass
//! - **Notify**: payload rendering and the HTTP delivery sink
//!
//! ## Quick Start
//!
//! ```bash
//! # Track observations streamed as JSON lines on stdin
//! muletrack run --config muletrack.toml
//!
//! # Send a single balance update manually
//! muletrack send --identity Mule1 --total-coins 2500000
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod source;
pub mod tracker;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::notify::{DeliverySink, HttpSink};
    pub use crate::source::{HostEvent, JsonLineSource, ObservationSource};
    pub use crate::tracker::Tracker;
}
