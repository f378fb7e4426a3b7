//! Tracking engine for muletrack
//!
//! Account filtering, the debounce gate, and the per-tick decision pass
//! that wires them to payload rendering and delivery.

mod engine;
mod filter;
mod gate;

pub use engine::Tracker;
pub use filter::is_active;
pub use gate::DebounceGate;
