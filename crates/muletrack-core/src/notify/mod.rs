//! Notification rendering and delivery for muletrack

mod payload;
mod sink;

pub use payload::{render, JSON_CONTENT_TYPE};
pub use sink::{DeliverySink, HttpSink};
