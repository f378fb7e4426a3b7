//! Data models for muletrack

mod notification;
mod observation;

pub use notification::*;
pub use observation::*;
