//! Controller layer: event intake from the store and command orchestration.

pub mod events;
pub mod orchestration;

pub use orchestration::{CommandOutcome, Controller};
