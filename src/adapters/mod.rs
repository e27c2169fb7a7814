//! Driven adapters implementing the port traits in [`crate::app::ports`].
//!
//! Hardware-facing adapters (pump HAL, alarm buzzer) live with the board
//! support code; only the platform-neutral ones are here.

pub mod log_sink;
