//! Deliberation domain: opposing personas and the arbiter that judges them.
//!
//! # Flow
//!
//! ```text
//! DeliberationInput ─┬─► Optimist ─┐
//!                    └─► Skeptic  ─┴─► Arbiter ─► DeliberationResult
//! ```
//!
//! - [`persona`]: who speaks
//! - [`analysis`]: which kind of analysis is run
//! - [`entities`]: phases and the per-run state machine
//! - [`value_objects`]: inputs, stage outputs, timings, final result

pub mod analysis;
pub mod entities;
pub mod persona;
pub mod value_objects;
