//! Controller integration suite
//!
//! Drives the public facade end to end: evaluator, controller and sinks
//! together.
//!
//! ```bash
//! cargo test --test controller
//! cargo test --test controller properties::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod lifecycle;
mod pacing;
mod properties;
mod sinks;
