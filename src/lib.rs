//! Clique Lounge
//!
//! Headless frontend for the Clique Lounge state layer. The controllers,
//! persistence and drivers live in `lounge-app`; this crate wires them to
//! stdin/stdout.

pub mod headless;

// Re-export main entry points
pub use headless::runner::{run_headless, HeadlessOptions};
