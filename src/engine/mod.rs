// src/engine/mod.rs

//! Change-detection and dispatch engine for ruwnch.
//!
//! This module ties together:
//! - the watch spec and its execution mode (`spec`, `mode`)
//! - the dispatcher that runs the command for a changed file (`dispatcher`)
//! - the poll loop that drives everything (`controller`)

pub mod controller;
pub mod dispatcher;
pub mod mode;
pub mod spec;

pub use controller::{LoopExit, LoopOptions, LoopState, PollController};
pub use dispatcher::{CycleOutcome, DispatchReport, Dispatcher};
pub use mode::resolve_mode;
pub use spec::WatchSpec;
