//! Core application module
//!
//! Contains the frame-driven application shell and timing utilities

mod app;
mod stats;
mod time;

pub use app::{App, AppConfig, AppContext, Demo};
pub use stats::SimStats;
pub use time::Time;
