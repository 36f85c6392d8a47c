//! Step In Notifier - wiring and configuration for the watcher binary.

pub mod config;
pub mod main_lib;

pub use config::Config;
pub use main_lib::{build_monitor, build_monitor_with_clock, init_tracing, run_once};
