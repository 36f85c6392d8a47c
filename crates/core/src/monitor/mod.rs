//! Monitor - sequences one watcher run.

mod monitor_model;
mod monitor_service;


pub use monitor_model::{MonitorSettings, RunSummary};
pub use monitor_service::MonitorService;
