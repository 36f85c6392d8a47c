//! Notification quota - a per-day counter persisted through the document store.

mod quota_model;
mod quota_service;


pub use quota_model::{QuotaSettings, QuotaState};
pub use quota_service::{QuotaService, QuotaServiceTrait};
