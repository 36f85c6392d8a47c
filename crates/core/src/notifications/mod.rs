//! Notifications - report rendering and the quota-aware dispatch policy.

mod notification_service;
mod notifications_model;
mod notifications_traits;
mod report;

#[cfg(test)]
mod notification_service_tests;

pub use notification_service::{NotificationService, NotificationServiceTrait};
pub use notifications_model::{ErrorReport, NotificationSettings, NotifyOutcome, OutgoingEmail};
pub use notifications_traits::Mailer;
pub use report::{escape_html, render_change_report, render_error_report};
