//! Step In Mailer - outbound e-mail over the Brevo HTTP API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stepin_mailer::{BrevoMailer, DEFAULT_BREVO_API_URL};
//! use stepin_core::notifications::Mailer;
//!
//! let mailer = BrevoMailer::new(DEFAULT_BREVO_API_URL, &api_key)?;
//! mailer.send(&email).await?;
//! ```

mod client;
mod error;
mod types;

pub use client::{BrevoMailer, DEFAULT_BREVO_API_URL};
pub use error::{MailerError, Result};
