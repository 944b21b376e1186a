//! Confirmation emails, delivered through the Resend HTTP API.

pub mod config;
pub mod errors;
pub(crate) mod render;
pub mod service;

pub use config::EmailConfig;
pub use errors::EmailServiceError;
pub use service::{EmailService, MockEmailService, ResendEmailService};
