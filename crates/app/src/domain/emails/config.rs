//! Email delivery settings.

/// Settings for the Resend-backed email service.
///
/// A missing API key is tolerated at startup so local environments can
/// run without email delivery; sends then fail with a logged error
/// instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Resend API key. `None` disables delivery.
    pub api_key: Option<String>,

    /// Base URL of the Resend API.
    pub api_base: String,

    /// Sender address for both customer and operator emails.
    pub from: String,

    /// Operator inbox that receives a copy of every order.
    pub operator: String,
}
