//! Email Config

use clap::Args;

use snaxo_app::domain::emails::EmailConfig;

/// Confirmation email delivery settings.
#[derive(Debug, Args)]
pub struct EmailSettings {
    /// Resend API key. Leave unset to disable email delivery.
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    #[arg(
        long,
        env = "RESEND_API_BASE",
        default_value = "https://api.resend.com"
    )]
    pub resend_api_base: String,

    /// Sender address for outgoing emails
    #[arg(long, env = "EMAIL_FROM", default_value = "Snaxo <order@snaxo.online>")]
    pub email_from: String,

    /// Operator inbox that receives a copy of every order
    #[arg(long, env = "OPERATOR_EMAIL")]
    pub operator_email: String,
}

impl From<EmailSettings> for EmailConfig {
    fn from(settings: EmailSettings) -> Self {
        Self {
            api_key: settings.resend_api_key,
            api_base: settings.resend_api_base,
            from: settings.email_from,
            operator: settings.operator_email,
        }
    }
}
