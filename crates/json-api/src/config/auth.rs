//! Auth Config

use clap::Args;

/// Operator authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Bearer token required on operator endpoints
    #[arg(long, env = "OPERATOR_TOKEN", hide_env_values = true)]
    pub operator_token: String,
}
