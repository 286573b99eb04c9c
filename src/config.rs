use crate::domain::payout::{
    AssertionOptions, DEFAULT_PAYMENT_EXTERNAL_ID, DEFAULT_PAYMENT_ITEM_ID,
    DEFAULT_PRE_AUTHORIZATION_ID,
};
use crate::error::{GatewayError, Result};
use axum::http::Uri;
use clap::Parser;

/// Mock payment gateway for end-to-end checkout tests.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct GatewayConfig {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "BILLING_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "BILLING_PORT", default_value_t = 4201)]
    pub port: u16,

    /// Externally reachable base URL; payment starts redirect to `<public-url>/checkin`
    #[arg(long, env = "BILLING_PUBLIC_URL", default_value = "http://localhost:4201")]
    pub public_url: String,

    /// Secret shared with the marketplace to sign assertions (HS256)
    #[arg(
        long,
        env = "BILLING_JWT_SECRET",
        default_value = "test-billing-secret-key-2024",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub jwt_secret: String,

    /// Number of payment gateways reported to the marketplace
    #[arg(long, env = "BILLING_GATEWAY_COUNT", default_value_t = 2)]
    pub gateway_count: u32,

    /// Redirect target when a completion finds nothing pending. Without it the
    /// service answers 404.
    #[arg(long, env = "BILLING_FALLBACK_URL")]
    pub fallback_url: Option<String>,

    #[arg(long, env = "BILLING_PAYMENT_EXTERNAL_ID", default_value = DEFAULT_PAYMENT_EXTERNAL_ID)]
    pub payment_external_id: String,

    #[arg(long, env = "BILLING_PRE_AUTHORIZATION_ID", default_value = DEFAULT_PRE_AUTHORIZATION_ID)]
    pub pre_authorization_id: String,

    #[arg(long, env = "BILLING_PAYMENT_ITEM_ID", default_value_t = DEFAULT_PAYMENT_ITEM_ID)]
    pub payment_item_id: u64,

    /// Log filter directive (e.g. `info`, `billing_mock=debug`)
    #[arg(long, env = "BILLING_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl GatewayConfig {
    /// Rejects settings the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            return Err(GatewayError::Config("JWT secret must not be empty".to_string()));
        }

        let uri: Uri = self.public_url.parse().map_err(|e| {
            GatewayError::Config(format!("invalid public URL {}: {e}", self.public_url))
        })?;
        let http = matches!(uri.scheme_str(), Some("http" | "https"));
        if !http || uri.host().is_none() {
            return Err(GatewayError::Config(format!(
                "public URL must be an absolute http(s) URL: {}",
                self.public_url
            )));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The URL every payment start sends the browser to.
    pub fn confirmation_url(&self) -> String {
        format!("{}/checkin", self.public_url.trim_end_matches('/'))
    }

    pub fn assertion_options(&self) -> AssertionOptions {
        AssertionOptions {
            payment_external_id: self.payment_external_id.clone(),
            pre_authorization_id: self.pre_authorization_id.clone(),
            payment_item_id: self.payment_item_id,
        }
    }
}
