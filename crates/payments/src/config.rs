/// Payment gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    /// Gateway API base URL, e.g. `https://api.mollie.com/v2`.
    pub base_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// URL the payer is sent back to after checkout.
    pub redirect_url: String,
    /// Our webhook URL the gateway calls on status changes.
    pub webhook_url: String,
}

impl PaymentsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `PSP_API_KEY` is unset, which disables checkout
    /// creation (payments can still be marked paid manually).
    ///
    /// | Env Var            | Default                     |
    /// |--------------------|-----------------------------|
    /// | `PSP_API_KEY`      | (required)                  |
    /// | `PSP_BASE_URL`     | `https://api.mollie.com/v2` |
    /// | `PSP_REDIRECT_URL` | (required)                  |
    /// | `PSP_WEBHOOK_URL`  | (required)                  |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("PSP_API_KEY").ok()?;

        let base_url = std::env::var("PSP_BASE_URL")
            .unwrap_or_else(|_| "https://api.mollie.com/v2".into())
            .trim_end_matches('/')
            .to_string();

        let redirect_url = std::env::var("PSP_REDIRECT_URL")
            .expect("PSP_REDIRECT_URL must be set when PSP_API_KEY is set");

        let webhook_url = std::env::var("PSP_WEBHOOK_URL")
            .expect("PSP_WEBHOOK_URL must be set when PSP_API_KEY is set");

        Some(Self {
            base_url,
            api_key,
            redirect_url,
            webhook_url,
        })
    }
}
