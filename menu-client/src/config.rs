//! Client configuration

use crate::reorder::OverlapPolicy;

/// Client configuration for connecting to the menu API
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | MENU_API_URL | http://localhost:8080 | API base URL |
/// | MENU_API_TOKEN | - | Bearer token |
/// | MENU_RESTAURANT_ID | - | Restaurant whose menu is managed |
/// | MENU_REQUEST_TIMEOUT_SECS | 30 | Request timeout (seconds) |
/// | MENU_OVERLAP_POLICY | serialize | `serialize` or `reject` |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Restaurant the category and item lists belong to
    pub restaurant_id: Option<String>,

    /// What happens when two reorders hit the same list at once
    pub overlap_policy: OverlapPolicy,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            restaurant_id: None,
            overlap_policy: OverlapPolicy::default(),
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var("MENU_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        config.token = std::env::var("MENU_API_TOKEN").ok().filter(|t| !t.is_empty());
        config.restaurant_id = std::env::var("MENU_RESTAURANT_ID")
            .ok()
            .filter(|r| !r.is_empty());
        config.timeout = std::env::var("MENU_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);
        config.overlap_policy = std::env::var("MENU_OVERLAP_POLICY")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();
        config
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_restaurant_id(mut self, restaurant_id: impl Into<String>) -> Self {
        self.restaurant_id = Some(restaurant_id.into());
        self
    }

    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
