use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://nextai-dir.preview.emergentagent.com";

/// Settings for a probe run, read from the YAML config file.
/// Every field is optional in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// The deployed API every probe path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-wide request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Timeout for lightweight fetches: the health check and the upload
    /// round-trip download.
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,

    /// User id placed in the make-admin / remove-admin paths.
    #[serde(default = "default_target_user_id")]
    pub target_user_id: String,

    /// Well-formed bearer token the API has never issued.
    #[serde(default = "default_mock_bearer_token")]
    pub mock_bearer_token: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            fetch_timeout_seconds: default_fetch_timeout_seconds(),
            target_user_id: default_target_user_id(),
            mock_bearer_token: default_mock_bearer_token(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_fetch_timeout_seconds() -> u64 {
    10
}

fn default_target_user_id() -> String {
    "test-user-id".to_string()
}

fn default_mock_bearer_token() -> String {
    "mock-token".to_string()
}
