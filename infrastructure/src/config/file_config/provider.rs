//! Provider configuration from TOML (`[provider]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use tribunal_domain::Model;

/// Raw provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Default model for every persona
    pub model: String,
    /// Per-attempt timeout
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: Model::default().to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileProviderConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName {
                field: "provider.model".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Empty values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
