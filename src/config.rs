//! Configuration management for the research agent service.
//!
//! Configuration is read from environment variables:
//! - `GEMINI_API_KEY` - Required. API key for the Gemini model provider.
//! - `SERPER_API_KEY` - Required. API key for the Serper.dev search provider.
//! - `DEFAULT_MODEL` - Optional. Model identifier. Defaults to `gemini-2.0-flash`.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_STEPS` - Optional. Maximum agent loop steps per run. Defaults to `10`.
//! - `MAX_COMPLETION_TOKENS` - Optional. Cumulative completion-token budget per run. Defaults to `8000`.
//! - `TEMPERATURE` - Optional. Model sampling temperature. Defaults to `0.2`.
//! - `VERBOSITY` - Optional. Run trace verbosity, 0-2. Defaults to `2`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (model provider)
    pub gemini_api_key: String,

    /// Serper.dev API key (search/crawl/news provider)
    pub serper_api_key: String,

    /// Model identifier passed to the provider
    pub default_model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum steps per agent run
    pub max_steps: usize,

    /// Cumulative completion-token budget per agent run
    pub max_completion_tokens: u32,

    /// Model sampling temperature
    pub temperature: f32,

    /// Run trace verbosity: 0 = silent, 1 = final only, 2 = full trace
    pub verbosity: u8,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` or
    /// `SERPER_API_KEY` is not set. Credentials are validated here, at
    /// startup, so a misconfigured deployment fails before serving requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let serper_api_key = std::env::var("SERPER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("SERPER_API_KEY".to_string()))?;

        let default_model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_steps = std::env::var("MAX_STEPS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        let max_completion_tokens = std::env::var("MAX_COMPLETION_TOKENS")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_COMPLETION_TOKENS".to_string(), format!("{}", e))
            })?;

        let temperature = std::env::var("TEMPERATURE")
            .unwrap_or_else(|_| "0.2".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("TEMPERATURE".to_string(), format!("{}", e)))?;

        let verbosity = std::env::var("VERBOSITY")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("VERBOSITY".to_string(), format!("{}", e)))?;

        Ok(Self {
            gemini_api_key,
            serper_api_key,
            default_model,
            host,
            port,
            max_steps,
            max_completion_tokens,
            temperature,
            verbosity,
        })
    }

    /// Create a config with custom credentials (useful for testing).
    pub fn new(gemini_api_key: String, serper_api_key: String) -> Self {
        Self {
            gemini_api_key,
            serper_api_key,
            default_model: "gemini-2.0-flash".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_steps: 10,
            max_completion_tokens: 8000,
            temperature: 0.2,
            verbosity: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_uses_reference_defaults() {
        let config = Config::new("model-key".to_string(), "search-key".to_string());
        assert_eq!(config.default_model, "gemini-2.0-flash");
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.max_completion_tokens, 8000);
        assert_eq!(config.verbosity, 2);
    }
}
