//! Runtime configuration for genie-relay.
//!
//! Configuration is read once from the environment at startup (after an
//! optional `.env` load) into an immutable [`Config`]; nothing is mutated
//! at runtime.

use clap::Parser;
use tracing::warn;

/// Default Groq API base URL.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "genie-relay", about = "Streaming LLM completion relay")]
pub struct Cli {
    /// HTTP listen address.
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub listen: String,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret compared by exact match to authorize requests.
    ///
    /// When unset, no supplied credential can match and every completion
    /// request is rejected.
    pub auth_secret: Option<String>,

    /// Groq API key, sent as a bearer token on every upstream call.
    pub groq_api_key: String,

    /// Upstream API base URL.
    pub groq_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails if `GROQ_API_KEY` is absent; `AUTH_SECRET` and `GROQ_BASE_URL`
    /// are optional.
    pub fn from_env() -> anyhow::Result<Self> {
        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow::anyhow!("GROQ_API_KEY is missing. Please check your .env file."))?;

        let groq_base_url = std::env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());

        let auth_secret = std::env::var("AUTH_SECRET").ok().filter(|s| !s.is_empty());
        if auth_secret.is_none() {
            warn!("AUTH_SECRET is not set; all completion requests will be rejected");
        }

        Ok(Self {
            auth_secret,
            groq_api_key,
            groq_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env-var mutations don't race a parallel test.
    #[test]
    fn test_from_env() {
        std::env::remove_var("GROQ_API_KEY");
        std::env::remove_var("AUTH_SECRET");
        std::env::remove_var("GROQ_BASE_URL");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY is missing"));

        std::env::set_var("GROQ_API_KEY", "gsk-test");
        std::env::set_var("AUTH_SECRET", "hunter2");

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.groq_api_key, "gsk-test");
        assert_eq!(cfg.auth_secret.as_deref(), Some("hunter2"));
        assert_eq!(cfg.groq_base_url, DEFAULT_GROQ_BASE_URL);
    }
}
