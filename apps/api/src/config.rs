use anyhow::{Context, Result};

const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MAILSLURP_API_BASE: &str = "https://api.mailslurp.com";
const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";

/// Application configuration loaded from environment variables.
/// Startup fails if either API key is missing.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_base: String,
    pub llm_model: String,
    pub mailslurp_api_key: String,
    pub mailslurp_api_base: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_base: env_or("GROQ_API_BASE", DEFAULT_GROQ_API_BASE),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            mailslurp_api_key: require_env("MAILSLURP_API_KEY")?,
            mailslurp_api_base: env_or("MAILSLURP_API_BASE", DEFAULT_MAILSLURP_API_BASE),
            port: parse_port(std::env::var("PORT").ok().as_deref())?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

// Keys stay out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("groq_api_base", &self.groq_api_base)
            .field("llm_model", &self.llm_model)
            .field("mailslurp_api_base", &self.mailslurp_api_base)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish_non_exhaustive()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    raw.unwrap_or("8080")
        .parse::<u16>()
        .context("PORT must be a valid port number")
}
