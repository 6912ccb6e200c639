use serde::Deserialize;
use std::time::Duration;

/// Process configuration, loaded once at startup and handed to each component.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    pub gemini_api_key: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub sender_email: String,
    pub sender_password: String,
    #[serde(default = "default_email_subject")]
    pub email_subject: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(config::Environment::default())
    }

    pub fn load(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn bind_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    300
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_email_subject() -> String {
    "Top Trending OTT Series".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        host: default_host(),
        port: default_port(),
        gemini_api_key: "test-key".to_string(),
        gemini_model: default_gemini_model(),
        gemini_base_url: "http://127.0.0.1:1".to_string(),
        llm_timeout_secs: 5,
        smtp_host: "localhost".to_string(),
        smtp_port: 2525,
        sender_email: "pilot@example.com".to_string(),
        sender_password: "secret".to_string(),
        email_subject: default_email_subject(),
        log_level: default_log_level(),
    }
}
