// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub smtp: SmtpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Static site configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory served as the portfolio site
    pub root_dir: String,
    /// Document served for the root path
    pub index_file: String,
}

/// SMTP relay configuration
///
/// Credentials are intentionally absent from the defaults; they come
/// from `PORTFOLIO__SMTP__USERNAME` / `PORTFOLIO__SMTP__PASSWORD`.
#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub to_address: String,
    /// SMTP session timeout in seconds
    pub timeout: u64,
}

impl SmtpConfig {
    /// Recipient mailbox; falls back to the sender address when unset,
    /// matching the original single-mailbox setup.
    pub fn recipient(&self) -> &str {
        if self.to_address.is_empty() {
            &self.from_address
        } else {
            &self.to_address
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format ("common", "json")
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp(from: &str, to: &str) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "user".to_string(),
            password: "pass".to_string(),
            from_address: from.to_string(),
            to_address: to.to_string(),
            timeout: 30,
        }
    }

    #[test]
    fn test_recipient_falls_back_to_sender() {
        let cfg = smtp("owner@example.com", "");
        assert_eq!(cfg.recipient(), "owner@example.com");
    }

    #[test]
    fn test_recipient_explicit() {
        let cfg = smtp("noreply@example.com", "inbox@example.com");
        assert_eq!(cfg.recipient(), "inbox@example.com");
    }
}
