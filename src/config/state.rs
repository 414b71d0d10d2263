// Application state module
// Shared, immutable runtime state handed to every connection

use chrono::{DateTime, Local};

use super::types::Config;

/// Application state
///
/// Configuration is fixed for the lifetime of the process; there is no
/// runtime mutation, so no locking is needed.
pub struct AppState {
    pub config: Config,
    pub started_at: DateTime<Local>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started_at: Local::now(),
        }
    }

    /// Seconds since the server started, for the health endpoint
    pub fn uptime_secs(&self) -> i64 {
        (Local::now() - self.started_at).num_seconds()
    }
}
