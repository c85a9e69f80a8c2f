//! Environment configuration

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, `FORMCRAFT_ADDR`.
    pub bind_addr: String,
    /// Session signing secret, `FORMCRAFT_SESSION_SECRET`.
    pub session_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("FORMCRAFT_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            session_secret: std::env::var("FORMCRAFT_SESSION_SECRET")
                .unwrap_or_else(|_| "formcraft-dev-secret-change-in-production".into()),
        }
    }
}
