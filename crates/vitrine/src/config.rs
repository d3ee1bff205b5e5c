//! Runtime configuration for the widget server.

/// Environment variable overriding the advertised base URL.
pub const BASE_URL_ENV: &str = "VITRINE_BASE_URL";

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Origin advertised in widget CSP metadata and asset links. Behind a
    /// proxy this differs from the bind address, hence the override.
    pub base_url: String,
}

impl ServerConfig {
    /// Resolve from CLI flags, falling back to `VITRINE_BASE_URL` and then
    /// to the local listen address.
    pub fn new(port: u16, base_url: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", port));
        Self {
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
