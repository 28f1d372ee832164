//! Gateway configuration.

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "STOCKDESK_API_BASE_URL";

/// Default backend endpoint for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Paths are joined with a leading slash; keep the base bare.
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the base URL from the environment, falling back to the local
    /// development endpoint.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ApiConfig::new("http://backend:9000/");
        assert_eq!(config.base_url, "http://backend:9000");
    }

    #[test]
    fn default_points_at_local_development() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8080");
    }
}
