//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::config::AppSettings;
use crate::domain::AgePolicy;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) age_policy: AgePolicy,
}

impl ServerConfig {
    /// Construct a server configuration binding `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, age_policy: AgePolicy) -> Self {
        Self {
            bind_addr,
            age_policy,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the age rule the user store enforces.
    #[must_use]
    pub fn age_policy(&self) -> AgePolicy {
        self.age_policy
    }
}

impl From<&AppSettings> for ServerConfig {
    fn from(settings: &AppSettings) -> Self {
        Self::new(settings.bind_addr(), AgePolicy::new(settings.min_age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn settings_translate_to_server_config() {
        let settings = AppSettings {
            min_age: 21,
            host: None,
            port: Some(3000),
        };
        let config = ServerConfig::from(&settings);
        assert_eq!(config.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.age_policy().min_age(), 21);
    }
}
