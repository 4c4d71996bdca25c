//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_API_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Minimum age, in whole years, enforced when no override is configured.
pub const DEFAULT_MIN_AGE: u32 = 18;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the user directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_API")]
pub struct AppSettings {
    /// Minimum age, in whole years, a stored user must have reached.
    #[ortho_config(default = 18)]
    pub min_age: u32,
    /// Interface address to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
}

impl AppSettings {
    /// Socket address the HTTP server binds to.
    ///
    /// # Examples
    /// ```
    /// use user_directory::config::AppSettings;
    ///
    /// let settings = AppSettings { min_age: 18, host: None, port: Some(9000) };
    /// assert_eq!(settings.bind_addr().to_string(), "0.0.0.0:9000");
    /// ```
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }
}
