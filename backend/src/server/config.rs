//! Runtime settings and the server configuration built from them.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use clarity::outbound::persistence::{DbPool, PoolConfig};
use clarity::outbound::security::JwtSessionTokens;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 5000));
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Settings layered from CLI flags, `CLARITY_*` variables, and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLARITY")]
pub struct AppSettings {
    /// Address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL url. Without one the server keeps records in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Seconds an idle keep-alive connection stays open.
    #[ortho_config(default = 5)]
    pub keep_alive_secs: u64,
    /// Seconds allowed for a client to send request headers.
    #[ortho_config(default = 5)]
    pub client_request_timeout_secs: u64,
    /// Lifetime of issued session tokens in seconds.
    #[ortho_config(default = 3600)]
    pub token_ttl_secs: u64,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.db_connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ))
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn client_request_timeout(&self) -> Duration {
        Duration::from_secs(self.client_request_timeout_secs)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

/// Everything [`super::create_server`] needs, resolved from settings.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) keep_alive: Duration,
    pub(crate) client_request_timeout: Duration,
    pub(crate) tokens: JwtSessionTokens,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(settings: &AppSettings, tokens: JwtSessionTokens) -> Self {
        Self {
            bind_addr: settings.bind_addr(),
            keep_alive: settings.keep_alive(),
            client_request_timeout: settings.client_request_timeout(),
            tokens,
            db_pool: None,
        }
    }

    /// Use PostgreSQL repositories backed by `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
