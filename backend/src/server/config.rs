//! Server settings and the assembled server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use homework_backend::inbound::http::error::ErrorStatusPolicy;
use homework_backend::outbound::persistence::{DbPool, PoolConfig};
use homework_backend::outbound::provider_config::{
    BuildMode, ProviderSettings, provider_settings_from_env,
};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Listener and behaviour toggles loaded via OrthoConfig.
///
/// Each field is read from `SOLVER_*` environment variables or the matching
/// CLI flag.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOLVER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Request timeout, in seconds, for identity and completion calls.
    pub upstream_timeout_secs: Option<u64>,
    /// Answer every failure with 500 instead of a per-kind status.
    #[ortho_config(default = false)]
    pub uniform_error_status: bool,
    /// Apply embedded database migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Idle connections the pool keeps open.
    pub db_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection before failing the insert.
    pub db_checkout_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] of kind `InvalidInput` when the
    /// configured address does not parse.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid SOLVER_BIND_ADDR '{raw}': {err}"),
            )
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(
            self.upstream_timeout_secs
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        )
    }

    pub fn error_policy(&self) -> ErrorStatusPolicy {
        ErrorStatusPolicy::from_uniform_flag(self.uniform_error_status)
    }

    /// Pool configuration for `database_url`, with any `SOLVER_DB_*`
    /// overrides applied over the pool defaults.
    pub fn pool_config(&self, database_url: Zeroizing<String>) -> PoolConfig {
        let mut config = PoolConfig::new(database_url).with_min_idle(self.db_min_idle);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_size(max);
        }
        if let Some(secs) = self.db_checkout_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Read provider credentials from the process environment.
///
/// # Errors
///
/// Release builds fail when a required credential is missing or a URL does
/// not parse.
pub fn load_provider_settings(mode: BuildMode) -> std::io::Result<ProviderSettings> {
    provider_settings_from_env(&DefaultEnv::new(), mode).map_err(std::io::Error::other)
}

/// Everything `create_server` needs, assembled in `main`.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream_timeout: Duration,
    pub(crate) error_policy: ErrorStatusPolicy,
    pub(crate) providers: ProviderSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Combine loaded settings with provider credentials.
    ///
    /// # Errors
    ///
    /// Propagates an invalid bind address from [`ServerSettings::bind_addr`].
    pub fn new(settings: &ServerSettings, providers: ProviderSettings) -> std::io::Result<Self> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            upstream_timeout: settings.upstream_timeout(),
            error_policy: settings.error_policy(),
            providers,
            db_pool: None,
        })
    }

    /// Attach the pool backing the homework session store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "SOLVER_BIND_ADDR",
        "SOLVER_UPSTREAM_TIMEOUT_SECS",
        "SOLVER_UNIFORM_ERROR_STATUS",
        "SOLVER_RUN_MIGRATIONS",
        "SOLVER_DB_MAX_CONNECTIONS",
        "SOLVER_DB_MIN_IDLE",
        "SOLVER_DB_CHECKOUT_TIMEOUT_SECS",
    ];

    const PROVIDER_VARS: [&str; 5] = [
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "DATABASE_URL",
    ];

    fn database_url() -> Zeroizing<String> {
        Zeroizing::new("postgres://tutor@localhost/homework".to_owned())
    }

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("homework-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(60));
        assert_eq!(settings.error_policy(), ErrorStatusPolicy::PerKind);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SOLVER_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("SOLVER_UPSTREAM_TIMEOUT_SECS", Some("15".to_owned())),
            ("SOLVER_UNIFORM_ERROR_STATUS", Some("true".to_owned())),
            ("SOLVER_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(settings.upstream_timeout(), Duration::from_secs(15));
        assert_eq!(settings.error_policy(), ErrorStatusPolicy::Uniform);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn unparsable_bind_addr_is_rejected() {
        let _guard = lock_env([("SOLVER_BIND_ADDR", Some("localhost".to_owned()))]);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("hostname without port");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn pool_config_keeps_defaults_without_overrides() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let pool = load_from_empty_args().pool_config(database_url());
        assert_eq!(pool.max_size(), 8);
        assert_eq!(pool.min_idle(), None);
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn pool_config_applies_database_overrides() {
        let _guard = lock_env([
            ("SOLVER_DB_MAX_CONNECTIONS", Some("3".to_owned())),
            ("SOLVER_DB_MIN_IDLE", Some("1".to_owned())),
            ("SOLVER_DB_CHECKOUT_TIMEOUT_SECS", Some("2".to_owned())),
        ]);

        let pool = load_from_empty_args().pool_config(database_url());
        assert_eq!(pool.database_url(), "postgres://tutor@localhost/homework");
        assert_eq!(pool.max_size(), 3);
        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(2));
    }

    #[rstest]
    fn provider_settings_load_from_process_environment() {
        let _guard = lock_env([
            ("OPENAI_API_KEY", Some("sk-live".to_owned())),
            ("OPENAI_BASE_URL", None),
            ("SUPABASE_URL", None),
            ("SUPABASE_ANON_KEY", None),
            ("DATABASE_URL", None),
        ]);

        let providers = load_provider_settings(BuildMode::Debug).expect("debug tolerates gaps");
        let openai = providers.openai.expect("api key read from the environment");
        assert_eq!(openai.api_key.as_str(), "sk-live");
        assert!(providers.supabase.is_none());
        assert!(providers.database_url.is_none());
    }

    #[rstest]
    fn release_mode_refuses_missing_credentials() {
        let _guard = lock_env(PROVIDER_VARS.map(|name| (name, None::<String>)));

        let err = load_provider_settings(BuildMode::Release).expect_err("strict in release");
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
    }
}
