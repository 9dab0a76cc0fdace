//! Server settings loaded via OrthoConfig.
//!
//! Values come from `FEST_*` environment variables, an optional config file
//! and command-line flags, in increasing order of precedence.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Settings for the HTTP server and its database pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FEST")]
pub struct FestSettings {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    pub pool_max_size: Option<u32>,
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connect_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl FestSettings {
    /// Parse the configured bind address, falling back to all interfaces on
    /// port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Whether embedded migrations run at start-up.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool settings derived from these values.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url.clone())
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "FEST_DATABASE_URL",
        "FEST_BIND_ADDR",
        "FEST_POOL_MAX_SIZE",
        "FEST_POOL_MIN_IDLE",
        "FEST_CONNECT_TIMEOUT_SECS",
        "FEST_RUN_MIGRATIONS",
    ];

    fn load(vars: &[(&str, &str)]) -> Result<FestSettings, String> {
        let _guard = lock_env(VARS.map(|name| {
            let value = vars
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        FestSettings::load_from_iter([OsString::from("fest-backend")])
            .map_err(|err| err.to_string())
    }

    #[rstest]
    fn defaults_apply_when_only_the_database_is_set() {
        let settings =
            load(&[("FEST_DATABASE_URL", "postgres://localhost/fest")]).expect("settings");

        assert!(settings.run_migrations());
        assert_eq!(
            settings.bind_addr().expect("addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("default addr")
        );
        assert_eq!(
            settings.pool_config().database_url(),
            "postgres://localhost/fest"
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load(&[
            ("FEST_DATABASE_URL", "postgres://db/fest"),
            ("FEST_BIND_ADDR", "127.0.0.1:9000"),
            ("FEST_POOL_MAX_SIZE", "4"),
            ("FEST_RUN_MIGRATIONS", "false"),
        ])
        .expect("settings");

        assert!(!settings.run_migrations());
        assert_eq!(settings.pool_max_size, Some(4));
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("addr")
        );
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    fn migrations_run_unless_disabled(#[case] flag: Option<&str>, #[case] expected: bool) {
        let mut vars = vec![("FEST_DATABASE_URL", "postgres://db/fest")];
        vars.extend(flag.map(|value| ("FEST_RUN_MIGRATIONS", value)));
        let settings = load(&vars).expect("settings");
        assert_eq!(settings.run_migrations(), expected);
    }

    #[rstest]
    fn missing_database_url_is_an_error() {
        assert!(load(&[]).is_err());
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = load(&[
            ("FEST_DATABASE_URL", "postgres://db/fest"),
            ("FEST_BIND_ADDR", "not-an-address"),
        ])
        .expect("settings");
        assert!(settings.bind_addr().is_err());
    }
}
