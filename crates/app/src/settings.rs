//! Application settings.
//!
//! Layered lowest to highest: built-in defaults, the optional TOML file
//! (`config/finance.toml` unless `--config` says otherwise), `FINANCE_*`
//! environment variables (`FINANCE_STORE__BASE_URL`, ...), then CLI flags.

use std::time::Duration;

use clap::Parser;
use config::{Config, ConfigError, Environment, File, Map};
use engine::DEFAULT_NOTIFICATION_CAPACITY;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/finance.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
    /// Serve from a process-local store instead of `base_url`.
    pub in_memory: bool,
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            in_memory: false,
            base_url: "http://127.0.0.1:8080".to_string(),
            token: None,
            timeout_secs: Some(30),
        }
    }
}

impl Store {
    /// `0` disables the timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// Notifications kept for `GET /notifications`; older ones are dropped.
    pub notification_capacity: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

impl Server {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub store: Store,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "finance", about = "Personal finance dashboard API")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Use an empty in-memory record store (local demo).
    #[arg(long)]
    in_memory: bool,
    /// Record store base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Bearer token for the record store.
    #[arg(long, env = "FINANCE_STORE_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Record store request timeout in seconds, 0 for none.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Address the API binds to.
    #[arg(long)]
    bind: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        Self::load(args, None)
    }

    /// `env` replaces the process environment when given.
    fn load(args: Args, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let environment = Environment::with_prefix("FINANCE")
            .prefix_separator("_")
            .separator("__")
            .source(env);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if args.in_memory {
            settings.store.in_memory = true;
        }
        if let Some(base_url) = args.base_url {
            settings.store.base_url = base_url;
        }
        if let Some(token) = args.token {
            settings.store.token = Some(token);
        }
        if let Some(timeout) = args.timeout_secs {
            settings.store.timeout_secs = Some(timeout);
        }
        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(level) = args.level {
            settings.app.level = level;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["finance", "--config", "does/not/exist"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_without_file() {
        let settings = Settings::from_args(args(&[])).unwrap();
        assert_eq!(settings.server.addr(), "127.0.0.1:3000");
        assert_eq!(settings.store.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(settings.app.level, "info");
        assert!(!settings.store.in_memory);
        assert_eq!(
            settings.server.notification_capacity,
            DEFAULT_NOTIFICATION_CAPACITY
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let env = Map::from([
            (
                "FINANCE_STORE__BASE_URL".to_string(),
                "http://records.internal:9000".to_string(),
            ),
            ("FINANCE_SERVER__PORT".to_string(), "9001".to_string()),
            (
                "FINANCE_SERVER__NOTIFICATION_CAPACITY".to_string(),
                "5".to_string(),
            ),
            ("OTHER_SERVER__PORT".to_string(), "1".to_string()),
        ]);
        let settings = Settings::load(args(&[]), Some(env.clone())).unwrap();
        assert_eq!(settings.store.base_url, "http://records.internal:9000");
        assert_eq!(settings.server.port, 9001);
        assert_eq!(settings.server.notification_capacity, 5);

        let settings = Settings::load(args(&["--port", "8088"]), Some(env)).unwrap();
        assert_eq!(settings.server.port, 8088);
    }

    #[test]
    fn cli_overrides_win() {
        let settings = Settings::from_args(args(&[
            "--base-url",
            "https://records.example.com/v1",
            "--port",
            "8088",
            "--timeout-secs",
            "0",
            "--level",
            "debug",
            "--in-memory",
        ]))
        .unwrap();
        assert_eq!(settings.store.base_url, "https://records.example.com/v1");
        assert_eq!(settings.server.port, 8088);
        assert_eq!(settings.store.timeout(), None);
        assert_eq!(settings.app.level, "debug");
        assert!(settings.store.in_memory);
    }
}
