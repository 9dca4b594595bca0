use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Optional side listener for `/healthz` and `/metrics`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Start with the two demo students (ids 1 and 2).
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self { Self { seed: default_seed() } }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8000 }
fn default_seed() -> bool { true }
fn default_log_format() -> String { "compact".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read the config file, falling back to environment variables when it is absent.
    pub fn load_or_env() -> Result<Self> {
        Self::load_from_path_or_env(&config_path())
    }

    /// Only a missing file falls back to the environment; unreadable or invalid files are errors.
    pub fn load_from_path_or_env(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("cannot load config file {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        cfg.admin.addr = std::env::var("ADMIN_ADDR").ok().filter(|a| !a.trim().is_empty());
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.logging.normalize();
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        let f = self.format.trim().to_ascii_lowercase();
        self.format = if f == "json" { f } else { default_log_format() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg = parse("").expect("parse empty");
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8000");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(cfg.directory.seed);
        assert!(cfg.admin.addr.is_none());
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn full_document_is_read() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [admin]
            addr = "127.0.0.1:9100"

            [directory]
            seed = false

            [logging]
            format = "JSON"
            "#,
        )
        .expect("parse");
        let mut cfg = cfg;
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.admin.addr.as_deref(), Some("127.0.0.1:9100"));
        assert!(!cfg.directory.seed);
        assert_eq!(cfg.logging.format, "json");
    }

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("configs_{}_{}.toml", std::process::id(), name));
        std::fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = write_temp("malformed", "[server]\nport = \"not a number\"\n\n[directory]\nseed = false\n");
        let res = AppConfig::load_from_path_or_env(path.to_str().expect("utf8 path"));
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn load_or_env_reports_invalid_file_from_config_path() {
        let path = write_temp("config_path", "this is = = not toml");
        std::env::set_var("CONFIG_PATH", &path);
        let res = AppConfig::load_or_env();
        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_environment() {
        let path = std::env::temp_dir().join(format!("configs_{}_absent.toml", std::process::id()));
        let cfg = AppConfig::load_from_path_or_env(path.to_str().expect("utf8 path")).expect("fallback");
        assert_eq!(cfg.server.worker_threads.map(|w| w > 0), Some(true));
        assert!(cfg.directory.seed);
    }

    #[test]
    fn valid_file_is_read_from_disk() {
        let path = write_temp("valid", "[directory]\nseed = false\n");
        let res = AppConfig::load_from_path_or_env(path.to_str().expect("utf8 path"));
        let _ = std::fs::remove_file(&path);
        assert!(!res.expect("valid config").directory.seed);
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nport = 0\n").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_host_and_zero_workers_are_filled() {
        let mut cfg = parse("[server]\nhost = \"  \"\nworker_threads = 0\n").expect("parse");
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
