use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub resources: ResourcesConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub workers: Option<usize>,
}

// On-disk locations the site serves from and writes to
#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    pub static_root: String,
    pub log_file: String,
    pub msg_file: Option<String>,
    pub capture_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SITE").separator("__"))
            .set_default("server.bind_addr", "127.0.0.1:8080")?
            .set_default("resources.static_root", "site")?
            .set_default("resources.log_file", "logs/access.log")?
            .set_default("resources.capture_dir", "data/captures")?
            .set_default("database.host", "127.0.0.1")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "siteserver")?
            .set_default("database.password", "")?
            .set_default("database.dbname", "siteserver")?
            .set_default(
                "search.endpoint",
                "https://www.googleapis.com/customsearch/v1",
            )?
            .set_default("search.api_key", "")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {e}", self.server.bind_addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let cfg = Config::load().expect("default config should load");
        assert_eq!(cfg.performance.read_timeout, 30);
        assert_eq!(cfg.performance.write_timeout, 30);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.database.port, 5432);
        assert!(cfg.resources.msg_file.is_none());
    }

    #[test]
    fn test_socket_addr_parsing() {
        let mut cfg = Config::load().unwrap();
        cfg.server.bind_addr = "0.0.0.0:9090".to_string();
        assert!(cfg.get_socket_addr().is_ok());

        cfg.server.bind_addr = "not-an-addr".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
