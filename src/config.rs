use crate::error::{BadEnvVarSnafu, ParsePortSnafu, RosterResult, UnknownStorageSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: String,
    storage: StorageConfig,
}

#[derive(Clone, Debug)]
pub enum StorageConfig {
    Postgres(Arc<DbConfig>),
    Memory,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        let server_ip = var("ROSTER_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());
        let storage = var("ROSTER_STORAGE").unwrap_or_else(|_| "postgres".to_string());

        Ok(Self {
            server_ip,
            storage: StorageConfig::from_name(&storage)?,
        })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}

impl StorageConfig {
    fn from_name(name: &str) -> RosterResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres(Arc::new(DbConfig::new()?))),
            "memory" => Ok(Self::Memory),
            _ => UnknownStorageSnafu { found: name }.fail(),
        }
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
}

impl DbConfig {
    pub fn new() -> RosterResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?.parse().context(ParsePortSnafu)?,
            database: get_env_var("DB_NAME")?,
        })
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }
}
