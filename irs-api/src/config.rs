use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use irs_core::db::DbConfig;
use irs_db_mysql::StoreConfig;

/// HTTP service exposing synthetic IRS data.
///
/// Every option can also be set through the environment variable shown in
/// `--help`; command-line flags win.
#[derive(Debug, Clone, Parser)]
#[command(name = "irs-api", version, about, long_about = None)]
pub struct ApiConfig {
    /// Database backend to use (`mysql` or `sqlite`).
    #[arg(long, env = "IRS_DB_BACKEND", default_value = "mysql")]
    pub backend: String,

    #[arg(long, env = "MYSQL_HOST", default_value = "mysql-db")]
    pub db_host: String,

    #[arg(long, env = "MYSQL_USER", default_value = "irs_user")]
    pub db_user: String,

    #[arg(long, env = "MYSQL_PASSWORD", default_value = "password123", hide_env_values = true)]
    pub db_password: String,

    #[arg(long, env = "MYSQL_DATABASE", default_value = "irs_data")]
    pub db_name: String,

    /// SQLite database file, or `:memory:`. Only read by the sqlite backend.
    #[arg(long, env = "IRS_SQLITE_PATH", default_value = "irs_data.db")]
    pub sqlite_path: String,

    /// Address the HTTP listener binds to.
    #[arg(long, env = "IRS_BIND_ADDR", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Seed for the record generator. Each seeding request restarts from
    /// this seed; omit it for fresh random data.
    #[arg(long, env = "IRS_RNG_SEED")]
    pub rng_seed: Option<u64>,

    /// Also append log records to this file.
    #[arg(long, env = "IRS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ApiConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.db_host.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
        }
    }

    /// Connection settings for the [`irs_core::db::RepositoryRegistry`].
    ///
    /// Unknown backends are passed through so the registry can reject them
    /// with the list of available ones.
    pub fn db_config(&self) -> DbConfig {
        let connection_string = match self.backend.as_str() {
            "sqlite" => self.sqlite_path.clone(),
            _ => self.store_config().connection_string(),
        };
        DbConfig {
            backend: self.backend.clone(),
            connection_string,
        }
    }
}
