use sqlx::ConnectOptions;
use sqlx::mysql::MySqlConnectOptions;

/// Connection parameters for the MySQL store.
///
/// The service reads these once at startup and renders them into the
/// connection string handed to [`crate::MySqlRepositoryFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "mysql-db".to_string(),
            user: "irs_user".to_string(),
            password: "password123".to_string(),
            database: "irs_data".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// `mysql://` URL with user and password percent-encoded.
    pub fn connection_string(&self) -> String {
        self.connect_options().to_url_lossy().to_string()
    }
}
