pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

pub use app::AppState;
pub use config::ApiConfig;
pub use routes::router;
