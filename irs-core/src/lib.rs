pub mod db;
pub mod models;

pub use db::repository::{IrsRepository, RepositoryError};
pub use models::*;
