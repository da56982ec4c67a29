//! Database module
//!
//! Connection management, repositories and the service facade.

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used types
pub use connection::{create_lazy_pool, create_pool, DatabaseConfig, DatabasePool};
pub use service::DatabaseService;
