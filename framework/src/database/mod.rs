//! Database support built on SeaORM
//!
//! ```rust,ignore
//! use web::database::{DatabaseConfig, DbConnection};
//!
//! let conn = DbConnection::connect(&DatabaseConfig::from_env()).await?;
//! let todos = todos::Entity::find().all(conn.inner()).await?;
//! ```
//!
//! The connection is an explicit value: build it once at startup and hand
//! clones to repositories.

pub mod config;
pub mod connection;
pub mod pagination;

pub use config::{DatabaseConfig, DatabaseConfigBuilder};
pub use connection::DbConnection;
pub use pagination::Page;

// Re-export sea_orm for applications that only depend on the framework
pub use sea_orm;
