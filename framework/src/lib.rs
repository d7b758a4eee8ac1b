//! A small HTTP framework: hyper server, matchit routing, middleware,
//! `.env` configuration, SeaORM connections and test helpers.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;

pub use app::{init_tracing, Application};
pub use config::{env, AppConfig, Config, Environment, ServerConfig};
pub use database::{DatabaseConfig, DbConnection, Page};
pub use error::{AppError, FrameworkError, HttpError, ValidationErrors};
pub use crate::http::{HttpResponse, Request, Response};
pub use middleware::{Middleware, Next};
pub use routing::Router;
pub use server::Server;

// Re-exported so applications can implement `Middleware` and write queries
// without extra dependencies
pub use async_trait::async_trait;
pub use sea_orm;
pub use serde_json::json;
