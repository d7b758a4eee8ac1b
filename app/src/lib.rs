//! Todo REST service: entity, migrations, repository, service, handlers
//! and routes under `/api/v1/todos`.

pub mod config;
pub mod controllers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

use std::sync::Arc;
use web::{DbConnection, Router};

use config::TodoConfig;
use repositories::SeaOrmTodoRepository;
use services::TodoService;

/// Wire repository, service and routes over a connection
pub fn build_router(db: DbConnection, config: TodoConfig) -> Router {
    let repository = Arc::new(SeaOrmTodoRepository::new(db));
    let service = Arc::new(TodoService::new(repository, config));
    routes::register(service)
}
