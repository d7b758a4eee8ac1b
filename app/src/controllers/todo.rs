//! Todo HTTP handlers
//!
//! Every handler takes the service explicitly; `routes::register` binds it.

use serde::Deserialize;
use std::sync::Arc;
use web::{json, HttpResponse, Request, Response};

use crate::services::{StatusInput, TodoInput, TodoService};

/// Query string of the paginated listing; missing keys use configured defaults
#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    page: Option<u64>,
    size: Option<u64>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

/// GET /all
pub async fn all(service: Arc<TodoService>, _req: Request) -> Response {
    tracing::debug!("listing all todos");
    let todos = service.get_all().await?;
    HttpResponse::serialized(&todos)?.ok()
}

/// GET /all/pagination?page=0&size=5&sortBy=completed
pub async fn paginated(service: Arc<TodoService>, req: Request) -> Response {
    let query: PageQuery = req.query()?;
    let config = service.config();

    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(config.default_page_size);
    let sort_by = query
        .sort_by
        .unwrap_or_else(|| config.default_sort.clone());

    let todos = service.get_all_paginated(page, size, &sort_by).await?;
    HttpResponse::serialized(&todos)?.ok()
}

/// GET /{id}
pub async fn show(service: Arc<TodoService>, req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let todo = service.get_by_id(id).await?;
    HttpResponse::serialized(&todo)?.ok()
}

/// POST /create
pub async fn create(service: Arc<TodoService>, req: Request) -> Response {
    let input: TodoInput = req.input()?;
    let todo = service.save(input).await?;
    HttpResponse::serialized(&todo)?.status(201).ok()
}

/// PUT /{id}
pub async fn update(service: Arc<TodoService>, req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let input: TodoInput = req.input()?;
    let todo = service.edit_by_id(id, input).await?;
    HttpResponse::serialized(&todo)?.ok()
}

/// PATCH /{id}/status
pub async fn update_status(service: Arc<TodoService>, req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let input: StatusInput = req.input()?;
    let todo = service.update_status(id, input).await?;
    HttpResponse::serialized(&todo)?.ok()
}

/// DELETE /{id}
pub async fn destroy(service: Arc<TodoService>, req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    service.delete_by_id(id).await?;
    HttpResponse::json(json!({ "message": format!("Todo {} deleted", id) })).ok()
}
