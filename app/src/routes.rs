use std::future::Future;
use std::sync::Arc;
use web::{Request, Response, Router};

use crate::controllers::todo;
use crate::services::TodoService;

/// Build the `/api/v1/todos` routes around a shared service
pub fn register(service: Arc<TodoService>) -> Router {
    Router::new()
        .group("/api/v1/todos", |r| {
            r.get("/all", with(&service, todo::all))
                .get("/all/pagination", with(&service, todo::paginated))
                .post("/create", with(&service, todo::create))
                .get("/{id}", with(&service, todo::show))
                .put("/{id}", with(&service, todo::update))
                .delete("/{id}", with(&service, todo::destroy))
                .patch("/{id}/status", with(&service, todo::update_status))
        })
        .into()
}

/// Bind the service to a handler so the router sees `Fn(Request)`
fn with<H, Fut>(service: &Arc<TodoService>, handler: H) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    H: Fn(Arc<TodoService>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let service = Arc::clone(service);
    move |req| handler(Arc::clone(&service), req)
}
