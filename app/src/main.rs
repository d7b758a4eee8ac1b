use todo_app::config::TodoConfig;
use todo_app::middleware::LoggingMiddleware;
use todo_app::migrations::Migrator;
use web::Application;

#[tokio::main]
async fn main() {
    Application::new()
        .routes(|db| todo_app::build_router(db, TodoConfig::from_env()))
        .middleware(LoggingMiddleware)
        .migrations::<Migrator>()
        .run()
        .await;
}
