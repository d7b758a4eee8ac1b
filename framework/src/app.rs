//! Application runner
//!
//! Parses the command line, loads configuration, sets up logging and the
//! database pool, then serves HTTP or runs a migration command.
//!
//! # Example
//!
//! ```rust,ignore
//! use web::Application;
//!
//! #[tokio::main]
//! async fn main() {
//!     Application::new()
//!         .routes(routes::build)
//!         .middleware(LoggingMiddleware)
//!         .migrations::<migrations::Migrator>()
//!         .run()
//!         .await;
//! }
//! ```

use crate::config::{AppConfig, Config, ServerConfig};
use crate::database::{DatabaseConfig, DbConnection};
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::{Router, Server};
use clap::{Parser, Subcommand};
use sea_orm_migration::{MigrationTrait, MigratorTrait};
use std::marker::PhantomData;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

type RoutesFn = Box<dyn FnOnce(DbConnection) -> Router + Send>;

#[derive(Parser)]
#[command(name = "todo-app")]
#[command(about = "Todo service and database utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the web server (default command)
    Serve {
        /// Skip running migrations on startup
        #[arg(long)]
        no_migrate: bool,
    },
    /// Run pending database migrations
    Migrate,
    /// Show migration status
    #[command(name = "migrate:status")]
    MigrateStatus,
    /// Rollback the last migration(s)
    #[command(name = "migrate:rollback")]
    MigrateRollback {
        /// Number of migrations to rollback
        #[arg(default_value = "1")]
        steps: u32,
    },
    /// Drop all tables and re-run all migrations
    #[command(name = "migrate:fresh")]
    MigrateFresh,
}

/// Application builder
pub struct Application<M = NoMigrator>
where
    M: MigratorTrait,
{
    routes_fn: Option<RoutesFn>,
    middleware: MiddlewareRegistry,
    _migrator: PhantomData<M>,
}

/// Placeholder type for when no migrator is configured
pub struct NoMigrator;

impl MigratorTrait for NoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![]
    }
}

impl Application<NoMigrator> {
    pub fn new() -> Self {
        Application {
            routes_fn: None,
            middleware: MiddlewareRegistry::new(),
            _migrator: PhantomData,
        }
    }
}

impl Default for Application<NoMigrator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Application<M>
where
    M: MigratorTrait,
{
    /// Register the function that builds the router
    ///
    /// It receives the connection pool so it can wire repositories and
    /// services before handing them to the routes.
    pub fn routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DbConnection) -> Router + Send + 'static,
    {
        self.routes_fn = Some(Box::new(f));
        self
    }

    /// Add global middleware to the server
    pub fn middleware<T: Middleware + 'static>(mut self, middleware: T) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    /// Configure the migrator type for database migrations
    pub fn migrations<NewM>(self) -> Application<NewM>
    where
        NewM: MigratorTrait,
    {
        Application {
            routes_fn: self.routes_fn,
            middleware: self.middleware,
            _migrator: PhantomData,
        }
    }

    /// Run the application
    ///
    /// Exits the process with status 1 when the selected command fails.
    pub async fn run(self) {
        let cli = Cli::parse();

        let environment = Config::init(Path::new("."));
        let app_config = AppConfig::from_env();
        init_tracing(&app_config.log_filter);

        tracing::info!(
            app = %app_config.name,
            env = %environment,
            debug = app_config.debug,
            "starting"
        );

        if let Err(err) = self.execute(cli.command).await {
            tracing::error!(error = %err, "command failed");
            std::process::exit(1);
        }
    }

    async fn execute(self, command: Option<Commands>) -> Result<(), BoxError> {
        let db = DbConnection::connect(&DatabaseConfig::from_env()).await?;

        match command.unwrap_or(Commands::Serve { no_migrate: false }) {
            Commands::Serve { no_migrate } => {
                if !no_migrate {
                    // A failed migration is reported but does not stop the server
                    if let Err(err) = M::up(db.inner(), None).await {
                        tracing::warn!(error = %err, "migration failed");
                    }
                }
                self.serve(db).await
            }
            Commands::Migrate => {
                tracing::info!("running migrations");
                M::up(db.inner(), None).await?;
                tracing::info!("migrations completed");
                Ok(())
            }
            Commands::MigrateStatus => {
                M::status(db.inner()).await?;
                Ok(())
            }
            Commands::MigrateRollback { steps } => {
                tracing::info!(steps, "rolling back migrations");
                M::down(db.inner(), Some(steps)).await?;
                tracing::info!("rollback completed");
                Ok(())
            }
            Commands::MigrateFresh => {
                tracing::warn!("dropping all tables and re-running migrations");
                M::fresh(db.inner()).await?;
                tracing::info!("database refreshed");
                Ok(())
            }
        }
    }

    async fn serve(self, db: DbConnection) -> Result<(), BoxError> {
        let router = match self.routes_fn {
            Some(routes_fn) => routes_fn(db),
            None => Router::new(),
        };

        Server::new(router, ServerConfig::from_env())
            .with_registry(self.middleware)
            .run()
            .await
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Commands> {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn serve_is_the_default() {
        assert_eq!(parse(&["todo-app"]), None);
        assert_eq!(
            parse(&["todo-app", "serve", "--no-migrate"]),
            Some(Commands::Serve { no_migrate: true })
        );
    }

    #[test]
    fn migration_commands_use_colon_names() {
        assert_eq!(parse(&["todo-app", "migrate"]), Some(Commands::Migrate));
        assert_eq!(
            parse(&["todo-app", "migrate:status"]),
            Some(Commands::MigrateStatus)
        );
        assert_eq!(
            parse(&["todo-app", "migrate:rollback"]),
            Some(Commands::MigrateRollback { steps: 1 })
        );
        assert_eq!(
            parse(&["todo-app", "migrate:rollback", "3"]),
            Some(Commands::MigrateRollback { steps: 3 })
        );
        assert_eq!(
            parse(&["todo-app", "migrate:fresh"]),
            Some(Commands::MigrateFresh)
        );
    }
}
