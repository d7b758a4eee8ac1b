use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;
use sea_orm_migration::MigratorTrait;

/// Isolated database for a single test
///
/// Each instance is a fresh in-memory SQLite database with every migration
/// of `M` applied. Nothing is shared between instances.
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn stores_todos() {
///     let db = TestDatabase::fresh::<Migrator>().await.unwrap();
///     let repo = SeaOrmTodoRepository::new(db.conn());
///     // ...
/// }
/// ```
pub struct TestDatabase {
    conn: DbConnection,
}

impl TestDatabase {
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .logging(false)
            .build();
        let conn = DbConnection::connect(&config).await?;
        M::up(conn.inner(), None).await?;
        Ok(Self { conn })
    }

    /// Clone of the connection handle
    pub fn conn(&self) -> DbConnection {
        self.conn.clone()
    }
}
