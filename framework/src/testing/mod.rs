//! Testing utilities
//!
//! - `expect!` for fluent assertions with expected/received output
//! - `TestDatabase` for an isolated, migrated in-memory database
//! - `TestClient` for driving a `Server` without a socket
//!
//! ```rust,ignore
//! use web::expect;
//! use web::testing::{TestClient, TestDatabase};
//!
//! #[tokio::test]
//! async fn lists_todos() {
//!     let db = TestDatabase::fresh::<Migrator>().await.unwrap();
//!     let client = TestClient::new(build_server(db.conn()));
//!
//!     let res = client.get("/api/v1/todos/all").await;
//!     expect!(res.status).to_equal(200);
//! }
//! ```

mod client;
mod database;
mod expect;

pub use client::{TestClient, TestResponse};
pub use database::TestDatabase;
pub use expect::Expect;
