use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr, EntityTrait, PaginatorTrait, QueryOrder};
use std::str::FromStr;
use web::{DbConnection, Page};

use crate::models::todos::{self, Todo};

/// Column a page of todos is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Description,
    Completed,
}

impl SortField {
    fn column(self) -> todos::Column {
        match self {
            Self::Id => todos::Column::Id,
            Self::Title => todos::Column::Title,
            Self::Description => todos::Column::Description,
            Self::Completed => todos::Column::Completed,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "completed" => Ok(Self::Completed),
            other => Err(other.to_string()),
        }
    }
}

/// Zero-based page index, page size and sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: SortField,
}

/// Persistence primitives for todos
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Every todo, ordered by id
    async fn list_all(&self) -> Result<Vec<Todo>, DbErr>;

    /// One page, ordered by the sort column with id as tie-break
    async fn list_page(&self, request: PageRequest) -> Result<Page<Todo>, DbErr>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DbErr>;

    /// Insert when `id` is not set, update otherwise
    async fn save(&self, todo: todos::ActiveModel) -> Result<Todo, DbErr>;

    /// Returns `false` when no row had that id
    async fn delete_by_id(&self, id: i64) -> Result<bool, DbErr>;
}

pub struct SeaOrmTodoRepository {
    db: DbConnection,
}

impl SeaOrmTodoRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for SeaOrmTodoRepository {
    async fn list_all(&self) -> Result<Vec<Todo>, DbErr> {
        todos::Entity::find()
            .order_by_asc(todos::Column::Id)
            .all(self.db.inner())
            .await
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<Todo>, DbErr> {
        let paginator = todos::Entity::find()
            .order_by_asc(request.sort.column())
            .order_by_asc(todos::Column::Id)
            .paginate(self.db.inner(), request.size);

        let total = paginator.num_items().await?;
        let content = paginator.fetch_page(request.page).await?;

        Ok(Page::new(content, request.page, request.size, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DbErr> {
        todos::Entity::find_by_id(id).one(self.db.inner()).await
    }

    async fn save(&self, todo: todos::ActiveModel) -> Result<Todo, DbErr> {
        match todo.id {
            ActiveValue::NotSet => todo.insert(self.db.inner()).await,
            _ => todo.update(self.db.inner()).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbErr> {
        let result = todos::Entity::delete_by_id(id)
            .exec(self.db.inner())
            .await?;
        Ok(result.rows_affected > 0)
    }
}
