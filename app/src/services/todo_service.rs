use sea_orm::{DbErr, Set};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationError};
use web::{FrameworkError, HttpError, HttpResponse, Page, ValidationErrors};

use crate::config::TodoConfig;
use crate::models::todos::{self, Todo};
use crate::repositories::{PageRequest, SortField, TodoRepository};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("The given data was invalid.")]
    Validation(ValidationErrors),

    #[error("Todo {id} not found")]
    NotFound { id: i64 },

    #[error("Invalid sort field '{0}'")]
    InvalidSort(String),

    #[error("Page size must be between 1 and {max}, got {size}")]
    InvalidPageSize { size: u64, max: u64 },

    #[error("Page index {page} is out of range")]
    InvalidPage { page: u64 },

    #[error("{action}")]
    Storage {
        action: &'static str,
        #[source]
        source: DbErr,
    },
}

impl HttpError for TodoError {
    fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::NotFound { .. } => 404,
            Self::InvalidSort(_) | Self::InvalidPageSize { .. } | Self::InvalidPage { .. } => 400,
            Self::Storage { .. } => 500,
        }
    }
}

impl From<TodoError> for FrameworkError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(errors) => FrameworkError::Validation(errors),
            other => FrameworkError::from_http_error(&other),
        }
    }
}

impl From<TodoError> for HttpResponse {
    fn from(err: TodoError) -> Self {
        HttpResponse::from(FrameworkError::from(err))
    }
}

/// Body of create and full update requests
///
/// A missing `title` decodes as empty and fails validation; a missing
/// `completed` means `false`. Unknown fields such as `id` are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TodoInput {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "The title field is required."),
        length(max = 255, message = "The title may not be greater than 255 characters.")
    )]
    pub title: String,

    #[validate(length(
        min = 5,
        max = 800,
        message = "The description must be between 5 and 800 characters."
    ))]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

/// Body of a status patch
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StatusInput {
    #[validate(required(message = "The completed field is required."))]
    pub completed: Option<bool>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validated<T: Validate>(input: T) -> Result<T, TodoError> {
    input
        .validate()
        .map_err(|e| TodoError::Validation(e.into()))?;
    Ok(input)
}

/// Log a storage failure and wrap it with the action that failed
fn storage(action: &'static str) -> impl FnOnce(DbErr) -> TodoError {
    move |source| {
        tracing::error!(error = %source, "{}", action);
        TodoError::Storage { action, source }
    }
}

pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    config: TodoConfig,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>, config: TodoConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &TodoConfig {
        &self.config
    }

    pub async fn get_all(&self) -> Result<Vec<Todo>, TodoError> {
        self.repository
            .list_all()
            .await
            .map_err(storage("Error getting all todos"))
    }

    pub async fn get_all_paginated(
        &self,
        page: u64,
        size: u64,
        sort_by: &str,
    ) -> Result<Page<Todo>, TodoError> {
        let sort: SortField = sort_by.parse().map_err(TodoError::InvalidSort)?;

        let max = self.config.max_page_size;
        if size == 0 || size > max {
            return Err(TodoError::InvalidPageSize { size, max });
        }

        // The row offset must fit a signed 64-bit SQL OFFSET
        let offset = page.checked_mul(size).filter(|o| *o <= i64::MAX as u64);
        if offset.is_none() {
            return Err(TodoError::InvalidPage { page });
        }

        self.repository
            .list_page(PageRequest { page, size, sort })
            .await
            .map_err(storage("Error getting todos with pagination"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(storage("Error getting todo"))?
            .ok_or(TodoError::NotFound { id })
    }

    pub async fn save(&self, input: TodoInput) -> Result<Todo, TodoError> {
        let input = validated(normalize(input))?;

        let todo = todos::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            completed: Set(input.completed),
            ..Default::default()
        };

        let created = self
            .repository
            .save(todo)
            .await
            .map_err(storage("Error creating todo"))?;
        tracing::info!(id = created.id, "todo created");
        Ok(created)
    }

    /// Overwrite every field of an existing todo
    ///
    /// Never creates a record; an unknown id is `NotFound`.
    pub async fn edit_by_id(&self, id: i64, input: TodoInput) -> Result<Todo, TodoError> {
        let input = validated(normalize(input))?;
        let existing = self.get_by_id(id).await?;

        let mut todo: todos::ActiveModel = existing.into();
        todo.title = Set(input.title);
        todo.description = Set(input.description);
        todo.completed = Set(input.completed);

        self.repository
            .save(todo)
            .await
            .map_err(storage("Error updating todo"))
    }

    /// Change only the `completed` flag
    pub async fn update_status(&self, id: i64, input: StatusInput) -> Result<Todo, TodoError> {
        let input = validated(input)?;
        let existing = self.get_by_id(id).await?;

        let mut todo: todos::ActiveModel = existing.into();
        todo.completed = Set(input.completed.unwrap_or_default());

        self.repository
            .save(todo)
            .await
            .map_err(storage("Error updating todo status"))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), TodoError> {
        let deleted = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(storage("Error deleting todo"))?;

        if !deleted {
            return Err(TodoError::NotFound { id });
        }
        tracing::info!(id, "todo deleted");
        Ok(())
    }
}

fn normalize(mut input: TodoInput) -> TodoInput {
    input.title = input.title.trim().to_string();
    input
}
