mod todo_service;

pub use todo_service::{StatusInput, TodoError, TodoInput, TodoService};
