mod todo_repository;

pub use todo_repository::{PageRequest, SeaOrmTodoRepository, SortField, TodoRepository};
