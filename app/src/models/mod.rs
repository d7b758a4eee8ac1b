pub mod todos;

pub use todos::Todo;
