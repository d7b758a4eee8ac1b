//! Todo listing configuration

use web::env;

/// Defaults and limits for the paginated listing
///
/// ```env
/// TODOS_DEFAULT_PAGE_SIZE=5
/// TODOS_MAX_PAGE_SIZE=100
/// TODOS_DEFAULT_SORT=completed
/// ```
#[derive(Debug, Clone)]
pub struct TodoConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub default_sort: String,
}

impl TodoConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            default_page_size: env("TODOS_DEFAULT_PAGE_SIZE", 5),
            max_page_size: env("TODOS_MAX_PAGE_SIZE", 100),
            default_sort: env("TODOS_DEFAULT_SORT", "completed".to_string()),
        }
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 100,
            default_sort: "completed".to_string(),
        }
    }
}
