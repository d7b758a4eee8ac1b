//! Configuration
//!
//! Configuration is read from the process environment after `.env` files
//! have been loaded. Each concern has its own typed struct built with
//! `from_env()` or a builder, and is handed to whoever needs it.
//!
//! ```rust,no_run
//! use web::{Config, ServerConfig};
//!
//! let env = Config::init(std::path::Path::new("."));
//! let server = ServerConfig::from_env();
//! println!("{} on port {}", env, server.port);
//! ```

pub mod env;
pub mod providers;

pub use env::{env, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, AppConfigBuilder, ServerConfig, ServerConfigBuilder};

use std::path::Path;

/// Entry point for loading configuration
pub struct Config;

impl Config {
    /// Load `.env` files from `project_root` and return the detected environment
    ///
    /// Call this once at startup, before building any config struct.
    pub fn init(project_root: &Path) -> Environment {
        env::load_dotenv(project_root)
    }
}
