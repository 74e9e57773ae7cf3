pub mod env;
mod loader;

pub use env::{AppConfig, CacheConfig, DirectoryConfig, GitHubConfig};
pub use loader::load_config;
