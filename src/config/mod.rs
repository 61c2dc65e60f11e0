mod loader;
mod types;

pub use loader::{ConfigError, MAX_PAGE_SIZE};
pub use types::{ApiConfig, CacheConfig, Config, LoggingConfig, PagingConfig, UiConfig};
