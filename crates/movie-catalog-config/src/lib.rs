pub mod config;
pub mod paths;

pub use config::{default_seed_movies, CatalogConfig, Config, LoggingConfig, SeedMovie, StagingConfig};
pub use paths::PathManager;
