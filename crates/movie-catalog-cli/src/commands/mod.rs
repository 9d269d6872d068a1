pub mod config;
pub mod prompts;
pub mod render;
pub mod replay;
pub mod session;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_catalog_config::Config;
use movie_catalog_core::{CatalogStore, ImageStaging};

/// Fresh store and staging area for one run, seeded from config unless asked not to
pub fn open_catalog(config: &Config, no_seed: bool) -> Result<(CatalogStore, ImageStaging)> {
    let store = if no_seed {
        CatalogStore::new()
    } else {
        CatalogStore::from_movies(config.seed_movies())
            .map_err(|e| eyre!("Invalid seed catalog: {}", e))?
    };
    let staging = ImageStaging::new(config.staging.max_image_bytes);
    Ok((store, staging))
}
