use movie_catalog_models::{ImageRef, Movie, MovieId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths::PathManager;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub staging: StagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Start every session with the built-in sample films
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Extra films loaded after the samples
    #[serde(default)]
    pub seed: Vec<SeedMovie>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedMovie {
    pub title: String,
    pub genre: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub watched: bool,
    #[serde(default)]
    pub in_watchlist: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StagingConfig {
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Unset means JSON whenever stdout is not a terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    /// Write logs to the default log file under the config directory
    #[serde(default)]
    pub to_file: bool,
    /// Explicit log file; takes precedence over `to_file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_max_image_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}


impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_defaults: default_true(),
            seed: Vec::new(),
        }
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            to_file: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// The configured format, or JSON when stdout is not a terminal
    pub fn json_enabled(&self) -> bool {
        use std::io::IsTerminal;
        self.json.unwrap_or_else(|| !std::io::stdout().is_terminal())
    }

    /// Where logs go; `None` means stderr
    pub fn log_path(&self, paths: &PathManager) -> Option<PathBuf> {
        match &self.file {
            Some(file) => Some(file.clone()),
            None if self.to_file => Some(paths.log_file()),
            None => None,
        }
    }
}

/// The sample films every fresh session starts with
pub fn default_seed_movies() -> Vec<SeedMovie> {
    let sample = |title: &str, genre: &str, year: i32, image: &str| SeedMovie {
        title: title.to_string(),
        genre: genre.to_string(),
        year,
        image: Some(image.to_string()),
        watched: false,
        in_watchlist: false,
    };

    vec![
        sample("Avengers: Endgame", "Action", 2019, "/images/avengers.jpg"),
        sample("Inception", "Sci-Fi", 2010, "/images/inception.jpg"),
        sample("The Dark Knight", "Action", 2008, "/images/dark-knight.jpg"),
    ]
}

impl SeedMovie {
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            genre: self.genre,
            year: self.year,
            watched: self.watched,
            in_watchlist: self.in_watchlist,
            image: self.image.map(ImageRef::new),
            image_file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.staging.max_image_bytes == 0 {
            return Err(anyhow::anyhow!("staging.max_image_bytes must be greater than zero"));
        }

        for (index, seed) in self.catalog.seed.iter().enumerate() {
            if seed.title.trim().is_empty() {
                return Err(anyhow::anyhow!("catalog.seed[{}] has an empty title", index));
            }
            if seed.genre.trim().is_empty() {
                return Err(anyhow::anyhow!(
                    "catalog.seed[{}] ('{}') has an empty genre",
                    index,
                    seed.title
                ));
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!("Invalid logging.level: {}", self.logging.level));
        }

        Ok(())
    }

    /// Seed records in load order, numbered from 1
    pub fn seed_movies(&self) -> Vec<Movie> {
        let defaults = if self.catalog.seed_defaults {
            default_seed_movies()
        } else {
            Vec::new()
        };

        defaults
            .into_iter()
            .chain(self.catalog.seed.iter().cloned())
            .zip(1u64..)
            .map(|(seed, id)| seed.into_movie(MovieId(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn extra_seed() -> SeedMovie {
        SeedMovie {
            title: "Dune".to_string(),
            genre: "Sci-Fi".to_string(),
            year: 2021,
            image: None,
            watched: true,
            in_watchlist: true,
        }
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.catalog.seed.push(extra_seed());
        config.staging.max_image_bytes = 2048;
        config.logging.level = "debug".to_string();

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.catalog.seed_defaults);
        assert_eq!(loaded.catalog.seed, vec![extra_seed()]);
        assert_eq!(loaded.staging.max_image_bytes, 2048);
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.catalog.seed_defaults);
        assert!(config.catalog.seed.is_empty());
        assert_eq!(config.staging.max_image_bytes, 10 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_seed_entries() {
        let config: Config = toml::from_str(
            r#"
            [catalog]
            seed_defaults = false

            [[catalog.seed]]
            title = "Parasite"
            genre = "Thriller"
            year = 2019
            in_watchlist = true
            "#,
        )
        .unwrap();

        let movies = config.seed_movies();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, MovieId(1));
        assert_eq!(movies[0].title, "Parasite");
        assert!(movies[0].in_watchlist);
        assert!(!movies[0].watched);
        assert_eq!(movies[0].image, None);
    }

    #[test]
    fn test_seed_movies_numbers_defaults_then_extras() {
        let mut config = Config::default();
        config.catalog.seed.push(extra_seed());

        let movies = config.seed_movies();
        let ids: Vec<u64> = movies.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(movies[0].title, "Avengers: Endgame");
        assert_eq!(movies[1].image, Some(ImageRef::new("/images/inception.jpg")));
        assert_eq!(movies[3].title, "Dune");
        assert!(movies[3].watched);
    }

    #[test]
    fn test_default_config_leaves_log_format_undecided() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        Config::default().save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("json"));
        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.logging.json, None);

        let explicit: Config = toml::from_str("[logging]\njson = false\n").unwrap();
        assert_eq!(explicit.logging.json, Some(false));
        assert!(!explicit.logging.json_enabled());
    }

    #[test]
    fn test_log_path_resolution() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.log_path(&paths), None);

        logging.to_file = true;
        assert_eq!(logging.log_path(&paths), Some(paths.log_file()));

        logging.file = Some(PathBuf::from("/tmp/catalog.log"));
        assert_eq!(logging.log_path(&paths), Some(PathBuf::from("/tmp/catalog.log")));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.staging.max_image_bytes = 0;
        assert!(config.validate().is_err());
        config.staging.max_image_bytes = 1024;

        let mut blank = extra_seed();
        blank.genre = "  ".to_string();
        config.catalog.seed.push(blank);
        assert!(config.validate().is_err());
        config.catalog.seed.clear();

        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
