use anyhow::Result;
use std::path::PathBuf;

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("movie-catalog");

        Ok(Self::with_base(base_dir))
    }

    /// Lay out all paths under an explicit directory
    pub fn with_base(base_dir: PathBuf) -> Self {
        Self {
            log_dir: base_dir.join("logs"),
            config_dir: base_dir,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("movie-catalog.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory when the platform has no config dir
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".movie-catalog")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_under_base() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().join("catalog"));

        assert_eq!(paths.config_file(), dir.path().join("catalog/config.toml"));
        assert_eq!(paths.log_file(), dir.path().join("catalog/logs/movie-catalog.log"));

        paths.ensure_directories().unwrap();
        assert!(dir.path().join("catalog").is_dir());
        assert!(dir.path().join("catalog/logs").is_dir());
    }
}
