use movie_catalog_models::{ImageFile, ImageRef, STAGED_IMAGE_SCHEME};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 10 MiB
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("Failed to read image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not an image file: {}", .0.display())]
    UnsupportedType(PathBuf),

    #[error("Image {} is {size} bytes, limit is {limit}", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

/// Turns local image files into transient, revocable display handles
///
/// Each staged file gets a fresh `blob:movie-catalog/<n>` reference. Handles
/// stay live until revoked; callers release a handle when a newer selection
/// supersedes it or when the draft or record owning it is discarded.
#[derive(Debug)]
pub struct ImageStaging {
    max_bytes: u64,
    next_handle: u64,
    live: HashSet<ImageRef>,
}

impl ImageStaging {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            next_handle: 1,
            live: HashSet::new(),
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Read an image file and issue a handle for it
    pub fn stage_file(&mut self, path: &Path) -> Result<(ImageRef, ImageFile), StagingError> {
        if !is_image_path(path) {
            warn!("Refusing to stage non-image file {}", path.display());
            return Err(StagingError::UnsupportedType(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|source| StagingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() > self.max_bytes {
            warn!(
                "Image {} exceeds staging limit ({} > {} bytes)",
                path.display(),
                metadata.len(),
                self.max_bytes
            );
            return Err(StagingError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.max_bytes,
            });
        }

        let bytes = std::fs::read(path).map_err(|source| StagingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let handle = ImageRef::new(format!("{}{}", STAGED_IMAGE_SCHEME, self.next_handle));
        self.next_handle += 1;
        self.live.insert(handle.clone());
        debug!(
            "Staged {} ({} bytes) as {}",
            path.display(),
            bytes.len(),
            handle
        );

        Ok((handle, ImageFile::new(file_name, bytes)))
    }

    /// Release a staged handle; static references and unknown handles are ignored
    pub fn revoke(&mut self, image: &ImageRef) -> bool {
        if !image.is_staged() {
            return false;
        }
        let released = self.live.remove(image);
        if released {
            debug!("Revoked staged image {}", image);
        }
        released
    }

    pub fn is_live(&self, image: &ImageRef) -> bool {
        self.live.contains(image)
    }

    pub fn live_handles(&self) -> usize {
        self.live.len()
    }
}

impl Default for ImageStaging {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
