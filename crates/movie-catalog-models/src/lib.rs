pub mod draft;
pub mod image;
pub mod movie;
pub mod snapshot;

pub use draft::MovieDraft;
pub use image::{ImageFile, ImageRef, STAGED_IMAGE_SCHEME};
pub use movie::{Movie, MovieId};
pub use snapshot::CatalogSnapshot;
