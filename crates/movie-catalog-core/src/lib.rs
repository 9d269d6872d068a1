pub mod error;
pub mod form;
pub mod staging;
pub mod store;
pub mod watchlist;

pub use error::CatalogError;
pub use form::FormController;
pub use staging::{ImageStaging, StagingError, DEFAULT_MAX_IMAGE_BYTES};
pub use store::CatalogStore;
pub use watchlist::Watchlist;
