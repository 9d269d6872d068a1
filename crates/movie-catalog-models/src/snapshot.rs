use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// Read-only copy of catalog state handed to the presentation layer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub movies: Vec<Movie>,
    /// Movies with `in_watchlist` set, in catalog order
    pub watchlist: Vec<Movie>,
}

impl CatalogSnapshot {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
