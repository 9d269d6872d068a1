use serde::{Deserialize, Serialize};
use std::fmt;

use crate::draft::MovieDraft;
use crate::image::{ImageFile, ImageRef};

/// Catalog-assigned movie identifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl MovieId {
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, `None` once the id space is used up
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub year: i32,
    #[serde(default)]
    pub watched: bool,
    /// Mirrors membership in the watchlist
    #[serde(default)]
    pub in_watchlist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip)]
    pub image_file: Option<ImageFile>,
}

impl Movie {
    /// Build a brand-new record: both status flags start cleared
    pub fn from_draft(id: MovieId, draft: MovieDraft) -> Self {
        Self {
            id,
            title: draft.title,
            genre: draft.genre,
            year: draft.year,
            watched: false,
            in_watchlist: false,
            image: draft.image,
            image_file: draft.image_file,
        }
    }

    /// Replace the editable fields, carrying identity and status over unchanged
    pub fn apply_draft(self, draft: MovieDraft) -> Self {
        Self {
            id: self.id,
            title: draft.title,
            genre: draft.genre,
            year: draft.year,
            watched: self.watched,
            in_watchlist: self.in_watchlist,
            image: draft.image,
            image_file: draft.image_file,
        }
    }

    /// The editable fields of this record, as a form would load them
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            genre: self.genre.clone(),
            year: self.year,
            image: self.image.clone(),
            image_file: None,
        }
    }
}
