use movie_catalog_models::MovieId;

/// Errors reported by catalog mutations
///
/// Operations on unknown ids (delete, toggles) are no-ops and never produce
/// an error; only edits must name an existing record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot edit movie {0}: no movie with that id")]
    EditTargetNotFound(MovieId),

    #[error("Duplicate movie id {0}")]
    DuplicateId(MovieId),

    #[error("No movie ids left after {0}")]
    IdsExhausted(MovieId),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
