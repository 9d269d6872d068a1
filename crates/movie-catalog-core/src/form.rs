use movie_catalog_models::{ImageFile, ImageRef, Movie, MovieDraft, MovieId};
use std::num::IntErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::CatalogError;
use crate::staging::{ImageStaging, StagingError};
use crate::store::CatalogStore;

/// Add/edit form state sitting in front of the catalog store
///
/// Holds the raw field text as typed, the chosen image and the editing
/// target. Staged image handles issued for this form are released here when
/// a newer choice replaces them, when the form is cancelled, or when the
/// record owning them is edited away or deleted.
#[derive(Debug, Default)]
pub struct FormController {
    title: String,
    genre: String,
    year: String,
    image: Option<ImageRef>,
    image_file: Option<ImageFile>,
    /// Handle staged by this form and not yet attached to a record
    pending: Option<ImageRef>,
    editing_id: Option<MovieId>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn editing_id(&self) -> Option<MovieId> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit movie"
        } else {
            "Add movie"
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into();
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.year = year.into();
    }

    /// Stage a local image file for this draft, releasing the one it replaces
    pub fn choose_image(
        &mut self,
        staging: &mut ImageStaging,
        path: &Path,
    ) -> Result<ImageRef, StagingError> {
        let (handle, file) = staging.stage_file(path)?;
        self.release_pending(staging);

        self.image = Some(handle.clone());
        self.image_file = Some(file);
        self.pending = Some(handle.clone());
        Ok(handle)
    }

    /// Use an already displayable image (or none), dropping any staged choice
    ///
    /// Staged handles are only accepted through `choose_image`; each one
    /// belongs to exactly one draft or record.
    pub fn set_image(
        &mut self,
        staging: &mut ImageStaging,
        image: Option<ImageRef>,
    ) -> Result<(), CatalogError> {
        if let Some(image) = image.as_ref().filter(|image| image.is_staged()) {
            return Err(CatalogError::validation(format!(
                "{} is a staged image handle; choose an image file instead",
                image
            )));
        }
        self.release_pending(staging);
        self.image = image;
        self.image_file = None;
        Ok(())
    }

    /// Load an existing record into the form
    pub fn start_editing(&mut self, movie: &Movie, staging: &mut ImageStaging) {
        self.release_pending(staging);

        let draft = movie.to_draft();
        self.title = draft.title;
        self.genre = draft.genre;
        self.year = draft.year.to_string();
        self.image = draft.image;
        self.image_file = None;
        self.editing_id = Some(movie.id);
        debug!("Editing movie {}", movie.id);
    }

    /// Discard the draft and leave edit mode
    pub fn cancel(&mut self, staging: &mut ImageStaging) {
        self.release_pending(staging);
        self.reset();
    }

    /// Parse the form into a draft without touching any state
    pub fn to_draft(&self) -> Result<MovieDraft, CatalogError> {
        let year = self.year.trim();
        if year.is_empty() {
            return Err(CatalogError::validation("year is required"));
        }
        let year: i32 = year.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                CatalogError::validation(format!("year {} is out of range", year))
            }
            _ => CatalogError::validation(format!("year must be a number, got '{}'", year)),
        })?;

        Ok(MovieDraft {
            title: self.title.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year,
            image: self.image.clone(),
            image_file: self.image_file.clone(),
        })
    }

    /// Create or update through the store, then clear the form
    ///
    /// On failure the form keeps its values so the user can correct them.
    pub fn submit(
        &mut self,
        store: &mut CatalogStore,
        staging: &mut ImageStaging,
    ) -> Result<MovieId, CatalogError> {
        let draft = self.to_draft()?;
        let new_image = draft.image.clone();
        let replaced_image = self
            .editing_id
            .and_then(|id| store.get(id))
            .and_then(|movie| movie.image.clone());

        let id = store.create_or_update(draft, self.editing_id)?;

        if let Some(old) = replaced_image {
            if Some(&old) != new_image.as_ref() {
                staging.revoke(&old);
            }
        }

        // The pending handle now belongs to the record
        self.pending = None;
        self.reset();
        Ok(id)
    }

    /// Delete a record, releasing its staged image and leaving edit mode if
    /// the form was editing it
    pub fn delete(
        &mut self,
        store: &mut CatalogStore,
        staging: &mut ImageStaging,
        id: MovieId,
    ) -> Option<Movie> {
        let removed = store.delete(id);
        if let Some(image) = removed.as_ref().and_then(|movie| movie.image.as_ref()) {
            staging.revoke(image);
        }
        if self.editing_id == Some(id) {
            self.cancel(staging);
        }
        removed
    }

    fn release_pending(&mut self, staging: &mut ImageStaging) {
        if let Some(handle) = self.pending.take() {
            staging.revoke(&handle);
        }
    }

    fn reset(&mut self) {
        self.title.clear();
        self.genre.clear();
        self.year.clear();
        self.image = None;
        self.image_file = None;
        self.editing_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_image(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"image bytes").unwrap();
        path
    }

    fn fill(form: &mut FormController, title: &str, genre: &str, year: &str) {
        form.set_title(title);
        form.set_genre(genre);
        form.set_year(year);
    }

    #[test]
    fn test_submit_creates_and_resets() {
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "  Inception ", "Sci-Fi", "2010");
        let id = form.submit(&mut store, &mut staging).unwrap();

        assert_eq!(id, MovieId(1));
        assert_eq!(store.get(id).unwrap().title, "Inception");
        assert_eq!(form.title(), "");
        assert_eq!(form.heading(), "Add movie");
    }

    #[test]
    fn test_non_numeric_year_is_rejected_and_form_kept() {
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Inception", "Sci-Fi", "twenty ten");
        let err = form.submit(&mut store, &mut staging).unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(store.is_empty());
        assert_eq!(form.year(), "twenty ten");
    }

    #[test]
    fn test_out_of_range_year_is_reported_as_such() {
        let mut form = FormController::new();
        fill(&mut form, "Inception", "Sci-Fi", "99999999999");

        let err = form.to_draft().unwrap_err();
        assert_eq!(
            err,
            CatalogError::validation("year 99999999999 is out of range")
        );

        form.set_year("-99999999999");
        assert!(form.to_draft().unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn test_rejected_submit_can_be_corrected_and_resubmitted() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.png");
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Inception", "", "2010");
        let handle = form.choose_image(&mut staging, &path).unwrap();
        assert!(form.submit(&mut store, &mut staging).is_err());

        // Everything typed so far, including the staged image, is still there
        assert_eq!(form.title(), "Inception");
        assert_eq!(form.year(), "2010");
        assert_eq!(form.image(), Some(&handle));
        assert!(staging.is_live(&handle));

        form.set_genre("Sci-Fi");
        let id = form.submit(&mut store, &mut staging).unwrap();
        let movie = store.get(id).unwrap();
        assert_eq!(movie.genre, "Sci-Fi");
        assert_eq!(movie.image.as_ref(), Some(&handle));
        assert!(staging.is_live(&handle));
    }

    #[test]
    fn test_missing_year_is_rejected() {
        let mut form = FormController::new();
        fill(&mut form, "Inception", "Sci-Fi", "  ");
        assert!(matches!(form.to_draft(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_edit_flow_preserves_status() {
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "B", "Sci-Fi", "2010");
        let id = form.submit(&mut store, &mut staging).unwrap();
        store.toggle_watched(id);
        store.toggle_watchlist(id);

        let movie = store.get(id).unwrap().clone();
        form.start_editing(&movie, &mut staging);
        assert_eq!(form.heading(), "Edit movie");
        assert_eq!(form.year(), "2010");

        form.set_title("B2");
        form.set_year("2011");
        let edited = form.submit(&mut store, &mut staging).unwrap();

        assert_eq!(edited, id);
        let movie = store.get(id).unwrap();
        assert_eq!(movie.title, "B2");
        assert_eq!(movie.year, 2011);
        assert!(movie.watched);
        assert!(movie.in_watchlist);
        assert!(!form.is_editing());
    }

    #[test]
    fn test_choosing_again_revokes_superseded_handle() {
        let dir = TempDir::new().unwrap();
        let first_path = write_image(&dir, "first.png");
        let second_path = write_image(&dir, "second.png");
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        let first = form.choose_image(&mut staging, &first_path).unwrap();
        let second = form.choose_image(&mut staging, &second_path).unwrap();

        assert!(!staging.is_live(&first));
        assert!(staging.is_live(&second));
        assert_eq!(form.image(), Some(&second));
        assert_eq!(staging.live_handles(), 1);
    }

    #[test]
    fn test_cancel_releases_pending_handle() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.jpg");
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Dune", "Sci-Fi", "2021");
        form.choose_image(&mut staging, &path).unwrap();
        form.cancel(&mut staging);

        assert_eq!(staging.live_handles(), 0);
        assert_eq!(form.title(), "");
        assert!(form.image().is_none());
    }

    #[test]
    fn test_committed_handle_survives_submit_and_is_released_on_replace() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.jpg");
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Dune", "Sci-Fi", "2021");
        let original = form.choose_image(&mut staging, &path).unwrap();
        let id = form.submit(&mut store, &mut staging).unwrap();

        assert!(staging.is_live(&original));
        let movie = store.get(id).unwrap().clone();
        assert_eq!(movie.image.as_ref(), Some(&original));
        assert!(movie.image_file.is_some());

        form.start_editing(&movie, &mut staging);
        let replacement = form.choose_image(&mut staging, &path).unwrap();
        form.submit(&mut store, &mut staging).unwrap();

        assert!(!staging.is_live(&original));
        assert!(staging.is_live(&replacement));
        assert_eq!(store.get(id).unwrap().image.as_ref(), Some(&replacement));
    }

    #[test]
    fn test_edit_without_new_image_keeps_handle() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.jpg");
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Dune", "Sci-Fi", "2021");
        let handle = form.choose_image(&mut staging, &path).unwrap();
        let id = form.submit(&mut store, &mut staging).unwrap();

        let movie = store.get(id).unwrap().clone();
        form.start_editing(&movie, &mut staging);
        form.set_genre("Adventure");
        form.submit(&mut store, &mut staging).unwrap();

        assert!(staging.is_live(&handle));
        assert_eq!(store.get(id).unwrap().image.as_ref(), Some(&handle));
    }

    #[test]
    fn test_set_image_replaces_staged_choice() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.bmp");
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        let staged = form.choose_image(&mut staging, &path).unwrap();
        form.set_image(&mut staging, Some(ImageRef::new("/images/dune.jpg"))).unwrap();

        assert!(!staging.is_live(&staged));
        assert_eq!(form.image(), Some(&ImageRef::new("/images/dune.jpg")));
        assert!(form.to_draft().is_err());
    }

    #[test]
    fn test_set_image_rejects_borrowed_staged_handle() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.png");
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "A", "Action", "2020");
        let handle = form.choose_image(&mut staging, &path).unwrap();
        let first = form.submit(&mut store, &mut staging).unwrap();

        fill(&mut form, "B", "Drama", "2001");
        let err = form.set_image(&mut staging, Some(handle.clone())).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(form.image().is_none());

        let second = form.submit(&mut store, &mut staging).unwrap();
        assert_eq!(store.get(second).unwrap().image, None);

        // Deleting the owner releases the handle and nothing else points at it
        form.delete(&mut store, &mut staging, first);
        assert!(!staging.is_live(&handle));
        assert!(store.movies().iter().all(|movie| movie.image.as_ref() != Some(&handle)));
    }

    #[test]
    fn test_unknown_edit_target_surfaces_error() {
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Ghost", "Horror", "1999");
        let id = form.submit(&mut store, &mut staging).unwrap();
        let movie = store.get(id).unwrap().clone();
        form.start_editing(&movie, &mut staging);
        store.delete(id);

        let err = form.submit(&mut store, &mut staging).unwrap_err();
        assert_eq!(err, CatalogError::EditTargetNotFound(id));
        assert!(store.is_empty());
        assert!(form.is_editing());
    }

    #[test]
    fn test_delete_releases_image_and_leaves_edit_mode() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "poster.gif");
        let mut store = CatalogStore::new();
        let mut staging = ImageStaging::default();
        let mut form = FormController::new();

        fill(&mut form, "Dune", "Sci-Fi", "2021");
        let handle = form.choose_image(&mut staging, &path).unwrap();
        let id = form.submit(&mut store, &mut staging).unwrap();
        store.toggle_watchlist(id);

        let movie = store.get(id).unwrap().clone();
        form.start_editing(&movie, &mut staging);

        let removed = form.delete(&mut store, &mut staging, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(!staging.is_live(&handle));
        assert!(!form.is_editing());
        assert!(store.watchlist_view().is_empty());

        assert!(form.delete(&mut store, &mut staging, id).is_none());
    }
}
