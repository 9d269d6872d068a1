use crate::image::{ImageFile, ImageRef};

/// In-progress values for a movie being added or edited
///
/// Carries only the user-editable fields. Identity and status flags are
/// assigned or preserved by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub image: Option<ImageRef>,
    pub image_file: Option<ImageFile>,
}

impl MovieDraft {
    pub fn new(title: impl Into<String>, genre: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            year,
            image: None,
            image_file: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_image_file(mut self, image_file: ImageFile) -> Self {
        self.image_file = Some(image_file);
        self
    }
}
