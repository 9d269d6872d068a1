use movie_catalog_models::{CatalogSnapshot, Movie, MovieDraft, MovieId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::watchlist::Watchlist;

/// Owner of the in-memory movie collection and its watchlist index
///
/// Every mutation runs to completion inside a single `&mut self` call, so no
/// reader can observe the entity flags and the watchlist index disagreeing.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    movies: Vec<Movie>,
    watchlist: Watchlist,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records (e.g. a seed catalog)
    ///
    /// Rejects duplicate ids and records with blank title or genre. The
    /// watchlist index is derived from the records' `in_watchlist` flags.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for movie in &movies {
            if !seen.insert(movie.id) {
                return Err(CatalogError::DuplicateId(movie.id));
            }
            validate_fields(&movie.title, &movie.genre)?;
        }

        let watchlist = Watchlist::rebuild(&movies);
        info!(
            "Catalog seeded with {} movies ({} in watchlist)",
            movies.len(),
            watchlist.len()
        );
        Ok(Self { movies, watchlist })
    }

    /// Create a new movie, or replace the editable fields of `editing_id`
    ///
    /// New movies get `max(existing ids, 0) + 1`, or `IdsExhausted` when that
    /// would overflow. Edits keep the record's id,
    /// `watched` and `in_watchlist` exactly as they were. On error the store
    /// is left untouched.
    pub fn create_or_update(
        &mut self,
        draft: MovieDraft,
        editing_id: Option<MovieId>,
    ) -> Result<MovieId, CatalogError> {
        if let Err(e) = validate_fields(&draft.title, &draft.genre) {
            warn!("Rejected movie draft: {}", e);
            return Err(e);
        }

        let id = match editing_id {
            None => {
                let id = self.next_id()?;
                self.movies.push(Movie::from_draft(id, draft));
                debug!("Created movie {}", id);
                id
            }
            Some(id) => {
                let Some(index) = self.position(id) else {
                    warn!("Edit target {} does not exist", id);
                    return Err(CatalogError::EditTargetNotFound(id));
                };
                let previous = self.movies.remove(index);
                self.movies.insert(index, previous.apply_draft(draft));
                debug!("Updated movie {}", id);
                id
            }
        };

        self.debug_check_consistency();
        Ok(id)
    }

    /// Remove a movie and its watchlist membership; unknown ids are a no-op
    pub fn delete(&mut self, id: MovieId) -> Option<Movie> {
        // Unconditional, so a stale index entry can never outlive its movie
        self.watchlist.remove(id);

        let removed = self.position(id).map(|index| self.movies.remove(index));
        match &removed {
            Some(_) => debug!("Deleted movie {}", id),
            None => debug!("Delete ignored: movie {} not found", id),
        }

        self.debug_check_consistency();
        removed
    }

    /// Flip `watched`, returning the new value (`None` when id is unknown)
    pub fn toggle_watched(&mut self, id: MovieId) -> Option<bool> {
        let Some(movie) = self.movies.iter_mut().find(|movie| movie.id == id) else {
            debug!("Toggle watched ignored: movie {} not found", id);
            return None;
        };
        movie.watched = !movie.watched;
        debug!("Movie {} watched = {}", id, movie.watched);
        Some(movie.watched)
    }

    /// Flip `in_watchlist` and the watchlist membership together
    pub fn toggle_watchlist(&mut self, id: MovieId) -> Option<bool> {
        let Some(movie) = self.movies.iter_mut().find(|movie| movie.id == id) else {
            debug!("Toggle watchlist ignored: movie {} not found", id);
            return None;
        };
        movie.in_watchlist = !movie.in_watchlist;
        let in_watchlist = movie.in_watchlist;
        if in_watchlist {
            self.watchlist.insert(id);
        } else {
            self.watchlist.remove(id);
        }
        debug!("Movie {} in_watchlist = {}", id, in_watchlist);

        self.debug_check_consistency();
        Some(in_watchlist)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Bookmarked movies in catalog order, filtered from the entities
    pub fn watchlist_view(&self) -> Vec<&Movie> {
        self.movies.iter().filter(|movie| movie.in_watchlist).collect()
    }

    pub fn watchlist_ids(&self) -> Vec<MovieId> {
        self.watchlist.ids().collect()
    }

    pub fn is_in_watchlist(&self, id: MovieId) -> bool {
        self.watchlist.contains(id)
    }

    /// Whether the watchlist index matches the entity flags
    pub fn is_consistent(&self) -> bool {
        self.watchlist.agrees_with(&self.movies)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            movies: self.movies.clone(),
            watchlist: self.watchlist_view().into_iter().cloned().collect(),
        }
    }

    fn next_id(&self) -> Result<MovieId, CatalogError> {
        let highest = self
            .movies
            .iter()
            .map(|movie| movie.id)
            .max()
            .unwrap_or(MovieId(0));
        highest.next().ok_or_else(|| {
            warn!("Cannot create movie: id {} is the largest possible", highest);
            CatalogError::IdsExhausted(highest)
        })
    }

    fn position(&self, id: MovieId) -> Option<usize> {
        self.movies.iter().position(|movie| movie.id == id)
    }

    fn debug_check_consistency(&self) {
        debug_assert!(
            self.is_consistent(),
            "watchlist index diverged from movie flags"
        );
    }
}

fn validate_fields(title: &str, genre: &str) -> Result<(), CatalogError> {
    if title.trim().is_empty() {
        return Err(CatalogError::validation("title must not be empty"));
    }
    if genre.trim().is_empty() {
        return Err(CatalogError::validation("genre must not be empty"));
    }
    Ok(())
}
