use std::collections::BTreeSet;

use movie_catalog_models::{Movie, MovieId};

/// Fast-lookup index of bookmarked movie ids
///
/// The `in_watchlist` flag on each movie is the source of truth. This index
/// is only ever changed by the catalog store in the same call that flips the
/// flag, or rebuilt wholesale from the movies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    ids: BTreeSet<MovieId>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the index from the entity flags
    pub fn rebuild(movies: &[Movie]) -> Self {
        Self {
            ids: movies
                .iter()
                .filter(|movie| movie.in_watchlist)
                .map(|movie| movie.id)
                .collect(),
        }
    }

    pub(crate) fn insert(&mut self, id: MovieId) -> bool {
        self.ids.insert(id)
    }

    pub(crate) fn remove(&mut self, id: MovieId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.ids.iter().copied()
    }

    /// Check `id ∈ watchlist ⟺ movie.in_watchlist` for the given movies,
    /// and that no id outside the collection lingers in the index
    pub fn agrees_with(&self, movies: &[Movie]) -> bool {
        let flagged = movies.iter().filter(|movie| movie.in_watchlist).count();
        flagged == self.ids.len()
            && movies
                .iter()
                .all(|movie| movie.in_watchlist == self.ids.contains(&movie.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_catalog_models::MovieDraft;

    fn movie(id: u64, in_watchlist: bool) -> Movie {
        let mut movie = Movie::from_draft(MovieId(id), MovieDraft::new("Title", "Drama", 2000));
        movie.in_watchlist = in_watchlist;
        movie
    }

    #[test]
    fn test_rebuild_collects_flagged_ids() {
        let movies = vec![movie(1, true), movie(2, false), movie(3, true)];
        let watchlist = Watchlist::rebuild(&movies);
        assert_eq!(watchlist.ids().collect::<Vec<_>>(), vec![MovieId(1), MovieId(3)]);
        assert!(watchlist.agrees_with(&movies));
    }

    #[test]
    fn test_agrees_with_detects_missing_flag() {
        let movies = vec![movie(1, true), movie(2, false)];
        let mut watchlist = Watchlist::rebuild(&movies);
        watchlist.insert(MovieId(2));
        assert!(!watchlist.agrees_with(&movies));
    }

    #[test]
    fn test_agrees_with_detects_stale_id() {
        let movies = vec![movie(1, false)];
        let mut watchlist = Watchlist::new();
        watchlist.insert(MovieId(42));
        assert!(!watchlist.agrees_with(&movies));

        watchlist.remove(MovieId(42));
        assert!(watchlist.agrees_with(&movies));
        assert!(watchlist.is_empty());
    }
}
