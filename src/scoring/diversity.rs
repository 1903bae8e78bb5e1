//! Diversity capping for ranked lists.
//!
//! Every engine applies the same rule before returning a list: walk the
//! list in rank order and drop entries once their artist (or genre) has
//! already been admitted a capped number of times. Relative order of
//! survivors is preserved.

use std::collections::HashMap;

/// Default per-artist cap shared by all engines.
pub const ARTIST_CAP: usize = 3;

/// Default per-genre cap used by the Quick Picks pools.
pub const GENRE_CAP: usize = 8;

/// Tracks admissions per artist (and optionally per genre) while a
/// ranked list is being filtered.
#[derive(Debug, Default)]
pub struct DiversityFilter {
    artist_cap: usize,
    genre_cap: Option<usize>,
    artist_counts: HashMap<String, usize>,
    genre_counts: HashMap<String, usize>,
}

impl DiversityFilter {
    /// Artist-only filter with the shared cap of 3.
    pub fn artists_only() -> Self {
        Self::new(ARTIST_CAP, None)
    }

    /// Artist + genre filter as used per Quick Picks pool.
    pub fn artists_and_genres() -> Self {
        Self::new(ARTIST_CAP, Some(GENRE_CAP))
    }

    pub fn new(artist_cap: usize, genre_cap: Option<usize>) -> Self {
        Self {
            artist_cap,
            genre_cap,
            artist_counts: HashMap::new(),
            genre_counts: HashMap::new(),
        }
    }

    /// Attempt to admit an entry. `artist_key` must already be
    /// case/space-normalized; `genre` is skipped when blank.
    pub fn admit(&mut self, artist_key: &str, genre: &str) -> bool {
        let artist_count = self.artist_counts.get(artist_key).copied().unwrap_or(0);
        if artist_count >= self.artist_cap {
            return false;
        }

        if let Some(genre_cap) = self.genre_cap {
            if !genre.is_empty() {
                let genre_count = self.genre_counts.get(genre).copied().unwrap_or(0);
                if genre_count >= genre_cap {
                    return false;
                }
                *self.genre_counts.entry(genre.to_string()).or_insert(0) += 1;
            }
        }

        *self.artist_counts.entry(artist_key.to_string()).or_insert(0) += 1;
        true
    }
}

/// Filter a ranked list in place-order, keeping at most `ARTIST_CAP`
/// entries per artist key.
pub fn cap_by_artist<T>(items: Vec<T>, artist_key: impl Fn(&T) -> String) -> Vec<T> {
    let mut filter = DiversityFilter::artists_only();
    items
        .into_iter()
        .filter(|item| filter.admit(&artist_key(item), ""))
        .collect()
}
