//! User taste signals consumed by the scoring engines.
//!
//! Signals are fetched fresh per request by the history collaborator and
//! treated as read-only for the lifetime of the feed build.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Aggregated taste signals for the requesting user.
///
/// The rank order of `top_genres` and `top_artists` matters: engines
/// apply rank-decay so the #1 entry carries the most weight.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TasteSignals {
    /// Genres ranked by listening affinity, best first.
    #[serde(default)]
    pub top_genres: Vec<String>,
    /// Artist display names ranked by listening affinity, best first.
    #[serde(default)]
    pub top_artists: Vec<String>,
    /// Preferred languages; empty means no preference.
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    /// Ids of songs the user has already played.
    #[serde(default)]
    pub played_song_ids: HashSet<String>,
    /// Ids and display names of artists the user follows.
    #[serde(default)]
    pub followed_artists: HashSet<String>,
}

impl TasteSignals {
    /// Rank of an artist in the top-artist list, matched
    /// case-insensitively on display name. `None` if unranked.
    pub fn artist_rank(&self, artist: &str) -> Option<usize> {
        let needle = artist.to_lowercase();
        self.top_artists
            .iter()
            .position(|a| a.to_lowercase() == needle)
    }

    /// Rank of a genre in the top-genre list, matched
    /// case-insensitively. `None` if unranked.
    pub fn genre_rank(&self, genre: &str) -> Option<usize> {
        let needle = genre.to_lowercase();
        self.top_genres
            .iter()
            .position(|g| g.to_lowercase() == needle)
    }

    /// Rank-decay match score: `1 - rank/len`, or 0.0 when unranked.
    pub fn genre_match_score(&self, genre: &str) -> f64 {
        match self.genre_rank(genre) {
            Some(rank) if !self.top_genres.is_empty() => {
                (1.0 - rank as f64 / self.top_genres.len() as f64).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// Rank-decay match score against the top-artist list.
    pub fn artist_match_score(&self, artist: &str) -> f64 {
        match self.artist_rank(artist) {
            Some(rank) if !self.top_artists.is_empty() => {
                (1.0 - rank as f64 / self.top_artists.len() as f64).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// True when the user follows the artist, matched by id or by
    /// case-insensitive display name.
    pub fn follows_artist(&self, artist_id: Option<&str>, artist_name: &str) -> bool {
        if let Some(id) = artist_id {
            if self.followed_artists.contains(id) {
                return true;
            }
        }
        let needle = artist_name.to_lowercase();
        self.followed_artists
            .iter()
            .any(|a| a.to_lowercase() == needle)
    }
}

/// Substring-matched artist-name → genres lookup supplied by the taste
/// inference collaborator.
///
/// Keys are matched as lowercase substrings of the artist display name,
/// so a `"dj "` fragment key tags every "DJ Something" artist. Entries
/// are stored sorted so inference order is deterministic.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenreMap {
    #[serde(flatten)]
    entries: BTreeMap<String, Vec<String>>,
}

impl GenreMap {
    pub fn new(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All genres inferred for the artist, in map order. Empty when no
    /// fragment matches.
    pub fn infer(&self, artist: &str) -> Vec<String> {
        let haystack = artist.to_lowercase();
        let mut genres: Vec<String> = Vec::new();
        for (fragment, mapped) in &self.entries {
            if haystack.contains(&fragment.to_lowercase()) {
                for genre in mapped {
                    if !genres.iter().any(|g| g == genre) {
                        genres.push(genre.clone());
                    }
                }
            }
        }
        genres
    }

    /// The first inferred genre, or an empty string.
    pub fn primary_genre(&self, artist: &str) -> String {
        self.infer(artist).into_iter().next().unwrap_or_default()
    }
}
