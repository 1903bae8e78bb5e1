//! Aggregate home feed types.
//!
//! A `HomeFeed` is the single response object the aggregator produces:
//! eight named, ordered, duplicate-free song lists plus a bounded set of
//! per-artist sections.

use serde::{Deserialize, Serialize};

use super::song::Song;

/// The kinds of candidate lists the catalog collaborator can serve.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Trending,
    NewReleases,
    EnglishHits,
    PersonalizedMix,
    ForgottenFavorites,
}

/// A "more from <artist>" shelf: one artist plus a bounded song list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArtistSection {
    #[serde(default)]
    pub artist_id: Option<String>,
    pub artist_name: String,
    pub songs: Vec<Song>,
}

impl ArtistSection {
    /// The identity sections are deduplicated by: the artist id when
    /// present, otherwise the lowercased display name.
    pub fn identity(&self) -> String {
        match &self.artist_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => self.artist_name.to_lowercase(),
        }
    }
}

/// The assembled home feed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HomeFeed {
    pub listen_again: Vec<Song>,
    pub quick_picks: Vec<Song>,
    pub forgotten_favorites: Vec<Song>,
    pub new_releases: Vec<Song>,
    pub trending: Vec<Song>,
    pub english_hits: Vec<Song>,
    pub personalized_for_you: Vec<Song>,
    pub artist_sections: Vec<ArtistSection>,
}

impl HomeFeed {
    /// True when every section came back empty.
    pub fn is_empty(&self) -> bool {
        self.listen_again.is_empty()
            && self.quick_picks.is_empty()
            && self.forgotten_favorites.is_empty()
            && self.new_releases.is_empty()
            && self.trending.is_empty()
            && self.english_hits.is_empty()
            && self.personalized_for_you.is_empty()
            && self.artist_sections.is_empty()
    }

    /// Per-section sizes, for summary logging.
    pub fn section_sizes(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("listen_again", self.listen_again.len()),
            ("quick_picks", self.quick_picks.len()),
            ("forgotten_favorites", self.forgotten_favorites.len()),
            ("new_releases", self.new_releases.len()),
            ("trending", self.trending.len()),
            ("english_hits", self.english_hits.len()),
            ("personalized_for_you", self.personalized_for_you.len()),
            ("artist_sections", self.artist_sections.len()),
        ]
    }
}
