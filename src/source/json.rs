//! Fixture-backed feed source.
//!
//! Loads one directory of JSON files into memory and serves them
//! through the `FeedSource` trait. Used by the `feed-debug` binary and
//! handy for reproducing feed-assembly bugs from captured payloads.
//!
//! Expected files (all optional; missing files mean empty sections):
//! `played.json`, `signals.json`, `genre_map.json`, `quick_picks.json`, `trending.json`,
//! `new_releases.json`, `english_hits.json`, `personalized_mix.json`,
//! `forgotten_favorites.json`, `artist_sections.json`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::model::{ArtistSection, GenreMap, PlaybackStat, SectionKind, Song, TasteSignals};
use crate::scoring::QuickPickCandidate;

use super::FeedSource;

/// An in-memory `FeedSource` loaded from a fixtures directory.
#[derive(Clone, Debug, Default)]
pub struct JsonFeedSource {
    played: Vec<(Song, PlaybackStat)>,
    signals: TasteSignals,
    genre_map: GenreMap,
    quick_picks: Vec<QuickPickCandidate>,
    trending: Vec<Song>,
    new_releases: Vec<Song>,
    english_hits: Vec<Song>,
    personalized_mix: Vec<Song>,
    forgotten_favorites: Vec<Song>,
    artist_sections: Vec<ArtistSection>,
}

impl JsonFeedSource {
    /// Load every fixture file present in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            played: load_or_default(dir, "played.json")?,
            signals: load_or_default(dir, "signals.json")?,
            genre_map: load_or_default(dir, "genre_map.json")?,
            quick_picks: load_or_default(dir, "quick_picks.json")?,
            trending: load_or_default(dir, "trending.json")?,
            new_releases: load_or_default(dir, "new_releases.json")?,
            english_hits: load_or_default(dir, "english_hits.json")?,
            personalized_mix: load_or_default(dir, "personalized_mix.json")?,
            forgotten_favorites: load_or_default(dir, "forgotten_favorites.json")?,
            artist_sections: load_or_default(dir, "artist_sections.json")?,
        })
    }
}

fn load_or_default<T: DeserializeOwned + Default>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    if !path.exists() {
        debug!(file = name, "fixture missing, using empty default");
        return Ok(T::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading fixture {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing fixture {:?}", path))
}

#[async_trait]
impl FeedSource for JsonFeedSource {
    async fn played_songs_with_stats(&self) -> Result<Vec<(Song, PlaybackStat)>> {
        Ok(self.played.clone())
    }

    async fn taste_signals(&self) -> Result<TasteSignals> {
        Ok(self.signals.clone())
    }

    async fn genre_map(&self) -> Result<GenreMap> {
        Ok(self.genre_map.clone())
    }

    async fn quick_pick_candidates(&self, limit: usize) -> Result<Vec<QuickPickCandidate>> {
        Ok(self.quick_picks.iter().take(limit).cloned().collect())
    }

    async fn section_candidates(&self, kind: SectionKind, limit: usize) -> Result<Vec<Song>> {
        let list = match kind {
            SectionKind::Trending => &self.trending,
            SectionKind::NewReleases => &self.new_releases,
            SectionKind::EnglishHits => &self.english_hits,
            SectionKind::PersonalizedMix => &self.personalized_mix,
            SectionKind::ForgottenFavorites => &self.forgotten_favorites,
        };
        Ok(list.iter().take(limit).cloned().collect())
    }

    async fn artist_sections(&self, limit: usize) -> Result<Vec<ArtistSection>> {
        Ok(self.artist_sections.iter().take(limit).cloned().collect())
    }
}
