//! Collaborator boundary for the feed core.
//!
//! The engines never talk to a catalog or a history store directly;
//! everything they consume comes through the `FeedSource` trait, fetched
//! fresh per request. Implementations live with the persistence and
//! remote-catalog layers; this crate only ships the JSON fixture source
//! used by the debug binary and tests.

mod json;

pub use json::JsonFeedSource;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{ArtistSection, GenreMap, PlaybackStat, SectionKind, Song, TasteSignals};
use crate::scoring::QuickPickCandidate;

/// Everything the aggregator needs from the outside world.
///
/// All operations are bulk: the aggregator issues one call per section
/// and never loops over per-song lookups.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Songs the user has played, paired with fresh playback stats.
    async fn played_songs_with_stats(&self) -> Result<Vec<(Song, PlaybackStat)>>;

    /// The user's aggregated taste signals.
    async fn taste_signals(&self) -> Result<TasteSignals>;

    /// Artist-fragment to genre lookup table for genre inference.
    async fn genre_map(&self) -> Result<GenreMap>;

    /// Pre-tagged quick-pick candidates from every generation strategy.
    async fn quick_pick_candidates(&self, limit: usize) -> Result<Vec<QuickPickCandidate>>;

    /// A raw candidate list for one of the simple catalog-backed
    /// sections.
    async fn section_candidates(&self, kind: SectionKind, limit: usize) -> Result<Vec<Song>>;

    /// Raw per-artist shelves, not yet deduplicated or capped.
    async fn artist_sections(&self, limit: usize) -> Result<Vec<ArtistSection>>;
}
