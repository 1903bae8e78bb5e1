//! Trending re-ranking: personal affinity over an external chart.
//!
//! The input list arrives already ranked (best first) by the catalog.
//! Each song starts from a rank-derived base score and picks up
//! independent multiplicative boosts for genre, language, and artist
//! affinity, plus a novelty discount for songs the user already knows.

use tracing::debug;

use crate::model::{GenreMap, Song, TasteSignals};

use super::diversity::cap_by_artist;
use super::language::looks_latin_script;

const GENRE_BOOST: f64 = 1.3;
const LANGUAGE_BOOST: f64 = 1.2;
const ARTIST_BOOST: f64 = 1.4;
const NOVELTY_FACTOR: f64 = 0.7;

/// A trending entry with its personalization state.
#[derive(Clone, Debug)]
pub struct RankedTrendingItem {
    pub song: Song,
    /// Unbounded above; only relative magnitude matters downstream.
    pub personalized_score: f64,
    /// 0-based position in the input chart.
    pub original_rank: usize,
}

/// Rank-derived base score: 1.0 for the chart-topper, approaching 0 for
/// the tail. 0.5 when the chart reports no total.
fn base_score(rank: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.5;
    }
    1.0 - rank as f64 / total as f64
}

/// Personalized score for one chart entry.
pub fn personalize(
    song: &Song,
    rank: usize,
    total: usize,
    signals: &TasteSignals,
    genres: &GenreMap,
) -> f64 {
    let base = base_score(rank, total);

    let genre_boost = if genres
        .infer(&song.artist)
        .iter()
        .any(|g| signals.genre_rank(g).is_some())
    {
        GENRE_BOOST
    } else {
        1.0
    };

    let language_boost = if signals.preferred_languages.is_empty()
        || looks_latin_script(&song.title, &song.artist)
    {
        LANGUAGE_BOOST
    } else {
        1.0
    };

    let artist_boost = if signals.artist_rank(&song.artist).is_some() {
        ARTIST_BOOST
    } else {
        1.0
    };

    let novelty = if signals.played_song_ids.contains(&song.id) {
        NOVELTY_FACTOR
    } else {
        1.0
    };

    base * genre_boost * language_boost * artist_boost * novelty
}

/// Re-rank an externally ranked trending list by personal affinity.
pub fn rank_trending(list: Vec<Song>, signals: &TasteSignals, genres: &GenreMap) -> Vec<Song> {
    let total = list.len();
    let mut items: Vec<RankedTrendingItem> = list
        .into_iter()
        .enumerate()
        .map(|(rank, song)| {
            let personalized_score = personalize(&song, rank, total, signals, genres);
            RankedTrendingItem {
                song,
                personalized_score,
                original_rank: rank,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.personalized_score
            .partial_cmp(&a.personalized_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.original_rank.cmp(&b.original_rank))
    });

    debug!(total, "trending list personalized");

    let capped = cap_by_artist(items, |item| item.song.artist_key());
    capped.into_iter().map(|item| item.song).collect()
}
