//! Quick Picks: a blended mix of familiar tracks and discoveries.
//!
//! Candidates arrive pre-fetched and tagged with the strategy that
//! produced them. Scoring weighs taste affinity against freshness;
//! assembly enforces a 60/40 familiar/discovery split, per-pool
//! diversity caps, a fixed interleave pattern, and a seeded windowed
//! shuffle so the shelf looks alive without losing determinism inside a
//! session.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{GenreMap, Song, TasteSignals};

use super::diversity::DiversityFilter;
use super::language::looks_latin_script;

const BASE_WEIGHT: f64 = 0.30;
const GENRE_WEIGHT: f64 = 0.20;
const ARTIST_WEIGHT: f64 = 0.15;
const POPULARITY_WEIGHT: f64 = 0.10;
const LANGUAGE_WEIGHT: f64 = 0.10;
const FRESHNESS_WEIGHT: f64 = 0.10;
const DURATION_WEIGHT: f64 = 0.05;

/// Share of the target filled from the familiar pool.
const FAMILIAR_SHARE: f64 = 0.60;

/// Window size for the seeded shuffle.
const SHUFFLE_WINDOW: usize = 5;

/// Which candidate-generation strategy produced a quick-pick candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Familiar,
    SameArtistUnplayed,
    SimilarArtist,
    GenrePopular,
    TrendingGenre,
}

/// A raw quick-pick candidate as supplied by the catalog collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuickPickCandidate {
    pub song: Song,
    pub source: CandidateSource,
    /// Strategy-specific confidence, already normalized to [0,1].
    pub source_score: f64,
}

/// A candidate carrying its computed scoring state.
#[derive(Clone, Debug)]
pub struct ScoredCandidate {
    pub song: Song,
    pub source: CandidateSource,
    pub source_score: f64,
    pub is_familiar: bool,
    pub final_score: f64,
    pub inferred_genre: String,
    pub inferred_artist_rank: usize,
}

impl ScoredCandidate {
    fn from_candidate(
        candidate: QuickPickCandidate,
        signals: &TasteSignals,
        genres: &GenreMap,
    ) -> Self {
        let inferred_genre = genres.primary_genre(&candidate.song.artist);
        let inferred_artist_rank = signals
            .artist_rank(&candidate.song.artist)
            .unwrap_or(usize::MAX);
        Self {
            is_familiar: candidate.source == CandidateSource::Familiar,
            song: candidate.song,
            source: candidate.source,
            source_score: candidate.source_score,
            final_score: 0.0,
            inferred_genre,
            inferred_artist_rank,
        }
    }
}

/// Compute a candidate's final score, clamped to [0,1].
pub fn score_candidate(
    candidate: &ScoredCandidate,
    signals: &TasteSignals,
) -> f64 {
    let base = candidate.source_score.clamp(0.0, 1.0);
    let genre_match = signals.genre_match_score(&candidate.inferred_genre);
    let artist_match = signals.artist_match_score(&candidate.song.artist);
    let popularity = popularity_score(candidate.song.view_count);
    let language_match = language_score(&candidate.song, signals);
    let freshness = if candidate.is_familiar { 0.5 } else { 1.0 };
    let duration_match = duration_score(candidate.song.duration_secs);

    (BASE_WEIGHT * base
        + GENRE_WEIGHT * genre_match
        + ARTIST_WEIGHT * artist_match
        + POPULARITY_WEIGHT * popularity
        + LANGUAGE_WEIGHT * language_match
        + FRESHNESS_WEIGHT * freshness
        + DURATION_WEIGHT * duration_match)
        .clamp(0.0, 1.0)
}

/// `min(1, log10(view_count)/7)`, with a neutral 0.5 prior when the
/// catalog reported no view count.
pub(crate) fn popularity_score(view_count: Option<u64>) -> f64 {
    match view_count {
        Some(count) if count > 0 => ((count as f64).log10() / 7.0).min(1.0),
        _ => 0.5,
    }
}

fn language_score(song: &Song, signals: &TasteSignals) -> f64 {
    if signals.preferred_languages.is_empty() {
        return 1.0;
    }
    if looks_latin_script(&song.title, &song.artist) {
        1.0
    } else {
        0.3
    }
}

fn duration_score(duration_secs: u32) -> f64 {
    match duration_secs {
        120..=360 => 1.0,
        60..=600 => 0.7,
        _ => 0.4,
    }
}

/// Score, split, diversify, interleave, and shuffle candidates into the
/// final Quick Picks shelf.
pub fn rank_quick_picks(
    candidates: Vec<QuickPickCandidate>,
    signals: &TasteSignals,
    genres: &GenreMap,
    target: usize,
    session_seed: u64,
) -> Vec<Song> {
    let scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|c| {
            let mut sc = ScoredCandidate::from_candidate(c, signals, genres);
            sc.final_score = score_candidate(&sc, signals);
            sc
        })
        .collect();

    let familiar_count = (target as f64 * FAMILIAR_SHARE).floor() as usize;
    let discovery_count = target - familiar_count;

    let (familiar, discovery): (Vec<ScoredCandidate>, Vec<ScoredCandidate>) =
        scored.into_iter().partition(|c| c.is_familiar);

    let familiar = select_pool(familiar, familiar_count);
    let discovery = select_pool(discovery, discovery_count);

    debug!(
        familiar = familiar.len(),
        discovery = discovery.len(),
        target,
        "quick picks pools selected"
    );

    let interleaved = interleave(familiar, discovery);
    let mut songs: Vec<Song> = interleaved.into_iter().map(|c| c.song).collect();
    windowed_shuffle(&mut songs, session_seed);
    songs
}

/// Sort a pool by score, apply the per-pool diversity filter in score
/// order, and keep the top `count` survivors.
fn select_pool(mut pool: Vec<ScoredCandidate>, count: usize) -> Vec<ScoredCandidate> {
    pool.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut filter = DiversityFilter::artists_and_genres();
    pool.into_iter()
        .filter(|c| filter.admit(&c.song.artist_key(), &c.inferred_genre))
        .take(count)
        .collect()
}

/// Repeating `[Familiar, Familiar, Discovery]` pattern; when the
/// indicated pool is exhausted, fall back to the other until both run
/// out.
fn interleave(
    familiar: Vec<ScoredCandidate>,
    discovery: Vec<ScoredCandidate>,
) -> Vec<ScoredCandidate> {
    const PATTERN: [bool; 3] = [true, true, false]; // true = familiar slot

    let mut result = Vec::with_capacity(familiar.len() + discovery.len());
    let mut familiar = familiar.into_iter().peekable();
    let mut discovery = discovery.into_iter().peekable();

    let mut slot = 0usize;
    loop {
        let want_familiar = PATTERN[slot % PATTERN.len()];
        let next = if want_familiar {
            familiar.next().or_else(|| discovery.next())
        } else {
            discovery.next().or_else(|| familiar.next())
        };
        match next {
            Some(candidate) => result.push(candidate),
            None => break,
        }
        slot += 1;
    }
    result
}

/// Independently Fisher–Yates-shuffle each consecutive window of five,
/// driven by a generator seeded from the session seed. Same seed, same
/// order; new session, new order.
fn windowed_shuffle(songs: &mut [Song], session_seed: u64) {
    let mut rng = SmallRng::seed_from_u64(session_seed);
    for window in songs.chunks_mut(SHUFFLE_WINDOW) {
        window.shuffle(&mut rng);
    }
}
