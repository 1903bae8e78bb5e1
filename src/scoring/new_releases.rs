//! New-release re-ranking by personal relevance.
//!
//! Unlike the other engines this score is deliberately not clamped at
//! 1.0: the weights cover 0.80 of the theoretical maximum and downstream
//! consumers only depend on relative order, so the scale is left alone.

use tracing::debug;

use crate::model::{GenreMap, Song, TasteSignals};

use super::diversity::cap_by_artist;
use super::language::looks_latin_script;
use super::quick_picks::popularity_score;

const ARTIST_RELEVANCE_WEIGHT: f64 = 0.30;
const GENRE_WEIGHT: f64 = 0.15;
const POPULARITY_WEIGHT: f64 = 0.15;
const LANGUAGE_WEIGHT: f64 = 0.10;
const NOVELTY_WEIGHT: f64 = 0.10;

/// Tiered artist relevance: followed > top-listened (rank-decayed) >
/// genre-adjacent > unknown.
fn artist_relevance(song: &Song, signals: &TasteSignals, genres: &GenreMap) -> f64 {
    if signals.follows_artist(song.artist_id.as_deref(), &song.artist) {
        return 1.0;
    }
    if let Some(rank) = signals.artist_rank(&song.artist) {
        let len = signals.top_artists.len().max(1);
        return 0.5 + 0.5 * (1.0 - rank as f64 / len as f64);
    }
    let inferred = genres.infer(&song.artist);
    if inferred.iter().any(|g| signals.genre_rank(g).is_some()) {
        return 0.4;
    }
    0.1
}

/// Best-rank genre match: 0.3 when nothing could be inferred, 0.2 when
/// inferred genres exist but none are in the user's top list.
fn genre_match(song: &Song, signals: &TasteSignals, genres: &GenreMap) -> f64 {
    let inferred = genres.infer(&song.artist);
    if inferred.is_empty() {
        return 0.3;
    }
    let best_rank = inferred
        .iter()
        .filter_map(|g| signals.genre_rank(g))
        .min();
    match best_rank {
        Some(rank) if !signals.top_genres.is_empty() => {
            1.0 - rank as f64 / signals.top_genres.len() as f64
        }
        _ => 0.2,
    }
}

/// Personal relevance score for one release. Unbounded above 1.0.
pub fn score_new_release(song: &Song, signals: &TasteSignals, genres: &GenreMap) -> f64 {
    let popularity = match song.view_count {
        Some(count) if count > 0 => popularity_score(song.view_count),
        _ => 0.3,
    };
    let language = if signals.preferred_languages.is_empty()
        || looks_latin_script(&song.title, &song.artist)
    {
        1.0
    } else {
        0.5
    };
    let novelty = if signals.played_song_ids.contains(&song.id) {
        0.5
    } else {
        1.0
    };

    ARTIST_RELEVANCE_WEIGHT * artist_relevance(song, signals, genres)
        + GENRE_WEIGHT * genre_match(song, signals, genres)
        + POPULARITY_WEIGHT * popularity
        + LANGUAGE_WEIGHT * language
        + NOVELTY_WEIGHT * novelty
}

/// Re-rank new-release candidates by personal relevance, best first,
/// with the shared per-artist diversity cap.
pub fn rank_new_releases(
    list: Vec<Song>,
    signals: &TasteSignals,
    genres: &GenreMap,
) -> Vec<Song> {
    let mut scored: Vec<(Song, f64)> = list
        .into_iter()
        .map(|song| {
            let score = score_new_release(&song, signals, genres);
            (song, score)
        })
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    debug!(total = scored.len(), "new releases ranked");

    let capped = cap_by_artist(scored, |(song, _)| song.artist_key());
    capped.into_iter().map(|(song, _)| song).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;
    use std::collections::HashSet;

    fn make_song(id: &str, artist: &str) -> Song {
        Song {
            id: id.to_string(),
            title: format!("Title {}", id),
            artist: artist.to_string(),
            artist_id: None,
            album: None,
            album_id: None,
            duration_secs: 200,
            thumbnail_url: String::new(),
            year: Some(2024),
            view_count: None,
            is_liked: false,
            content_type: ContentType::Song,
        }
    }

    // =========================================================================
    // Artist relevance tiers
    // =========================================================================

    #[test]
    fn test_followed_artist_tops_relevance() {
        let signals = TasteSignals {
            followed_artists: HashSet::from(["Mitski".to_string()]),
            ..Default::default()
        };
        let song = make_song("s1", "Mitski");
        assert_eq!(artist_relevance(&song, &signals, &GenreMap::default()), 1.0);
    }

    #[test]
    fn test_top_listened_rank_decay() {
        let signals = TasteSignals {
            top_artists: vec!["First".into(), "Second".into()],
            ..Default::default()
        };
        let genres = GenreMap::default();

        let first = artist_relevance(&make_song("s1", "First"), &signals, &genres);
        let second = artist_relevance(&make_song("s2", "Second"), &signals, &genres);
        assert!((first - 1.0).abs() < 1e-9); // 0.5 + 0.5 * 1.0
        assert!((second - 0.75).abs() < 1e-9); // 0.5 + 0.5 * 0.5
    }

    #[test]
    fn test_genre_adjacent_and_unknown_tiers() {
        let signals = TasteSignals {
            top_genres: vec!["shoegaze".into()],
            ..Default::default()
        };
        let genres = GenreMap::new([("slowdive".to_string(), vec!["shoegaze".to_string()])]);

        let adjacent = artist_relevance(&make_song("s1", "Slowdive"), &signals, &genres);
        let unknown = artist_relevance(&make_song("s2", "Nobody"), &signals, &genres);
        assert_eq!(adjacent, 0.4);
        assert_eq!(unknown, 0.1);
    }

    // =========================================================================
    // Genre match
    // =========================================================================

    #[test]
    fn test_genre_match_defaults() {
        let signals = TasteSignals {
            top_genres: vec!["pop".into(), "rock".into()],
            ..Default::default()
        };
        let genres = GenreMap::new([("nails".to_string(), vec!["grindcore".to_string()])]);

        // No inference possible
        assert_eq!(genre_match(&make_song("s1", "Mystery"), &signals, &genres), 0.3);
        // Inferred but not in the user's top list
        assert_eq!(genre_match(&make_song("s2", "Nails"), &signals, &genres), 0.2);
    }

    #[test]
    fn test_genre_match_best_rank() {
        let signals = TasteSignals {
            top_genres: vec!["pop".into(), "rock".into()],
            ..Default::default()
        };
        let genres = GenreMap::new([(
            "queen".to_string(),
            vec!["rock".to_string(), "pop".to_string()],
        )]);

        // Best (lowest) rank wins: pop at rank 0 → 1.0
        let score = genre_match(&make_song("s1", "Queen"), &signals, &genres);
        assert!((score - 1.0).abs() < 1e-9);
    }

    // =========================================================================
    // Composite + ranking
    // =========================================================================

    #[test]
    fn test_score_can_exceed_one_is_not_required_but_order_holds() {
        let signals = TasteSignals {
            followed_artists: HashSet::from(["Star".to_string()]),
            ..Default::default()
        };
        let genres = GenreMap::default();

        let followed = score_new_release(&make_song("s1", "Star"), &signals, &genres);
        let stranger = score_new_release(&make_song("s2", "Stranger"), &signals, &genres);
        assert!(followed > stranger);
    }

    #[test]
    fn test_played_release_discounted() {
        let signals = TasteSignals {
            played_song_ids: HashSet::from(["s1".to_string()]),
            ..Default::default()
        };
        let genres = GenreMap::default();

        let played = score_new_release(&make_song("s1", "A"), &signals, &genres);
        let unplayed = score_new_release(&make_song("s2", "A"), &signals, &genres);
        assert!((unplayed - played - NOVELTY_WEIGHT * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rank_applies_diversity_cap() {
        let list: Vec<Song> = (0..5)
            .map(|i| make_song(&format!("s{}", i), "One Artist"))
            .collect();
        let ranked = rank_new_releases(list, &TasteSignals::default(), &GenreMap::default());
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_followed_release_outranks_strangers() {
        let signals = TasteSignals {
            followed_artists: HashSet::from(["Fave".to_string()]),
            ..Default::default()
        };
        let mut list: Vec<Song> = (0..5)
            .map(|i| make_song(&format!("s{}", i), &format!("artist_{}", i)))
            .collect();
        list.push(make_song("fave_song", "Fave"));

        let ranked = rank_new_releases(list, &signals, &GenreMap::default());
        assert_eq!(ranked[0].id, "fave_song");
    }
}
