//! Post-processing passes applied to section lists after the builders
//! have run: sanitation, dedup, language filtering, cross-list
//! exclusion and artist section normalization.

use crate::model::{ArtistSection, ContentType, Song};
use crate::scoring::language::passes_english_filter;
use std::collections::HashSet;

/// Drops songs without a usable identity, removes duplicate ids
/// (first occurrence wins) and truncates to `cap`.
pub fn clean_section(songs: Vec<Song>, cap: usize) -> Vec<Song> {
    let mut seen = HashSet::new();
    songs
        .into_iter()
        .filter(|song| song.has_identity())
        .filter(|song| seen.insert(song.id.clone()))
        .take(cap)
        .collect()
}

/// Keeps only songs that look like English-language music content:
/// no known non-English markers, predominantly Latin-script metadata
/// and a song-like content type.
pub fn filter_english_hits(songs: Vec<Song>, cap: usize) -> Vec<Song> {
    let filtered = songs
        .into_iter()
        .filter(|song| {
            matches!(song.content_type, ContentType::Song | ContentType::Unknown)
                && passes_english_filter(&song.title, &song.artist)
        })
        .collect();
    clean_section(filtered, cap)
}

/// Removes from `songs` anything already present in `exclude`.
/// Used to keep forgotten favorites disjoint from listen again.
pub fn exclude_ids(songs: Vec<Song>, exclude: &HashSet<String>) -> Vec<Song> {
    songs
        .into_iter()
        .filter(|song| !exclude.contains(&song.id))
        .collect()
}

pub fn id_set(songs: &[Song]) -> HashSet<String> {
    songs.iter().map(|song| song.id.clone()).collect()
}

/// Normalizes artist sections: cleans each song list, drops sections
/// that end up empty, removes duplicate artists (first wins) and caps
/// the section count.
pub fn normalize_artist_sections(
    sections: Vec<ArtistSection>,
    section_limit: usize,
    song_cap: usize,
) -> Vec<ArtistSection> {
    let mut seen = HashSet::new();
    sections
        .into_iter()
        .map(|mut section| {
            section.songs = clean_section(section.songs, song_cap);
            section
        })
        .filter(|section| !section.songs.is_empty())
        .filter(|section| seen.insert(section.identity()))
        .take(section_limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_song(id: &str, title: &str) -> Song {
        Song {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Artist".to_string(),
            ..Default::default()
        }
    }

    // ==================== clean_section ====================

    #[test]
    fn test_clean_drops_blank_identity() {
        let songs = vec![
            make_song("a", "One"),
            make_song("", "No id"),
            make_song("b", "  "),
            make_song("c", "Three"),
        ];
        let cleaned = clean_section(songs, 10);
        let ids: Vec<_> = cleaned.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_clean_dedup_first_wins() {
        let songs = vec![
            make_song("a", "First"),
            make_song("b", "Other"),
            make_song("a", "Second"),
        ];
        let cleaned = clean_section(songs, 10);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].title, "First");
    }

    #[test]
    fn test_clean_caps_length() {
        let songs: Vec<_> = (0..30).map(|i| make_song(&format!("s{}", i), "T")).collect();
        assert_eq!(clean_section(songs, 20).len(), 20);
    }

    // ==================== filter_english_hits ====================

    #[test]
    fn test_english_filter_drops_marked_titles() {
        let songs = vec![
            make_song("a", "Summer Nights"),
            make_song("b", "Bollywood Hit Mix"),
            make_song("c", "Another Tune"),
        ];
        let filtered = filter_english_hits(songs, 20);
        let ids: Vec<_> = filtered.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_english_filter_drops_non_song_content() {
        let mut video = make_song("v", "Latin Title");
        video.content_type = ContentType::Video;
        let songs = vec![make_song("a", "Keeper"), video];
        let filtered = filter_english_hits(songs, 20);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn test_english_filter_drops_non_latin_script() {
        let songs = vec![make_song("a", "Keeper"), make_song("b", "गीत का नाम")];
        let filtered = filter_english_hits(songs, 20);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    // ==================== exclusion ====================

    #[test]
    fn test_exclude_ids() {
        let songs = vec![make_song("a", "A"), make_song("b", "B"), make_song("c", "C")];
        let exclude: HashSet<String> = ["b".to_string()].into_iter().collect();
        let remaining = exclude_ids(songs, &exclude);
        let ids: Vec<_> = remaining.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    // ==================== artist sections ====================

    fn make_section(artist_id: &str, name: &str, songs: Vec<Song>) -> ArtistSection {
        ArtistSection {
            artist_id: (!artist_id.is_empty()).then(|| artist_id.to_string()),
            artist_name: name.to_string(),
            songs,
        }
    }

    #[test]
    fn test_normalize_drops_empty_sections() {
        let sections = vec![
            make_section("a1", "Alpha", vec![make_song("s1", "One")]),
            make_section("a2", "Beta", vec![make_song("", "")]),
        ];
        let normalized = normalize_artist_sections(sections, 4, 10);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].artist_id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_normalize_dedups_artists_and_caps_count() {
        let sections = vec![
            make_section("a1", "Alpha", vec![make_song("s1", "One")]),
            make_section("a1", "Alpha", vec![make_song("s2", "Two")]),
            make_section("a2", "Beta", vec![make_song("s3", "Three")]),
            make_section("a3", "Gamma", vec![make_song("s4", "Four")]),
            make_section("a4", "Delta", vec![make_song("s5", "Five")]),
            make_section("a5", "Epsilon", vec![make_song("s6", "Six")]),
        ];
        let normalized = normalize_artist_sections(sections, 4, 10);
        assert_eq!(normalized.len(), 4);
        // Duplicate of a1 was dropped, first occurrence kept
        assert_eq!(normalized[0].songs[0].id, "s1");
        let ids: Vec<_> = normalized
            .iter()
            .map(|s| s.artist_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["a1", "a2", "a3", "a4"]);
    }

    #[test]
    fn test_normalize_matches_artists_by_name_when_id_blank() {
        let sections = vec![
            make_section("", "Same Artist", vec![make_song("s1", "One")]),
            make_section("", "same artist", vec![make_song("s2", "Two")]),
        ];
        let normalized = normalize_artist_sections(sections, 4, 10);
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn test_normalize_caps_songs_per_section() {
        let songs: Vec<_> = (0..15).map(|i| make_song(&format!("s{}", i), "T")).collect();
        let sections = vec![make_section("a1", "Alpha", songs)];
        let normalized = normalize_artist_sections(sections, 4, 10);
        assert_eq!(normalized[0].songs.len(), 10);
    }
}
