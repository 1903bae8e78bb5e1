//! Song value type shared by every engine and feed section.

use serde::{Deserialize, Serialize};

/// The kind of catalog item a candidate resolves to.
///
/// The home feed only surfaces a subset of these, but candidates arrive
/// tagged with whatever the catalog reported.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Song,
    Video,
    Podcast,
    LiveStream,
    Short,
    Album,
    Playlist,
    Artist,
    #[default]
    Unknown,
}

/// An immutable catalog track as consumed by the feed engines.
///
/// `id` and `title` must be non-blank for a song to be admitted into any
/// ranked result; the aggregator's cleanup stage enforces this.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Stable catalog key, unique within the catalog.
    pub id: String,
    pub title: String,
    /// Display name of the (primary) artist.
    pub artist: String,
    /// Stable artist key, when the catalog knows it.
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration_secs: u32,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub content_type: ContentType,
}

impl Song {
    /// True when the song carries the minimum identity the feed requires.
    pub fn has_identity(&self) -> bool {
        !self.id.trim().is_empty() && !self.title.trim().is_empty()
    }

    /// The key used by artist diversity filters and section dedup:
    /// lowercased artist name with whitespace stripped.
    pub fn artist_key(&self) -> String {
        self.artist
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_song(id: &str, title: &str, artist: &str) -> Song {
        Song {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            artist_id: None,
            album: None,
            album_id: None,
            duration_secs: 200,
            thumbnail_url: String::new(),
            year: None,
            view_count: None,
            is_liked: false,
            content_type: ContentType::Song,
        }
    }

    #[test]
    fn test_has_identity() {
        assert!(make_song("s1", "Title", "Artist").has_identity());
        assert!(!make_song("", "Title", "Artist").has_identity());
        assert!(!make_song("s1", "   ", "Artist").has_identity());
    }

    #[test]
    fn test_artist_key_normalizes_case_and_spaces() {
        let song = make_song("s1", "Title", "The  Weeknd ");
        assert_eq!(song.artist_key(), "theweeknd");
    }

    #[test]
    fn test_content_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ContentType::LiveStream).unwrap(),
            "\"live_stream\""
        );
        assert_eq!(
            serde_json::to_string(&ContentType::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_song_deserializes_with_defaults() {
        let json = r#"{"id":"s1","title":"T","artist":"A"}"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.duration_secs, 0);
        assert!(song.view_count.is_none());
        assert_eq!(song.content_type, ContentType::Unknown);
    }
}
