mod file_config;

pub use file_config::FileConfig;

use std::time::Duration;

/// Resolved feed configuration with all defaults applied.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Hard deadline for each section builder.
    pub section_timeout: Duration,
    /// Final size of every ranked section.
    pub section_cap: usize,
    /// How many raw candidates to fetch for english hits before filtering.
    pub english_hits_intermediate_cap: usize,
    /// Final size of the quick picks mix.
    pub quick_picks_target: usize,
    /// How many raw candidates to fetch for quick picks scoring.
    pub quick_picks_candidate_limit: usize,
    /// Maximum number of artist sections in the feed.
    pub artist_section_limit: usize,
    /// Maximum songs per artist section.
    pub artist_section_song_cap: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            section_timeout: Duration::from_secs(8),
            section_cap: 20,
            english_hits_intermediate_cap: 40,
            quick_picks_target: 25,
            quick_picks_candidate_limit: 100,
            artist_section_limit: 4,
            artist_section_song_cap: 10,
        }
    }
}

impl FeedConfig {
    /// Resolve configuration from an optional TOML file config.
    /// File values override defaults where present.
    pub fn resolve(file_config: Option<FileConfig>) -> Self {
        let file = file_config.unwrap_or_default();
        let defaults = Self::default();

        Self {
            section_timeout: file
                .section_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.section_timeout),
            section_cap: file.section_cap.unwrap_or(defaults.section_cap),
            english_hits_intermediate_cap: file
                .english_hits_intermediate_cap
                .unwrap_or(defaults.english_hits_intermediate_cap),
            quick_picks_target: file
                .quick_picks_target
                .unwrap_or(defaults.quick_picks_target),
            quick_picks_candidate_limit: file
                .quick_picks_candidate_limit
                .unwrap_or(defaults.quick_picks_candidate_limit),
            artist_section_limit: file
                .artist_section_limit
                .unwrap_or(defaults.artist_section_limit),
            artist_section_song_cap: file
                .artist_section_song_cap
                .unwrap_or(defaults.artist_section_song_cap),
        }
    }
}
