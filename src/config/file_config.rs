use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML overlay for feed tuning. Every field is optional;
/// anything absent falls back to the built-in defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub section_timeout_secs: Option<u64>,
    pub section_cap: Option<usize>,
    pub english_hits_intermediate_cap: Option<usize>,
    pub quick_picks_target: Option<usize>,
    pub quick_picks_candidate_limit: Option<usize>,
    pub artist_section_limit: Option<usize>,
    pub artist_section_song_cap: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_parses_to_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.section_timeout_secs.is_none());
        assert!(config.section_cap.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config: FileConfig = toml::from_str(
            r#"
            section_timeout_secs = 3
            quick_picks_target = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.section_timeout_secs, Some(3));
        assert_eq!(config.quick_picks_target, Some(30));
        assert!(config.artist_section_limit.is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "section_cap = 10").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.section_cap, Some(10));
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "section_cap = [nonsense").unwrap();
        assert!(FileConfig::load(file.path()).is_err());
    }
}
