//! Latin-script language heuristics.
//!
//! Real language identification lives outside this crate; the engines
//! use the share of Latin-script letters in a song's title+artist text
//! as a stand-in, with fixed thresholds that must not drift between the
//! engines that share them.

use lazy_static::lazy_static;

/// Threshold for the per-song language-match factor (Quick Picks,
/// Trending, New Releases).
pub const LATIN_MATCH_THRESHOLD: f64 = 0.80;

/// Stricter threshold used by the English-hits section filter.
pub const ENGLISH_HITS_THRESHOLD: f64 = 0.85;

lazy_static! {
    /// Language markers that disqualify a song from the English-hits
    /// section when they appear in its title+artist text.
    pub static ref NON_ENGLISH_MARKERS: Vec<&'static str> = vec![
        "hindi", "punjabi", "tamil", "telugu", "bhojpuri", "marathi",
        "gujarati", "kannada", "malayalam", "bengali", "bangla", "odia",
        "desi", "bollywood", "tollywood",
    ];
}

/// Share of letters in `text` that are Latin script (a-z plus Latin-1
/// and Latin Extended ranges). Non-letters are ignored. Returns 1.0 for
/// text with no letters at all, which callers treat as "no evidence
/// against".
pub fn latin_letter_ratio(text: &str) -> f64 {
    let mut letters = 0u32;
    let mut latin = 0u32;
    for c in text.chars() {
        if c.is_alphabetic() {
            letters += 1;
            if is_latin_letter(c) {
                latin += 1;
            }
        }
    }
    if letters == 0 {
        return 1.0;
    }
    latin as f64 / letters as f64
}

fn is_latin_letter(c: char) -> bool {
    matches!(c,
        'a'..='z' | 'A'..='Z'
        | '\u{00C0}'..='\u{024F}' // Latin-1 supplement + Latin Extended-A/B
    )
}

/// The per-song language-match heuristic: ≥80% Latin-script letters in
/// the combined title+artist text.
pub fn looks_latin_script(title: &str, artist: &str) -> bool {
    latin_letter_ratio(&format!("{} {}", title, artist)) >= LATIN_MATCH_THRESHOLD
}

/// English-hits eligibility: no non-English marker substring and ≥85%
/// Latin-script letters.
pub fn passes_english_filter(title: &str, artist: &str) -> bool {
    let combined = format!("{} {}", title, artist).to_lowercase();
    if NON_ENGLISH_MARKERS.iter().any(|m| combined.contains(m)) {
        return false;
    }
    latin_letter_ratio(&combined) >= ENGLISH_HITS_THRESHOLD
}
