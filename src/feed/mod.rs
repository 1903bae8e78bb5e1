mod aggregator;
mod cleanup;

pub use aggregator::{FeedError, HomeFeedAggregator};
pub use cleanup::{clean_section, exclude_ids, filter_english_hits, normalize_artist_sections};
