//! Transient, per-request value types for the feed core.

mod feed;
mod signals;
mod song;
mod stats;

pub use feed::{ArtistSection, HomeFeed, SectionKind};
pub use signals::{GenreMap, TasteSignals};
pub use song::{ContentType, Song};
pub use stats::{day_key, ListenContext, PlaybackStat, TimeOfDay};
