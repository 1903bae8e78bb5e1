//! Pure scoring and ranking engines.
//!
//! Everything in here is synchronous and side-effect free: engines read
//! immutable candidate lists and taste signals and return new ranked
//! lists. Concurrency lives in `crate::feed`.

pub mod diversity;
pub mod language;
pub mod listen_again;
pub mod math;
pub mod new_releases;
pub mod quick_picks;
pub mod trending;

pub use listen_again::{is_eligible, rank_listen_again, score_listen_again};
pub use new_releases::{rank_new_releases, score_new_release};
pub use quick_picks::{rank_quick_picks, CandidateSource, QuickPickCandidate, ScoredCandidate};
pub use trending::{rank_trending, RankedTrendingItem};
