//! "Listen Again" scoring: how likely is the user to want this replay.
//!
//! A composite of six factors over per-song playback statistics, each
//! normalized to [0,1] before weighting. The skip factor enters with a
//! negative weight; the composite is floored at zero.

use tracing::trace;

use crate::model::{ListenContext, PlaybackStat, Song};

use super::math::{decay, log_compress, weighted_sum};

const RECENCY_WEIGHT: f64 = 0.35;
const FREQUENCY_WEIGHT: f64 = 0.25;
const COMPLETION_WEIGHT: f64 = 0.15;
const CONTEXT_WEIGHT: f64 = 0.10;
const SKIP_WEIGHT: f64 = -0.10;
const TEMPORAL_WEIGHT: f64 = 0.05;

/// Recency half-life: seven days, in hours.
const RECENCY_HALF_LIFE_HOURS: f64 = 168.0;

/// Frequency compression cap for the 90-day play count.
const FREQUENCY_CAP: f64 = 50.0;

/// Songs unplayed for longer than this are out of replay range.
const MAX_DAYS_SINCE_LAST_PLAY: i64 = 90;

/// Burnout suppression: heavily played in the prior week, silent this
/// week, and last played recently — assume temporary fatigue.
const BURNOUT_PRIOR_WEEK_THRESHOLD: u32 = 15;
const BURNOUT_COOLDOWN_DAYS: i64 = 14;

/// Whether a song's history qualifies it for replay scoring at all.
pub fn is_eligible(stats: &PlaybackStat, context: &ListenContext) -> bool {
    if stats.qualified_listen_count < 1 {
        return false;
    }

    let days_since = stats.days_since_last_play(context.now);
    if days_since > MAX_DAYS_SINCE_LAST_PLAY {
        return false;
    }

    let burned_out = stats.play_count_7d_prior > BURNOUT_PRIOR_WEEK_THRESHOLD
        && stats.play_count_7d == 0
        && days_since < BURNOUT_COOLDOWN_DAYS;
    !burned_out
}

/// Composite replay score for one song. Never negative.
pub fn score_listen_again(stats: &PlaybackStat, context: &ListenContext) -> f64 {
    let recency = decay(
        stats.hours_since_last_play(context.now),
        RECENCY_HALF_LIFE_HOURS,
    );
    let frequency = log_compress(stats.play_count_90d as f64, FREQUENCY_CAP);
    let completion = if stats.total_plays == 0 {
        0.0
    } else {
        stats.completed_count as f64 / stats.total_plays as f64
    };
    let context_boost = stats.time_of_day_share(context.time_of_day);
    let skip_penalty = if stats.play_count_30d == 0 {
        0.0
    } else {
        (stats.skip_count_30d as f64 / stats.play_count_30d as f64).min(1.0)
    };
    let temporal = stats.day_of_week_share(context.weekday);

    let score = weighted_sum(&[
        (RECENCY_WEIGHT, recency),
        (FREQUENCY_WEIGHT, frequency),
        (COMPLETION_WEIGHT, completion),
        (CONTEXT_WEIGHT, context_boost),
        (SKIP_WEIGHT, skip_penalty),
        (TEMPORAL_WEIGHT, temporal),
    ])
    .max(0.0);

    trace!(
        recency,
        frequency,
        completion,
        context_boost,
        skip_penalty,
        temporal,
        score,
        "listen-again factors"
    );

    score
}

/// Gate, score, and rank a played-songs list, best first.
pub fn rank_listen_again(
    songs: Vec<(Song, PlaybackStat)>,
    context: &ListenContext,
) -> Vec<Song> {
    let mut scored: Vec<(Song, f64)> = songs
        .into_iter()
        .filter(|(_, stats)| is_eligible(stats, context))
        .map(|(song, stats)| {
            let score = score_listen_again(&stats, context);
            (song, score)
        })
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(song, _)| song).collect()
}
