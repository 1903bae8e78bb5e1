//! Per-song playback statistics derived from listening history.
//!
//! Stats are recomputed fresh per request by the history collaborator;
//! nothing in here is cached by the feed core.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse time-of-day buckets used for contextual scoring.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket an hour of day: [0,6) night, [6,12) morning,
    /// [12,17) afternoon, [17,24) evening.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }
}

/// Three-letter lowercase day key (`mon`..`sun`) used in the day-of-week
/// distribution maps.
pub fn day_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Listening-history statistics for a single song.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlaybackStat {
    /// Unix timestamp (seconds) of the most recent play.
    pub last_played_at: i64,
    pub play_count_90d: u32,
    /// Plays that ran to completion, across all time.
    pub completed_count: u32,
    pub total_plays: u32,
    pub skip_count_30d: u32,
    pub play_count_30d: u32,
    pub play_count_7d: u32,
    /// Plays in the 7-day window before the most recent 7 days.
    pub play_count_7d_prior: u32,
    /// Plays long enough to count as genuine engagement.
    pub qualified_listen_count: u32,
    /// Play counts keyed by time-of-day bucket.
    #[serde(default)]
    pub time_of_day_distribution: HashMap<TimeOfDay, u32>,
    /// Play counts keyed by 3-letter day key (`mon`..`sun`).
    #[serde(default)]
    pub day_of_week_distribution: HashMap<String, u32>,
}

impl PlaybackStat {
    /// Whole days elapsed since the last play, relative to `now`.
    pub fn days_since_last_play(&self, now: DateTime<Utc>) -> i64 {
        (now.timestamp() - self.last_played_at) / 86_400
    }

    /// Hours elapsed since the last play, relative to `now`.
    pub fn hours_since_last_play(&self, now: DateTime<Utc>) -> f64 {
        (now.timestamp() - self.last_played_at) as f64 / 3600.0
    }

    /// Share of plays falling in the given time-of-day bucket.
    pub fn time_of_day_share(&self, bucket: TimeOfDay) -> f64 {
        let total: u32 = self.time_of_day_distribution.values().sum();
        if total == 0 {
            return 0.0;
        }
        let matching = self
            .time_of_day_distribution
            .get(&bucket)
            .copied()
            .unwrap_or(0);
        matching as f64 / total as f64
    }

    /// Share of plays falling on the given weekday.
    pub fn day_of_week_share(&self, weekday: Weekday) -> f64 {
        let total: u32 = self.day_of_week_distribution.values().sum();
        if total == 0 {
            return 0.0;
        }
        let matching = self
            .day_of_week_distribution
            .get(day_key(weekday))
            .copied()
            .unwrap_or(0);
        matching as f64 / total as f64
    }
}

/// The temporal context a scoring pass runs in. Derived once per request
/// so a single feed build sees one consistent "now".
#[derive(Clone, Copy, Debug)]
pub struct ListenContext {
    pub now: DateTime<Utc>,
    pub time_of_day: TimeOfDay,
    pub weekday: Weekday,
}

impl ListenContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            time_of_day: TimeOfDay::from_hour(now.hour()),
            weekday: now.weekday(),
        }
    }

    pub fn current() -> Self {
        Self::at(Utc::now())
    }
}
