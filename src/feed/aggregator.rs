//! Concurrent feed assembly.
//!
//! Every section is fetched as an independent task with its own
//! deadline. A slow or failing section degrades to an empty list; the
//! build as a whole only fails on an orchestration error.

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::feed::cleanup::{
    clean_section, exclude_ids, filter_english_hits, id_set, normalize_artist_sections,
};
use crate::model::{HomeFeed, ListenContext, SectionKind, Song};
use crate::scoring::{
    rank_listen_again, rank_new_releases, rank_quick_picks, rank_trending, QuickPickCandidate,
};
use crate::source::FeedSource;

#[derive(Debug, Error)]
pub enum FeedError {
    /// A section task aborted abnormally, e.g. it panicked. Collaborator
    /// errors never end up here; they degrade to empty sections.
    #[error("section task failed to complete: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub struct HomeFeedAggregator {
    source: Arc<dyn FeedSource>,
    config: FeedConfig,
}

impl HomeFeedAggregator {
    pub fn new(source: Arc<dyn FeedSource>, config: FeedConfig) -> Self {
        Self { source, config }
    }

    /// Build the feed for the current wall-clock moment.
    pub async fn build_home_feed(&self, session_seed: u64) -> Result<HomeFeed, FeedError> {
        let context = ListenContext::current();
        self.build_home_feed_at(session_seed, context).await
    }

    /// Build the feed at an explicit listen context. The context and
    /// seed together make the output fully deterministic for a given
    /// source snapshot.
    pub async fn build_home_feed_at(
        &self,
        session_seed: u64,
        context: ListenContext,
    ) -> Result<HomeFeed, FeedError> {
        let cfg = &self.config;
        let deadline = cfg.section_timeout;

        // Taste signals and the genre map feed several engines, so they
        // are fetched up front, before the section fan-out.
        let (signals, genres) = tokio::join!(
            fetch_or_default("taste_signals", deadline, self.source.taste_signals()),
            fetch_or_default("genre_map", deadline, self.source.genre_map()),
        );

        // Dispatch every section before awaiting any of them. Each
        // deadline starts here, at dispatch, so await order cannot
        // extend a slow section's time budget and total latency is
        // bounded by the slowest section, not their sum.
        let ranked_fetch = cfg.section_cap * 2;

        let listen_again_task = {
            let source = self.source.clone();
            spawn_section("listen_again", deadline, async move {
                let played = source.played_songs_with_stats().await?;
                Ok(rank_listen_again(played, &context))
            })
        };

        let quick_picks_task = {
            let source = self.source.clone();
            let limit = cfg.quick_picks_candidate_limit;
            spawn_section("quick_picks", deadline, async move {
                source.quick_pick_candidates(limit).await
            })
        };

        let trending_task = {
            let source = self.source.clone();
            let signals = signals.clone();
            let genres = genres.clone();
            spawn_section("trending", deadline, async move {
                let raw = source
                    .section_candidates(SectionKind::Trending, ranked_fetch)
                    .await?;
                Ok(rank_trending(raw, &signals, &genres))
            })
        };

        let new_releases_task = {
            let source = self.source.clone();
            let signals = signals.clone();
            let genres = genres.clone();
            spawn_section("new_releases", deadline, async move {
                let raw = source
                    .section_candidates(SectionKind::NewReleases, ranked_fetch)
                    .await?;
                Ok(rank_new_releases(raw, &signals, &genres))
            })
        };

        let english_hits_task = self.fetch_section_task(
            "english_hits",
            SectionKind::EnglishHits,
            cfg.english_hits_intermediate_cap,
        );
        let personalized_task = self.fetch_section_task(
            "personalized_for_you",
            SectionKind::PersonalizedMix,
            ranked_fetch,
        );
        let forgotten_task = self.fetch_section_task(
            "forgotten_favorites",
            SectionKind::ForgottenFavorites,
            ranked_fetch,
        );

        let artist_sections_task = {
            let source = self.source.clone();
            let limit = cfg.artist_section_limit * 2;
            spawn_section("artist_sections", deadline, async move {
                source.artist_sections(limit).await
            })
        };

        let listen_again = listen_again_task.await?;
        let quick_pick_candidates = quick_picks_task.await?;
        let trending_ranked = trending_task.await?;
        let new_releases_ranked = new_releases_task.await?;
        let english_hits_raw = english_hits_task.await?;
        let personalized_raw = personalized_task.await?;
        let forgotten_raw = forgotten_task.await?;
        let artist_sections_raw = artist_sections_task.await?;

        // Sequential post-processing over the settled sections.
        let listen_again = clean_section(listen_again, cfg.section_cap);
        let trending = clean_section(trending_ranked, cfg.section_cap);
        let new_releases = clean_section(new_releases_ranked, cfg.section_cap);

        let engine_picks = rank_quick_picks(
            quick_pick_candidates.clone(),
            &signals,
            &genres,
            cfg.quick_picks_target,
            session_seed,
        );
        let mut quick_picks = if engine_picks.is_empty() {
            debug!("quick picks engine yielded nothing, trying legacy ranking");
            legacy_quick_picks(quick_pick_candidates)
        } else {
            engine_picks
        };
        quick_picks = clean_section(quick_picks, cfg.quick_picks_target);
        if quick_picks.is_empty() {
            debug!("quick picks empty, substituting trending + new releases + listen again");
            let merged: Vec<Song> = trending
                .iter()
                .chain(new_releases.iter())
                .chain(listen_again.iter())
                .cloned()
                .collect();
            quick_picks = clean_section(merged, cfg.quick_picks_target);
        }

        let english_hits = filter_english_hits(english_hits_raw, cfg.section_cap);

        let forgotten_favorites = exclude_ids(
            clean_section(forgotten_raw, cfg.section_cap),
            &id_set(&listen_again),
        );

        let mut personalized_for_you = clean_section(personalized_raw, cfg.section_cap);
        if personalized_for_you.is_empty() {
            personalized_for_you = quick_picks.clone();
        }

        let artist_sections = normalize_artist_sections(
            artist_sections_raw,
            cfg.artist_section_limit,
            cfg.artist_section_song_cap,
        );

        let feed = HomeFeed {
            listen_again,
            quick_picks,
            forgotten_favorites,
            new_releases,
            trending,
            english_hits,
            personalized_for_you,
            artist_sections,
        };
        info!(sections = ?feed.section_sizes(), "home feed assembled");
        Ok(feed)
    }

    fn fetch_section_task(
        &self,
        section: &'static str,
        kind: SectionKind,
        limit: usize,
    ) -> JoinHandle<Vec<Song>> {
        let source = self.source.clone();
        spawn_section(section, self.config.section_timeout, async move {
            source.section_candidates(kind, limit).await
        })
    }
}

/// The pre-engine Quick Picks ordering: straight source-score ranking
/// with view count as the tiebreak.
fn legacy_quick_picks(mut candidates: Vec<QuickPickCandidate>) -> Vec<Song> {
    candidates.sort_by(|a, b| {
        b.source_score
            .partial_cmp(&a.source_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.song.view_count.cmp(&a.song.view_count))
    });
    candidates.into_iter().map(|c| c.song).collect()
}

/// Await a fetch with a deadline, substituting the empty default on
/// timeout or error.
async fn fetch_or_default<T, F>(stage: &'static str, deadline: Duration, fut: F) -> T
where
    T: Default,
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(Ok(value)) => value,
        Ok(Err(err)) => {
            warn!(stage, error = %err, "fetch failed, using empty default");
            T::default()
        }
        Err(_) => {
            warn!(stage, timeout_secs = deadline.as_secs(), "fetch timed out, using empty default");
            T::default()
        }
    }
}

/// Spawn one section fetch with its deadline counted from dispatch.
/// Timing out or failing drops only this section's in-flight work and
/// yields the empty default; joining the handle can only fail if the
/// task panicked.
fn spawn_section<T, F>(section: &'static str, deadline: Duration, fut: F) -> JoinHandle<T>
where
    T: Default + Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    tokio::spawn(async move {
        match tokio::time::timeout(deadline, fut).await {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => {
                warn!(section, error = %err, "section failed, substituting empty");
                T::default()
            }
            Err(_) => {
                warn!(section, timeout_secs = deadline.as_secs(), "section timed out, substituting empty");
                T::default()
            }
        }
    })
}
