// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Poll loop.
//!
//! Each cycle:
//! 1. Fetch the leaderboard
//! 2. Rank members and find the newest star
//! 3. Gate on whether that star is newer than the last notification
//! 4. Render and post the report (if the gate opened)
//! 5. Sleep until the next cycle
//!
//! The gate compares against the wall-clock time of the previous post, not
//! against the newest star already reported.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::gate::should_notify;
use crate::services::ranker::{rank, render, RenderOptions};
use crate::services::{build_http_client, LeaderboardClient, SparkClient};
use crate::time_utils::Timestamp;
use std::future::Future;
use std::time::Duration;

/// State carried from one cycle to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    /// When the last report was posted (process start before the first post)
    pub last_notified_at: Timestamp,
}

impl PollState {
    pub fn starting_at(last_notified_at: Timestamp) -> Self {
        Self { last_notified_at }
    }

    /// Record a post made at `now`. Never moves backwards.
    pub fn advance(&mut self, now: Timestamp) {
        self.last_notified_at = self.last_notified_at.max(now);
    }
}

/// What a single cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No star newer than the last notification.
    Unchanged { max_last_star: Timestamp },
    /// A report was sent; `delivered` is false when the messages API failed.
    Notified {
        max_last_star: Timestamp,
        delivered: bool,
    },
}

/// Drives the fetch/rank/gate/notify cycle.
pub struct Poller {
    leaderboard: LeaderboardClient,
    spark: SparkClient,
    render_options: RenderOptions,
    debug: bool,
    interval: Duration,
    state: PollState,
}

impl Poller {
    /// Create a poller whose state starts at the current time.
    pub fn new(config: &Config) -> Result<Self> {
        let http = build_http_client(config.http_timeout()).map_err(AppError::HttpClient)?;
        Ok(Self::with_client(config, http))
    }

    /// Create a poller using an existing HTTP client.
    pub fn with_client(config: &Config, http: reqwest::Client) -> Self {
        Self {
            leaderboard: LeaderboardClient::new(
                http.clone(),
                config.url.clone(),
                config.cookie.clone(),
            ),
            spark: SparkClient::new(
                http,
                config.message_api.clone(),
                config.bot_token.clone(),
                config.room_id.clone(),
            ),
            render_options: config.render_options(),
            debug: config.debug,
            interval: config.poll_interval(),
            state: PollState::starting_at(Timestamp::now()),
        }
    }

    /// Replace the starting state.
    pub fn with_state(mut self, state: PollState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Run one fetch/rank/gate/notify cycle.
    ///
    /// Fetch failures are returned. Post failures are logged and the state
    /// still advances, so a broken room does not cause a post every cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let board = self.leaderboard.fetch().await?;
        let report = rank(&board);
        let max_last_star = report.max_last_star;

        let notify = should_notify(max_last_star, self.state.last_notified_at, self.debug);
        tracing::info!(
            members = report.members.len(),
            max_last_star = %max_last_star,
            last_notified_at = %self.state.last_notified_at,
            notify,
            "Leaderboard checked"
        );

        if !notify {
            return Ok(CycleOutcome::Unchanged { max_last_star });
        }

        let message = render(&report, self.leaderboard.url(), &self.render_options);
        if self.debug {
            println!("{}", message);
        }

        let delivered = match self.spark.post(&message).await {
            Ok(status) => {
                tracing::info!(
                    status = status.as_u16(),
                    room_id = %self.spark.room_id(),
                    "Report posted"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    status = ?e.status().map(|s| s.as_u16()),
                    room_id = %self.spark.room_id(),
                    "Failed to post report"
                );
                false
            }
        };

        self.state.advance(Timestamp::now());
        Ok(CycleOutcome::Notified {
            max_last_star,
            delivered,
        })
    }

    /// Run cycles until `shutdown` completes or a fetch fails.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping poll loop");
                    return Ok(());
                }
                result = self.run_cycle() => {
                    result?;
                }
            }

            tracing::debug!(seconds = self.interval.as_secs(), "Sleeping until next cycle");
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping poll loop");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
