// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - ranking, gating, and the HTTP clients driven by the poll loop.

pub mod gate;
pub mod leaderboard;
pub mod poller;
pub mod ranker;
pub mod spark;

pub use gate::should_notify;
pub use leaderboard::{FetchError, LeaderboardClient};
pub use poller::{CycleOutcome, PollState, Poller};
pub use ranker::{rank, render, RankedReport, RenderOptions};
pub use spark::{NotifyError, SparkClient};

use std::time::Duration;

/// Build the HTTP client shared by the leaderboard and messages clients.
///
/// Redirects are not followed: the leaderboard answers an expired session
/// with a redirect to the login page, which must surface as an error.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}
