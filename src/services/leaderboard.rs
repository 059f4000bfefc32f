// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard API client.
//!
//! Fetches the private leaderboard JSON using the account's `session` cookie.

use crate::models::Leaderboard;
use reqwest::header::COOKIE;
use reqwest::StatusCode;

/// Longest response body excerpt kept in errors.
const MAX_ERROR_BODY: usize = 512;

/// Client for one leaderboard endpoint.
#[derive(Clone)]
pub struct LeaderboardClient {
    http: reqwest::Client,
    url: String,
    session_cookie: String,
}

impl LeaderboardClient {
    pub fn new(http: reqwest::Client, url: String, session_cookie: String) -> Self {
        Self {
            http,
            url,
            session_cookie,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the current leaderboard snapshot.
    pub async fn fetch(&self) -> Result<Leaderboard, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .header(COOKIE, format!("session={}", self.session_cookie))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let body = response.text().await?;
        let board = Leaderboard::from_json(&body)?;

        tracing::debug!(
            owner_id = %board.owner_id,
            event = %board.event,
            members = board.members.len(),
            "Fetched leaderboard"
        );
        Ok(board)
    }
}

/// Truncate a body on a character boundary.
pub(crate) fn excerpt(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

/// Errors from fetching the leaderboard.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Leaderboard request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Leaderboard returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode leaderboard JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether the failure looks like an expired or invalid session cookie.
    ///
    /// The site answers those with a redirect to the login page or a 4xx.
    pub fn is_session_expired(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                status.is_redirection()
                    || matches!(
                        *status,
                        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
                    )
            }
            _ => false,
        }
    }
}
