// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

use crate::config::ConfigError;
use crate::services::leaderboard::FetchError;
use crate::services::spark::NotifyError;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl AppError {
    /// Whether the error points at an expired leaderboard session cookie.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::Fetch(e) if e.is_session_expired())
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
