// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the leaderboard API.

pub mod leaderboard;

pub use leaderboard::{Leaderboard, Member, StarLevel};
