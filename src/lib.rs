// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advent-Leader: post private leaderboard standings to a chat room
//!
//! This crate polls a private leaderboard JSON endpoint, ranks the members,
//! and posts a Markdown report to a Webex room whenever someone has earned a
//! new star since the last post.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
