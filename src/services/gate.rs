// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Change gate: decides whether a snapshot warrants a notification.

use crate::time_utils::Timestamp;

/// Notify when a star arrived strictly after the last notification, or
/// always in debug mode.
pub fn should_notify(max_last_star: Timestamp, last_notified_at: Timestamp, debug: bool) -> bool {
    debug || max_last_star > last_notified_at
}
