// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard snapshot as returned by the private leaderboard JSON endpoint.

use crate::time_utils::Timestamp;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

/// A leaderboard snapshot for one owner/event pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leaderboard {
    #[serde(default, deserialize_with = "string_or_number")]
    pub owner_id: String,
    /// Event year, e.g. "2018"
    #[serde(default)]
    pub event: String,
    /// Members keyed by member id
    #[serde(default, deserialize_with = "members_by_key")]
    pub members: HashMap<String, Member>,
}

impl Leaderboard {
    /// Decode a leaderboard from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One participant on the leaderboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Member {
    /// Falls back to the member's key in `members` when absent
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name; anonymous users have none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub local_score: u32,
    #[serde(default)]
    pub global_score: u32,
    #[serde(default)]
    pub last_star_ts: Timestamp,
    /// Day -> level ("1" or "2") -> star record
    #[serde(default, rename = "completion_day_level")]
    pub completion_days: BTreeMap<String, BTreeMap<String, StarLevel>>,
}

/// Completion record for one level of one day.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StarLevel {
    #[serde(default, rename = "get_star_ts")]
    pub star_ts: Timestamp,
}

impl Member {
    /// Name to show in reports, falling back to the member id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Number of days with both levels completed.
    pub fn completed_days(&self) -> usize {
        self.completion_days
            .values()
            .filter(|levels| levels.contains_key("2"))
            .count()
    }

    /// Newest star time recorded in the per-day completion data.
    pub fn latest_completion(&self) -> Timestamp {
        self.completion_days
            .values()
            .flat_map(|levels| levels.values())
            .map(|level| level.star_ts)
            .max()
            .unwrap_or(Timestamp::ZERO)
    }

    /// Best-known time of the member's most recent star.
    ///
    /// Uses `last_star_ts`, or the completion data when that field was
    /// missing or malformed.
    pub fn last_star(&self) -> Timestamp {
        if self.last_star_ts.is_zero() {
            self.latest_completion()
        } else {
            self.last_star_ts
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn members_by_key<'de, D>(deserializer: D) -> Result<HashMap<String, Member>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut members = HashMap::<String, Member>::deserialize(deserializer)?;
    for (key, member) in members.iter_mut() {
        if member.id.is_empty() {
            member.id = key.clone();
        }
    }
    Ok(members)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(i64),
}

/// Ids are strings in older payloads and integers in newer ones.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
