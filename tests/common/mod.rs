// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use advent_leader::config::Config;
use advent_leader::models::{Leaderboard, Member};
use advent_leader::time_utils::{self, Timestamp};

/// Path of the leaderboard endpoint served by the mock server.
#[allow(dead_code)]
pub const BOARD_PATH: &str = "/2018/leaderboard/private/view/12345.json";

/// Path of the messages endpoint served by the mock server.
#[allow(dead_code)]
pub const MESSAGES_PATH: &str = "/v1/messages";

/// Load a JSON fixture from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name))
        .expect("Failed to read fixture - is tests/fixtures/ committed?")
}

/// The 2018 sample leaderboard.
#[allow(dead_code)]
pub fn sample_board() -> Leaderboard {
    Leaderboard::from_json(&fixture("leaderboard_2018.json"))
        .expect("Failed to decode leaderboard fixture")
}

/// Config pointing both endpoints at a mock server.
#[allow(dead_code)]
pub fn test_config(server_url: &str) -> Config {
    Config {
        url: format!("{}{}", server_url, BOARD_PATH),
        message_api: format!("{}{}", server_url, MESSAGES_PATH),
        http_timeout_secs: 5,
        ..Config::default()
    }
}

/// Build a member with the fields the ranker cares about.
#[allow(dead_code)]
pub fn member(id: &str, name: &str, local_score: u32, stars: u32, last_star: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        local_score,
        stars,
        last_star_ts: ts(last_star),
        ..Default::default()
    }
}

/// Build a leaderboard from members.
#[allow(dead_code)]
pub fn board(members: Vec<Member>) -> Leaderboard {
    Leaderboard {
        owner_id: "12345".to_string(),
        event: "2018".to_string(),
        members: members.into_iter().map(|m| (m.id.clone(), m)).collect(),
    }
}

/// Parse a timestamp in the API layout.
#[allow(dead_code)]
pub fn ts(text: &str) -> Timestamp {
    time_utils::parse(text).expect("valid test timestamp")
}

/// JSON body for a leaderboard whose only star was earned at `last_star`.
#[allow(dead_code)]
pub fn single_member_json(last_star: &str) -> String {
    serde_json::json!({
        "owner_id": "12345",
        "event": "2018",
        "members": {
            "12345": {
                "id": "12345",
                "name": "Roland",
                "stars": 1,
                "local_score": 10,
                "global_score": 0,
                "last_star_ts": last_star,
                "completion_day_level": {
                    "1": { "1": { "get_star_ts": last_star } }
                }
            }
        }
    })
    .to_string()
}
