// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking and report rendering.
//!
//! Members are ordered by local score, then stars, both descending. Members
//! tied on both keys are ordered by id so the output never depends on the
//! member map's iteration order.

use crate::models::{Leaderboard, Member};
use crate::time_utils::Timestamp;
use std::cmp::Ordering;

/// Ranked snapshot of a leaderboard.
#[derive(Debug, Clone)]
pub struct RankedReport {
    /// All members, best first (including members without stars)
    pub members: Vec<Member>,
    /// Most recent star across the whole board
    pub max_last_star: Timestamp,
}

/// Rendering policy for the report message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Header text
    pub title: String,
    /// Link the header to the leaderboard page
    pub link_header: bool,
    /// Append the global score for members that have one
    pub show_global_score: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Leaderboard 🎄".to_string(),
            link_header: true,
            show_global_score: true,
        }
    }
}

/// Rank all members of a leaderboard.
pub fn rank(board: &Leaderboard) -> RankedReport {
    let mut members: Vec<Member> = board.members.values().cloned().collect();
    members.sort_by(compare_members);

    let max_last_star = members
        .iter()
        .map(Member::last_star)
        .max()
        .unwrap_or(Timestamp::ZERO);

    RankedReport {
        members,
        max_last_star,
    }
}

fn compare_members(a: &Member, b: &Member) -> Ordering {
    b.local_score
        .cmp(&a.local_score)
        .then_with(|| b.stars.cmp(&a.stars))
        .then_with(|| a.id.cmp(&b.id))
}

/// Human-facing leaderboard page for a JSON endpoint URL.
pub fn display_url(source_url: &str) -> &str {
    source_url.strip_suffix(".json").unwrap_or(source_url)
}

/// Render the report as Markdown.
///
/// Members without stars are left out of the body.
pub fn render(report: &RankedReport, source_url: &str, options: &RenderOptions) -> String {
    let mut message = if options.link_header {
        format!(
            "### [{}]({})\n\n---\n",
            options.title,
            display_url(source_url)
        )
    } else {
        format!("### {}\n\n", options.title)
    };

    for member in report.members.iter().filter(|m| m.stars > 0) {
        message.push_str(&render_line(member, options));
        message.push('\n');
    }

    message
}

fn render_line(member: &Member, options: &RenderOptions) -> String {
    let mut line = format!(
        " 1. 📈 `{:03}` ⭐ `{:02}` – **{}**",
        member.local_score,
        member.stars,
        member.display_name()
    );
    if options.show_global_score && member.global_score > 0 {
        line.push_str(&format!(" (🌍 _{}_!)", member.global_score));
    }
    line
}
