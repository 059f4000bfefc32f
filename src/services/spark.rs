// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webex (Spark) messages API client for posting reports to a room.

use crate::services::leaderboard::excerpt;
use reqwest::StatusCode;
use serde::Serialize;

/// Default messages endpoint.
pub const DEFAULT_MESSAGE_API: &str = "https://api.ciscospark.com/v1/messages";

/// Message body for the messages API.
#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    #[serde(rename = "roomId")]
    room_id: &'a str,
    markdown: &'a str,
}

/// Bot client bound to a single room.
#[derive(Clone)]
pub struct SparkClient {
    http: reqwest::Client,
    api_url: String,
    bot_token: String,
    room_id: String,
}

impl SparkClient {
    pub fn new(http: reqwest::Client, api_url: String, bot_token: String, room_id: String) -> Self {
        Self {
            http,
            api_url,
            bot_token,
            room_id,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Post a Markdown message to the room.
    pub async fn post(&self, markdown: &str) -> Result<StatusCode, NotifyError> {
        let body = MessageRequest {
            room_id: &self.room_id,
            markdown,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await
            .map_err(|source| NotifyError::Request {
                room_id: self.room_id.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status,
                room_id: self.room_id.clone(),
                body: excerpt(&body),
            });
        }

        Ok(status)
    }
}

/// Errors from posting a message.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Message request to room {room_id} failed: {source}")]
    Request {
        room_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Messages API returned HTTP {status} for room {room_id}: {body}")]
    Status {
        status: StatusCode,
        room_id: String,
        body: String,
    },
}

impl NotifyError {
    /// HTTP status, if the API answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            NotifyError::Status { status, .. } => Some(*status),
            NotifyError::Request { source, .. } => source.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_request_field_names() {
        let body = MessageRequest {
            room_id: "room-1",
            markdown: "### hi",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "roomId": "room-1", "markdown": "### hi" }));
    }

    #[test]
    fn test_status_error_display() {
        let err = NotifyError::Status {
            status: StatusCode::UNAUTHORIZED,
            room_id: "room-1".to_string(),
            body: "bad token".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            err.to_string(),
            "Messages API returned HTTP 401 Unauthorized for room room-1: bad token"
        );
    }
}
