//! Per-user notifications raised by the social write paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FriendRequest,
    PostLike,
    Comment,
    Achievement,
}

impl NotificationKind {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FriendRequest => "friend_request",
            Self::PostLike => "post_like",
            Self::Comment => "comment",
            Self::Achievement => "achievement",
        }
    }

    /// Parse the storage representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "friend_request" => Some(Self::FriendRequest),
            "post_like" => Some(Self::PostLike),
            "comment" => Some(Self::Comment),
            "achievement" => Some(Self::Achievement),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification delivered to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Creation payload used by the write paths that raise notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NotificationKind::FriendRequest, "friend_request")]
    #[case(NotificationKind::PostLike, "post_like")]
    #[case(NotificationKind::Comment, "comment")]
    #[case(NotificationKind::Achievement, "achievement")]
    fn kind_round_trips(#[case] kind: NotificationKind, #[case] raw: &str) {
        assert_eq!(kind.as_str(), raw);
        assert_eq!(NotificationKind::parse(raw), Some(kind));
    }
}
