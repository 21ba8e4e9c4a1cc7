//! Friendship rows and their three-state status domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::User;

/// Status of a directed friendship request.
///
/// `Blocked` is part of the stored domain but no operation currently sets or
/// checks it; rejection deletes the row instead of recording a terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Blocked,
}

impl FriendshipStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Blocked => "blocked",
        }
    }

    /// Parse the storage representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }
}

impl std::fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed friendship row from requester to addressee.
///
/// Flattened into [`PendingFriendRequest`], so unknown-field rejection is
/// left to the enclosing payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Friendship {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An incoming pending request joined with the requesting user, as listed
/// for the addressee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingFriendRequest {
    #[serde(flatten)]
    pub friendship: Friendship,
    pub requester: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FriendshipStatus::Pending, "pending")]
    #[case(FriendshipStatus::Accepted, "accepted")]
    #[case(FriendshipStatus::Blocked, "blocked")]
    fn status_round_trips(#[case] status: FriendshipStatus, #[case] raw: &str) {
        assert_eq!(status.as_str(), raw);
        assert_eq!(FriendshipStatus::parse(raw), Some(status));
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        assert_eq!(FriendshipStatus::parse("declined"), None);
    }
}
