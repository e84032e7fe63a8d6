use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to an account. Roost never looks inside one; the
/// server's user directory is what gives it meaning.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<UserId> for UserId {
    fn as_ref(&self) -> &UserId {
        self
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A friend invitation from `from` to `to`, awaiting `to`'s decision.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct FriendRequest {
    pub from: UserId,
    pub to: UserId,
    pub status: RequestStatus,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// One entry of a user's request list, tagged with its direction relative
/// to that user.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "direction", rename_all = "lowercase")]
pub enum PendingRequest {
    /// Sent to the user; awaiting their response.
    Incoming { from: UserId },
    /// Sent by the user; awaiting the other side's response.
    Outgoing { to: UserId },
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct User {
    pub username: UserId,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct Post {
    pub id: u64,
    pub author: UserId,
    pub content: String,
    pub tags: BTreeSet<String>,
}

/// Response envelope for mutations with nothing better to return.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Msg {
    pub msg: String,
}
