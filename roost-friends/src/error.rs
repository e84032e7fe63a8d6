use thiserror::Error;

/// Everything a friendship operation can refuse to do.
///
/// Every variant is detected before any state changes, so a failed call
/// leaves the ledger and graph untouched. `InconsistentState` is the one
/// kind that is not a caller mistake: it means a pending request and an
/// established friendship coexist for the same pair, which can only come
/// from corrupted storage.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FriendError {
    #[error("cannot send a friend request to yourself")]
    SelfRequest,

    #[error("cannot be friends with yourself")]
    SelfFriend,

    #[error("a friend request between these users is already pending")]
    DuplicateRequest,

    #[error("users are already friends")]
    AlreadyFriends,

    #[error("friend request not found")]
    RequestNotFound,

    #[error("users are not friends")]
    NotFriends,

    #[error("a pending request and an established friendship exist for the same pair")]
    InconsistentState,
}
