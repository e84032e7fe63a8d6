//! Friend requests and the friendship graph.
//!
//! [`Friendships`] owns two collections: a [`RequestLedger`] of pending
//! requests keyed by the ordered `(from, to)` pair, and a [`FriendGraph`]
//! of established edges keyed by the unordered pair. Direction matters
//! while a request is pending, because it decides who may accept, reject
//! or withdraw; it is deliberately erased once a friendship exists.
//!
//! Per unordered pair the state machine is
//! `no relation -> pending -> friends`, where a pending request falls
//! back to no relation on rejection or withdrawal and a friendship falls
//! back to no relation on removal. Nothing is retained once a pair is
//! back at no relation.
//!
//! Every operation takes `&mut self`, so mutations are single-writer by
//! construction; callers that share a `Friendships` across threads put it
//! behind a lock. User references are opaque: existence checks belong to
//! the layer that resolves human-facing names into [`UserId`]s.

mod error;
mod graph;
mod ledger;

pub use error::FriendError;
pub use graph::FriendGraph;
pub use ledger::RequestLedger;

use roost_common::{FriendRequest, PendingRequest, UserId};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, FriendError>;

/// Pending requests plus established friendships, behind one owner so the
/// pair invariants cannot be violated from outside.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Friendships {
    ledger: RequestLedger,
    graph: FriendGraph,
}

impl Friendships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a pending request from `from` to `to`.
    pub fn send_request(&mut self, from: &UserId, to: &UserId) -> Result<()> {
        if self.graph.contains(from, to) {
            return Err(FriendError::AlreadyFriends);
        }
        self.ledger.add(from, to)
    }

    /// Withdraws a request the caller sent. The ordered pair must match
    /// exactly: the recipient cannot withdraw, only reject.
    pub fn withdraw_request(&mut self, from: &UserId, to: &UserId) -> Result<()> {
        self.ledger.remove(from, to).map(|_| ())
    }

    /// `to` accepts the request sent `from -> to`, converting it into an
    /// edge. The request record is consumed either way.
    pub fn accept_request(&mut self, from: &UserId, to: &UserId) -> Result<()> {
        if self.ledger.find(from, to).is_none() {
            return Err(FriendError::RequestNotFound);
        }
        if self.graph.contains(from, to) {
            return Err(FriendError::InconsistentState);
        }
        self.ledger.remove(from, to)?;
        self.graph.add(from, to)
    }

    /// `to` declines the request sent `from -> to`. No edge is created and
    /// the pair returns to having no relation.
    pub fn reject_request(&mut self, from: &UserId, to: &UserId) -> Result<()> {
        self.ledger.remove(from, to).map(|_| ())
    }

    /// Dissolves an existing friendship; either party may call, in either
    /// argument order.
    pub fn remove_friend(&mut self, a: &UserId, b: &UserId) -> Result<()> {
        self.graph.remove(a, b)
    }

    pub fn are_friends(&self, a: &UserId, b: &UserId) -> bool {
        self.graph.contains(a, b)
    }

    /// Everyone with an established edge to `user`, oldest friendship
    /// first.
    pub fn friends_of<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a UserId> + 'a {
        self.graph.neighbors(user)
    }

    /// Pending requests involving `user`, oldest first, each tagged with
    /// its direction so the caller can tell "awaiting my response" from
    /// "awaiting theirs".
    pub fn requests_for<'a>(
        &'a self,
        user: &'a UserId,
    ) -> impl Iterator<Item = PendingRequest> + 'a {
        self.ledger.involving(user).map(move |request| {
            if request.to == *user {
                PendingRequest::Incoming {
                    from: request.from.clone(),
                }
            } else {
                PendingRequest::Outgoing {
                    to: request.to.clone(),
                }
            }
        })
    }

    /// Raw pending records involving `user`, for workflows that need the
    /// exact ordered pairs (account deletion enumerates these to tear a
    /// user's relationship state down).
    pub fn requests_involving<'a>(
        &'a self,
        user: &'a UserId,
    ) -> impl Iterator<Item = &'a FriendRequest> + 'a {
        self.ledger.involving(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> UserId {
        UserId::new(name)
    }

    fn requests(friends: &Friendships, user: &UserId) -> Vec<PendingRequest> {
        friends.requests_for(user).collect()
    }

    fn friend_list(friends: &Friendships, user: &UserId) -> Vec<UserId> {
        friends.friends_of(user).cloned().collect()
    }

    #[test]
    fn send_request_shows_up_for_both_sides() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();

        assert_eq!(
            requests(&friends, &id("u1")),
            vec![PendingRequest::Outgoing { to: id("u2") }]
        );
        assert_eq!(
            requests(&friends, &id("u2")),
            vec![PendingRequest::Incoming { from: id("u1") }]
        );
    }

    #[test]
    fn duplicate_request_is_refused_regardless_of_direction() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();

        assert_eq!(
            friends.send_request(&id("u1"), &id("u2")),
            Err(FriendError::DuplicateRequest)
        );
        assert_eq!(
            friends.send_request(&id("u2"), &id("u1")),
            Err(FriendError::DuplicateRequest)
        );
    }

    #[test]
    fn self_request_is_refused_and_nothing_is_recorded() {
        let mut friends = Friendships::new();
        assert_eq!(
            friends.send_request(&id("u1"), &id("u1")),
            Err(FriendError::SelfRequest)
        );
        assert!(requests(&friends, &id("u1")).is_empty());
    }

    #[test]
    fn accept_establishes_the_edge_and_consumes_the_request() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();
        friends.accept_request(&id("u1"), &id("u2")).unwrap();

        assert!(friends.are_friends(&id("u1"), &id("u2")));
        assert!(friends.are_friends(&id("u2"), &id("u1")));
        assert!(requests(&friends, &id("u1")).is_empty());
        assert_eq!(
            friends.accept_request(&id("u1"), &id("u2")),
            Err(FriendError::RequestNotFound)
        );
    }

    #[test]
    fn accept_requires_the_recipient_side_ordering() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();

        // arguments reversed: there is no request u2 -> u1
        assert_eq!(
            friends.accept_request(&id("u2"), &id("u1")),
            Err(FriendError::RequestNotFound)
        );
        assert!(!friends.are_friends(&id("u1"), &id("u2")));
    }

    #[test]
    fn reject_returns_the_pair_to_no_relation() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();
        friends.reject_request(&id("u1"), &id("u2")).unwrap();

        assert!(!friends.are_friends(&id("u1"), &id("u2")));
        assert!(requests(&friends, &id("u2")).is_empty());

        // no tombstone: the requester may try again
        friends.send_request(&id("u1"), &id("u2")).unwrap();
    }

    #[test]
    fn withdraw_is_ordering_exact() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();

        // the recipient cannot withdraw what they did not send
        assert_eq!(
            friends.withdraw_request(&id("u2"), &id("u1")),
            Err(FriendError::RequestNotFound)
        );
        friends.withdraw_request(&id("u1"), &id("u2")).unwrap();
        assert!(requests(&friends, &id("u2")).is_empty());
    }

    #[test]
    fn sending_to_an_existing_friend_is_refused() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();
        friends.accept_request(&id("u1"), &id("u2")).unwrap();

        assert_eq!(
            friends.send_request(&id("u2"), &id("u1")),
            Err(FriendError::AlreadyFriends)
        );
    }

    #[test]
    fn remove_friend_is_symmetric_and_fails_the_second_time() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();
        friends.accept_request(&id("u1"), &id("u2")).unwrap();

        friends.remove_friend(&id("u2"), &id("u1")).unwrap();
        assert!(!friends.are_friends(&id("u1"), &id("u2")));
        assert_eq!(
            friends.remove_friend(&id("u1"), &id("u2")),
            Err(FriendError::NotFriends)
        );

        // removal clears the way for a fresh request
        friends.send_request(&id("u2"), &id("u1")).unwrap();
    }

    #[test]
    fn friend_lists_follow_creation_order() {
        let mut friends = Friendships::new();
        for other in ["u2", "u3", "u4"] {
            friends.send_request(&id("u1"), &id(other)).unwrap();
            friends.accept_request(&id("u1"), &id(other)).unwrap();
        }

        assert_eq!(
            friend_list(&friends, &id("u1")),
            vec![id("u2"), id("u3"), id("u4")]
        );
        assert_eq!(friend_list(&friends, &id("u3")), vec![id("u1")]);
    }

    #[test]
    fn accept_on_corrupted_state_reports_inconsistency_without_mutating() {
        let mut friends = Friendships::new();
        // force the invariant violation the manager normally prevents
        friends.ledger.add(&id("u1"), &id("u2")).unwrap();
        friends.graph.add(&id("u1"), &id("u2")).unwrap();

        assert_eq!(
            friends.accept_request(&id("u1"), &id("u2")),
            Err(FriendError::InconsistentState)
        );
        // the pending record is still there, untouched
        assert_eq!(friends.requests_involving(&id("u1")).count(), 1);
    }

    #[test]
    fn state_survives_a_serde_round_trip() {
        let mut friends = Friendships::new();
        friends.send_request(&id("u1"), &id("u2")).unwrap();
        friends.send_request(&id("u3"), &id("u1")).unwrap();
        friends.accept_request(&id("u3"), &id("u1")).unwrap();

        let json = serde_json::to_string(&friends).unwrap();
        let restored: Friendships = serde_json::from_str(&json).unwrap();

        assert!(restored.are_friends(&id("u1"), &id("u3")));
        assert_eq!(
            requests(&restored, &id("u2")),
            vec![PendingRequest::Incoming { from: id("u1") }]
        );
    }
}
