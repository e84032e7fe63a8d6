use roost_common::UserId;
use serde::{Deserialize, Serialize};

use crate::{FriendError, Result};

/// Established friendships, in creation order.
///
/// An edge is an unordered pair: it is stored with the endpoints in
/// canonical order so `{a, b}` and `{b, a}` hit the same record. Once a
/// friendship exists, nobody is the initiator.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FriendGraph {
    edges: Vec<(UserId, UserId)>,
}

fn canonical<'a>(a: &'a UserId, b: &'a UserId) -> (&'a UserId, &'a UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl FriendGraph {
    pub fn add(&mut self, a: &UserId, b: &UserId) -> Result<()> {
        if a == b {
            return Err(FriendError::SelfFriend);
        }
        if self.contains(a, b) {
            return Err(FriendError::AlreadyFriends);
        }
        let (lo, hi) = canonical(a, b);
        self.edges.push((lo.clone(), hi.clone()));
        Ok(())
    }

    pub fn remove(&mut self, a: &UserId, b: &UserId) -> Result<()> {
        let (lo, hi) = canonical(a, b);
        let idx = self
            .edges
            .iter()
            .position(|(x, y)| x == lo && y == hi)
            .ok_or(FriendError::NotFriends)?;
        self.edges.remove(idx);
        Ok(())
    }

    /// Order-independent membership test.
    pub fn contains(&self, a: &UserId, b: &UserId) -> bool {
        let (lo, hi) = canonical(a, b);
        self.edges.iter().any(|(x, y)| x == lo && y == hi)
    }

    /// The other endpoint of every edge containing `user`, oldest first.
    pub fn neighbors<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a UserId> + 'a {
        self.edges.iter().filter_map(move |(x, y)| {
            if x == user {
                Some(y)
            } else if y == user {
                Some(x)
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> UserId {
        UserId::new(name)
    }

    #[test]
    fn edges_are_unordered() {
        let mut graph = FriendGraph::default();
        graph.add(&id("zoe"), &id("abe")).unwrap();

        assert!(graph.contains(&id("zoe"), &id("abe")));
        assert!(graph.contains(&id("abe"), &id("zoe")));
        assert_eq!(
            graph.add(&id("abe"), &id("zoe")).unwrap_err(),
            FriendError::AlreadyFriends
        );
    }

    #[test]
    fn self_edge_is_refused() {
        let mut graph = FriendGraph::default();
        assert_eq!(
            graph.add(&id("abe"), &id("abe")).unwrap_err(),
            FriendError::SelfFriend
        );
    }

    #[test]
    fn remove_is_order_independent_and_not_idempotent() {
        let mut graph = FriendGraph::default();
        graph.add(&id("zoe"), &id("abe")).unwrap();

        graph.remove(&id("abe"), &id("zoe")).unwrap();
        assert!(!graph.contains(&id("zoe"), &id("abe")));
        assert_eq!(
            graph.remove(&id("zoe"), &id("abe")).unwrap_err(),
            FriendError::NotFriends
        );
    }

    #[test]
    fn neighbors_come_back_in_creation_order() {
        let mut graph = FriendGraph::default();
        graph.add(&id("mia"), &id("zoe")).unwrap();
        graph.add(&id("abe"), &id("mia")).unwrap();
        graph.add(&id("zoe"), &id("abe")).unwrap();

        let mia = id("mia");
        let friends_of_mia: Vec<_> = graph.neighbors(&mia).collect();
        assert_eq!(friends_of_mia, vec![&id("zoe"), &id("abe")]);
    }
}
