use roost_common::{FriendRequest, RequestStatus, UserId};
use serde::{Deserialize, Serialize};

use crate::{FriendError, Result};

/// Pending friend requests, in creation order.
///
/// Records are keyed by the ordered `(from, to)` pair; the direction
/// decides who may accept, reject or withdraw. At most one pending
/// request exists for an unordered pair, regardless of direction.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RequestLedger {
    requests: Vec<FriendRequest>,
}

impl RequestLedger {
    pub fn add(&mut self, from: &UserId, to: &UserId) -> Result<()> {
        if from == to {
            return Err(FriendError::SelfRequest);
        }
        if self.between(from, to).is_some() {
            return Err(FriendError::DuplicateRequest);
        }
        self.requests.push(FriendRequest {
            from: from.clone(),
            to: to.clone(),
            status: RequestStatus::Pending,
        });
        Ok(())
    }

    /// Looks up the exact ordered pair.
    pub fn find(&self, from: &UserId, to: &UserId) -> Option<&FriendRequest> {
        self.requests
            .iter()
            .find(|r| r.from == *from && r.to == *to)
    }

    /// Looks up the pair in either direction.
    fn between(&self, a: &UserId, b: &UserId) -> Option<&FriendRequest> {
        self.requests
            .iter()
            .find(|r| (r.from == *a && r.to == *b) || (r.from == *b && r.to == *a))
    }

    /// Deletes the exact ordered pair and returns the record.
    pub fn remove(&mut self, from: &UserId, to: &UserId) -> Result<FriendRequest> {
        let idx = self
            .requests
            .iter()
            .position(|r| r.from == *from && r.to == *to)
            .ok_or(FriendError::RequestNotFound)?;
        Ok(self.requests.remove(idx))
    }

    /// All pending requests where `user` is either endpoint, oldest first.
    pub fn involving<'a>(
        &'a self,
        user: &'a UserId,
    ) -> impl Iterator<Item = &'a FriendRequest> + 'a {
        self.requests
            .iter()
            .filter(move |r| r.from == *user || r.to == *user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> UserId {
        UserId::new(name)
    }

    #[test]
    fn add_and_find_is_direction_exact() {
        let mut ledger = RequestLedger::default();
        ledger.add(&id("ana"), &id("ben")).unwrap();

        assert!(ledger.find(&id("ana"), &id("ben")).is_some());
        assert!(ledger.find(&id("ben"), &id("ana")).is_none());
    }

    #[test]
    fn duplicate_is_refused_in_both_directions() {
        let mut ledger = RequestLedger::default();
        ledger.add(&id("ana"), &id("ben")).unwrap();

        assert_eq!(
            ledger.add(&id("ana"), &id("ben")),
            Err(FriendError::DuplicateRequest)
        );
        assert_eq!(
            ledger.add(&id("ben"), &id("ana")),
            Err(FriendError::DuplicateRequest)
        );
    }

    #[test]
    fn self_request_is_refused_and_leaves_no_record() {
        let mut ledger = RequestLedger::default();
        assert_eq!(
            ledger.add(&id("ana"), &id("ana")),
            Err(FriendError::SelfRequest)
        );
        assert_eq!(ledger.involving(&id("ana")).count(), 0);
    }

    #[test]
    fn remove_requires_exact_direction() {
        let mut ledger = RequestLedger::default();
        ledger.add(&id("ana"), &id("ben")).unwrap();

        assert_eq!(
            ledger.remove(&id("ben"), &id("ana")).unwrap_err(),
            FriendError::RequestNotFound
        );
        let removed = ledger.remove(&id("ana"), &id("ben")).unwrap();
        assert_eq!(removed.from, id("ana"));
        assert_eq!(
            ledger.remove(&id("ana"), &id("ben")).unwrap_err(),
            FriendError::RequestNotFound
        );
    }

    #[test]
    fn involving_returns_both_directions_oldest_first() {
        let mut ledger = RequestLedger::default();
        ledger.add(&id("ana"), &id("ben")).unwrap();
        ledger.add(&id("cleo"), &id("ana")).unwrap();
        ledger.add(&id("ben"), &id("cleo")).unwrap();

        let ana = id("ana");
        let involving_ana: Vec<_> = ledger.involving(&ana).collect();
        assert_eq!(involving_ana.len(), 2);
        assert_eq!(involving_ana[0].to, id("ben"));
        assert_eq!(involving_ana[1].from, id("cleo"));
    }
}
