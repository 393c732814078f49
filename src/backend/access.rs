//! Capability checks
//!
//! A user may read or change a board, list or item only when they own it or
//! appear among its collaborators. Handlers call [`ensure_member`] before any
//! write reaches the store.

use crate::backend::error::BackendError;
use crate::shared::{Board, Item, List, UserId};

/// A record with an owner and a set of collaborators
pub trait Membership {
    fn owner(&self) -> UserId;

    fn collaborators(&self) -> &[UserId];

    /// Owner or collaborator
    fn is_member(&self, user: UserId) -> bool {
        self.owner() == user || self.collaborators().contains(&user)
    }
}

impl Membership for Board {
    fn owner(&self) -> UserId {
        self.owner
    }

    fn collaborators(&self) -> &[UserId] {
        &self.collaborators
    }
}

impl Membership for List {
    fn owner(&self) -> UserId {
        self.owner
    }

    fn collaborators(&self) -> &[UserId] {
        &self.collaborators
    }
}

// The assignee is the only other party an item knows about.
impl Membership for Item {
    fn owner(&self) -> UserId {
        self.owner
    }

    fn collaborators(&self) -> &[UserId] {
        std::slice::from_ref(&self.assignee)
    }
}

/// Fail with `Forbidden` unless `user` is a member of `resource`
pub fn ensure_member<R: Membership + ?Sized>(
    resource: &R,
    kind: &str,
    user: UserId,
) -> Result<(), BackendError> {
    if resource.is_member(user) {
        Ok(())
    } else {
        tracing::warn!("User {} denied access to {}", user, kind);
        Err(BackendError::forbidden(format!(
            "not a member of this {}",
            kind
        )))
    }
}
