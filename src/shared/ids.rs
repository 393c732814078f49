//! Typed Identifiers
//!
//! Every stored record is addressed by a UUID wrapped in its own newtype, so a
//! list id can never be passed where an item id is expected. Ids arriving as
//! text (URL path segments, hidden form inputs) are parsed here, at the edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = SharedError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| SharedError::invalid_id($kind, s))
            }
        }
    };
}

define_id!(
    /// Identifies a [`User`](crate::shared::User)
    UserId,
    "user"
);
define_id!(
    /// Identifies a [`Board`](crate::shared::Board)
    BoardId,
    "board"
);
define_id!(
    /// Identifies a [`List`](crate::shared::List)
    ListId,
    "list"
);
define_id!(
    /// Identifies an [`Item`](crate::shared::Item)
    ItemId,
    "item"
);
define_id!(
    /// Identifies a [`Comment`](crate::shared::Comment)
    CommentId,
    "comment"
);
