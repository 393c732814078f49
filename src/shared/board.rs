//! Board Data Structures
//!
//! The task hierarchy is Board → List → Item. Every relation is held as a
//! typed id: a board stores the ordered ids of its lists, a list stores the
//! ordered ids of its items, and each item points back at its list.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::ids::{BoardId, CommentId, ItemId, ListId, UserId};

/// Progress of an item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Freshly created
    #[default]
    New,
    /// Someone is working on it
    InProgress,
    /// Finished
    Done,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::New => "new",
            ItemStatus::InProgress => "in_progress",
            ItemStatus::Done => "done",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(ItemStatus::New),
            "in_progress" | "in progress" => Ok(ItemStatus::InProgress),
            "done" => Ok(ItemStatus::Done),
            _ => Err(SharedError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// Top-level container owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    pub id: BoardId,
    pub owner: UserId,
    pub name: String,
    /// Lists in display order
    pub lists: Vec<ListId>,
    pub collaborators: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(owner: UserId, name: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            owner,
            name: name.into(),
            lists: Vec::new(),
            collaborators: vec![owner],
            created_at: Utc::now(),
        }
    }
}

/// Named container of items within a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub id: ListId,
    pub owner: UserId,
    pub title: String,
    /// Items in display order
    pub items: Vec<ItemId>,
    pub collaborators: Vec<UserId>,
}

impl List {
    pub fn new(owner: UserId, title: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            owner,
            title: title.into(),
            items: Vec::new(),
            collaborators: Vec::new(),
        }
    }
}

/// A single task card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub owner: UserId,
    pub assignee: UserId,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    /// The list this item belongs to
    pub list_id: ListId,
    pub status: ItemStatus,
    pub related_items: Vec<ItemId>,
    pub comments: Vec<CommentId>,
}

impl Item {
    /// A new item owned by and assigned to `owner`
    pub fn new(
        owner: UserId,
        list_id: ListId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            owner,
            assignee: owner,
            created_at: Utc::now(),
            title: title.into(),
            content: content.into(),
            list_id,
            status: ItemStatus::New,
            related_items: Vec::new(),
            comments: Vec::new(),
        }
    }
}

/// Snapshot of a comment's author at the time of writing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentAuthor {
    pub user_id: UserId,
    pub display_name: String,
}

/// Discussion entry on an item.
///
/// Items reserve a `comments` id list, but no route creates or reads
/// comments yet and neither store persists them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub author: CommentAuthor,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
