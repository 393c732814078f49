//! In-memory store
//!
//! Every collection lives behind one `RwLock`, so each trait method is atomic
//! with respect to the others. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BoardReader, Store, StoreError, StoreResult};
use crate::shared::{Board, BoardId, Item, ItemId, List, ListId, User, UserId};

#[derive(Default)]
struct Collections {
    users: HashMap<UserId, User>,
    boards: HashMap<BoardId, Board>,
    lists: HashMap<ListId, List>,
    items: HashMap<ItemId, Item>,
}

/// Hash-map backed [`Store`]
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl BoardReader for MemoryStore {
    async fn find_board(&self, id: BoardId) -> StoreResult<Option<Board>> {
        Ok(self.inner.read().await.boards.get(&id).cloned())
    }

    async fn find_list(&self, id: ListId) -> StoreResult<Option<List>> {
        Ok(self.inner.read().await.lists.get(&id).cloned())
    }

    async fn find_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                entity: "user",
                key: user.username,
            });
        }
        if let Some(google_id) = &user.google_id {
            if inner
                .users
                .values()
                .any(|u| u.google_id.as_ref() == Some(google_id))
            {
                return Err(StoreError::Duplicate {
                    entity: "user",
                    key: google_id.clone(),
                });
            }
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_or_create_google_user(
        &self,
        google_id: &str,
        email: Option<&str>,
    ) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner
            .users
            .values_mut()
            .find(|u| u.google_id.as_deref() == Some(google_id))
        {
            if let Some(email) = email {
                existing.email = Some(email.to_string());
            }
            return Ok(existing.clone());
        }

        let user = User::google(google_id, email.map(str::to_string));
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate {
                entity: "user",
                key: user.username,
            });
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_user_secret(&self, id: UserId, secret: &str) -> StoreResult<Option<User>> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(&id).map(|user| {
            user.secret = Some(secret.to_string());
            user.clone()
        }))
    }

    async fn users_with_secrets(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner
            .users
            .values()
            .filter(|u| u.secret.is_some())
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn insert_board_graph(
        &self,
        board: Board,
        lists: Vec<List>,
        items: Vec<Item>,
    ) -> StoreResult<Board> {
        let mut inner = self.inner.write().await;
        if inner.boards.contains_key(&board.id) {
            return Err(StoreError::Duplicate {
                entity: "board",
                key: board.id.to_string(),
            });
        }
        for list in lists {
            inner.lists.insert(list.id, list);
        }
        for item in items {
            inner.items.insert(item.id, item);
        }
        inner.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn boards_for_member(&self, user: UserId) -> StoreResult<Vec<Board>> {
        let inner = self.inner.read().await;
        let mut boards: Vec<Board> = inner
            .boards
            .values()
            .filter(|b| b.owner == user || b.collaborators.contains(&user))
            .cloned()
            .collect();
        boards.sort_by_key(|b| b.created_at);
        Ok(boards)
    }

    async fn update_list_title(&self, id: ListId, title: &str) -> StoreResult<Option<List>> {
        let mut inner = self.inner.write().await;
        Ok(inner.lists.get_mut(&id).map(|list| {
            list.title = title.to_string();
            list.clone()
        }))
    }

    async fn update_item_text(
        &self,
        id: ItemId,
        title: &str,
        content: &str,
    ) -> StoreResult<Option<Item>> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.get_mut(&id).map(|item| {
            item.title = title.to_string();
            item.content = content.to_string();
            item.clone()
        }))
    }
}
