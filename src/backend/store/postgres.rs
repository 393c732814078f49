/**
 * PostgreSQL Store
 *
 * sqlx implementation of [`Store`]. Relations are kept as `UUID[]` columns
 * (board → lists, list → items, collaborators), mirroring the id-reference
 * model of the domain types. Schema lives in `migrations/`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{BoardReader, Store, StoreError, StoreResult};
use crate::shared::{Board, BoardId, Item, ItemId, ItemStatus, List, ListId, User, UserId};

const USER_COLUMNS: &str =
    "id, username, password_hash, google_id, email, secret, created_at";
const BOARD_COLUMNS: &str = "id, owner_id, name, lists, collaborators, created_at";
const LIST_COLUMNS: &str = "id, owner_id, title, items, collaborators";
const ITEM_COLUMNS: &str = "id, owner_id, assignee_id, created_at, title, content, list_id, status, related_items, comments";

/// PostgreSQL-backed [`Store`]
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database at `database_url`
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: Option<String>,
    google_id: Option<String>,
    email: Option<String>,
    secret: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id.into(),
            username: row.username,
            password_hash: row.password_hash,
            google_id: row.google_id,
            email: row.email,
            secret: row.secret,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    lists: Vec<Uuid>,
    collaborators: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board {
            id: row.id.into(),
            owner: row.owner_id.into(),
            name: row.name,
            lists: typed(row.lists),
            collaborators: typed(row.collaborators),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    items: Vec<Uuid>,
    collaborators: Vec<Uuid>,
}

impl From<ListRow> for List {
    fn from(row: ListRow) -> Self {
        List {
            id: row.id.into(),
            owner: row.owner_id.into(),
            title: row.title,
            items: typed(row.items),
            collaborators: typed(row.collaborators),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    owner_id: Uuid,
    assignee_id: Uuid,
    created_at: DateTime<Utc>,
    title: String,
    content: String,
    list_id: Uuid,
    status: String,
    related_items: Vec<Uuid>,
    comments: Vec<Uuid>,
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let status: ItemStatus = row.status.parse().map_err(|e| StoreError::Corrupt {
            message: format!("item {}: {}", row.id, e),
        })?;
        Ok(Item {
            id: row.id.into(),
            owner: row.owner_id.into(),
            assignee: row.assignee_id.into(),
            created_at: row.created_at,
            title: row.title,
            content: row.content,
            list_id: row.list_id.into(),
            status,
            related_items: typed(row.related_items),
            comments: typed(row.comments),
        })
    }
}

fn typed<T: From<Uuid>>(ids: Vec<Uuid>) -> Vec<T> {
    ids.into_iter().map(T::from).collect()
}

fn raw<T: Copy + Into<Uuid>>(ids: &[T]) -> Vec<Uuid> {
    ids.iter().map(|id| (*id).into()).collect()
}

/// Map a unique-constraint violation to [`StoreError::Duplicate`]
fn unique_violation(err: sqlx::Error, entity: &'static str, key: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate {
            entity,
            key: key.to_string(),
        },
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl BoardReader for PgStore {
    async fn find_board(&self, id: BoardId) -> StoreResult<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Board::from))
    }

    async fn find_list(&self, id: ListId) -> StoreResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(List::from))
    }

    async fn find_item(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Item::try_from).transpose()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, username, password_hash, google_id, email, secret, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.google_id)
        .bind(&user.email)
        .bind(&user.secret)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "user", &user.username))?;

        Ok(row.into())
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_or_create_google_user(
        &self,
        google_id: &str,
        email: Option<&str>,
    ) -> StoreResult<User> {
        let candidate = User::google(google_id, email.map(str::to_string));
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, username, password_hash, google_id, email, secret, created_at)
            VALUES ($1, $2, NULL, $3, $4, NULL, $5)
            ON CONFLICT (google_id) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, users.email)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(candidate.id.as_uuid())
        .bind(&candidate.username)
        .bind(google_id)
        .bind(email)
        .bind(candidate.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "user", &candidate.username))?;

        Ok(row.into())
    }

    async fn set_user_secret(&self, id: UserId, secret: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET secret = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(secret)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn users_with_secrets(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE secret IS NOT NULL ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert_board_graph(
        &self,
        board: Board,
        lists: Vec<List>,
        items: Vec<Item>,
    ) -> StoreResult<Board> {
        let mut tx = self.pool.begin().await?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO items (id, owner_id, assignee_id, created_at, title, content, list_id, status, related_items, comments)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(item.owner.as_uuid())
            .bind(item.assignee.as_uuid())
            .bind(item.created_at)
            .bind(&item.title)
            .bind(&item.content)
            .bind(item.list_id.as_uuid())
            .bind(item.status.as_str())
            .bind(raw(&item.related_items))
            .bind(raw(&item.comments))
            .execute(&mut *tx)
            .await?;
        }

        for list in &lists {
            sqlx::query(
                r#"
                INSERT INTO lists (id, owner_id, title, items, collaborators)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(list.id.as_uuid())
            .bind(list.owner.as_uuid())
            .bind(&list.title)
            .bind(raw(&list.items))
            .bind(raw(&list.collaborators))
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO boards (id, owner_id, name, lists, collaborators, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(board.id.as_uuid())
        .bind(board.owner.as_uuid())
        .bind(&board.name)
        .bind(raw(&board.lists))
        .bind(raw(&board.collaborators))
        .bind(board.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, "board", &board.id.to_string()))?;

        tx.commit().await?;
        Ok(board)
    }

    async fn boards_for_member(&self, user: UserId) -> StoreResult<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(&format!(
            r#"
            SELECT {BOARD_COLUMNS}
            FROM boards
            WHERE owner_id = $1 OR $1 = ANY(collaborators)
            ORDER BY created_at ASC
            "#
        ))
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn update_list_title(&self, id: ListId, title: &str) -> StoreResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            "UPDATE lists SET title = $1 WHERE id = $2 RETURNING {LIST_COLUMNS}"
        ))
        .bind(title)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(List::from))
    }

    async fn update_item_text(
        &self,
        id: ItemId,
        title: &str,
        content: &str,
    ) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "UPDATE items SET title = $1, content = $2 WHERE id = $3 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Item::try_from).transpose()
    }
}
