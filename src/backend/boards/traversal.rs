/**
 * Board Aggregation Traversal
 *
 * Resolves a board and everything on it for rendering:
 *
 * 1. Look up the board; missing is `NotFound`
 * 2. Check the viewer is a member; otherwise `Forbidden`
 * 3. Look up every list concurrently and wait for all of them
 * 4. Look up every item of every list concurrently and wait for all of them
 *
 * Each level is a single `try_join_all`, so the aggregate is produced once,
 * after every lookup has finished, or the first failure is returned and the
 * remaining lookups are dropped. The whole walk runs under a deadline.
 */

use std::time::Duration;

use futures_util::future::try_join_all;
use serde::Serialize;
use tokio::time::timeout;

use crate::backend::access::ensure_member;
use crate::backend::error::BackendError;
use crate::backend::store::BoardReader;
use crate::shared::{Board, BoardId, Item, ItemId, List, ListId, UserId};

/// A board with its lists and items resolved
///
/// `lists` follows the board's order; `items` follows list order, then each
/// list's own item order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardAggregate {
    pub board: Board,
    pub lists: Vec<List>,
    pub items: Vec<Item>,
}

/// One list with the items it references, in its own order
#[derive(Debug, PartialEq, Serialize)]
pub struct BoardColumn<'a> {
    pub list: &'a List,
    pub items: &'a [Item],
}

impl BoardAggregate {
    /// Items grouped under the list that references them
    ///
    /// Grouping follows each list's `items`, not the items' `list_id`, so an
    /// item always shows up where its list points at it.
    pub fn columns(&self) -> Vec<BoardColumn<'_>> {
        let mut rest = self.items.as_slice();
        self.lists
            .iter()
            .map(|list| {
                let (items, tail) = rest.split_at(list.items.len().min(rest.len()));
                rest = tail;
                BoardColumn { list, items }
            })
            .collect()
    }
}

/// Resolve `board_id` for `viewer`, giving up after `deadline`
///
/// # Errors
///
/// * `NotFound` - the board, or a list/item it references, does not exist
/// * `Forbidden` - `viewer` is neither owner nor collaborator
/// * `Timeout` - the deadline passed first
/// * `Store` - a lookup failed
pub async fn resolve_board<G>(
    graph: &G,
    board_id: BoardId,
    viewer: UserId,
    deadline: Duration,
) -> Result<BoardAggregate, BackendError>
where
    G: BoardReader + ?Sized,
{
    match timeout(deadline, traverse(graph, board_id, viewer)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Board {} traversal exceeded {:?}", board_id, deadline);
            Err(BackendError::Timeout { after: deadline })
        }
    }
}

async fn traverse<G>(
    graph: &G,
    board_id: BoardId,
    viewer: UserId,
) -> Result<BoardAggregate, BackendError>
where
    G: BoardReader + ?Sized,
{
    let board = graph
        .find_board(board_id)
        .await?
        .ok_or_else(|| BackendError::not_found("board", board_id))?;

    ensure_member(&board, "board", viewer)?;

    let lists = try_join_all(board.lists.iter().map(|&id| fetch_list(graph, id))).await?;

    let item_ids: Vec<ItemId> = lists
        .iter()
        .flat_map(|list| list.items.iter().copied())
        .collect();
    let items = try_join_all(item_ids.into_iter().map(|id| fetch_item(graph, id))).await?;

    tracing::debug!(
        "Resolved board {}: {} lists, {} items",
        board_id,
        lists.len(),
        items.len()
    );

    Ok(BoardAggregate {
        board,
        lists,
        items,
    })
}

async fn fetch_list<G>(graph: &G, id: ListId) -> Result<List, BackendError>
where
    G: BoardReader + ?Sized,
{
    graph
        .find_list(id)
        .await?
        .ok_or_else(|| BackendError::not_found("list", id))
}

async fn fetch_item<G>(graph: &G, id: ItemId) -> Result<Item, BackendError>
where
    G: BoardReader + ?Sized,
{
    graph
        .find_item(id)
        .await?
        .ok_or_else(|| BackendError::not_found("item", id))
}
