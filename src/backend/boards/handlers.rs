/**
 * Board Handlers
 *
 * Pages and form posts for boards, lists and items:
 *
 * - `GET /` - landing page
 * - `GET /dashboard` - the signed-in user's boards
 * - `POST /dashboard` - create a board with a starter list
 * - `GET /board/{id}` - resolve and render a board
 * - `POST /updateList` - rename a list
 * - `POST /updateItem` - change an item's title and content
 *
 * Updates redirect back to the page that submitted them.
 */

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Html, Redirect},
    Form,
};
use reqwest::Url;
use serde::Deserialize;
use tera::Context;

use crate::backend::access::{ensure_member, Membership};
use crate::backend::boards::traversal::resolve_board;
use crate::backend::error::BackendError;
use crate::backend::middleware::CurrentUser;
use crate::backend::server::state::AppState;
use crate::shared::{Board, BoardId, Item, ItemId, List, ListId, User};

const DEFAULT_BOARD_NAME: &str = "My First Board";
const STARTER_LIST_TITLE: &str = "My First List!";
const STARTER_ITEMS: [(&str, &str); 2] = [
    (
        "This is your first task",
        "Tasks can be created or destroyed, moved between names, and set to done.",
    ),
    (
        "Feel free to play around to see how tasks are added, removed, updated, and managed.",
        "You can have multiple boards, each with multiple lists.",
    ),
];

#[derive(Deserialize, Debug, Default)]
pub struct NewBoardForm {
    #[serde(rename = "boardName", default)]
    pub board_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateListForm {
    #[serde(rename = "listID")]
    pub list_id: String,
    #[serde(rename = "listTitle", default)]
    pub list_title: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateItemForm {
    #[serde(rename = "listID")]
    pub list_id: String,
    #[serde(rename = "itemID")]
    pub item_id: String,
    #[serde(rename = "itemTitle", default)]
    pub item_title: String,
    #[serde(rename = "itemContent", default)]
    pub item_content: String,
}

fn page_context(user: &User) -> Context {
    let mut context = Context::new();
    context.insert("current_user", user);
    context
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, BackendError> {
    state.views.render("index.html", &Context::new())
}

pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, BackendError> {
    let boards = state.store.boards_for_member(user.id).await?;

    let mut context = page_context(&user);
    context.insert("boards", &boards);
    state.views.render("dashboard.html", &context)
}

/// Board, list and items every new board starts with
pub fn starter_board(user: &User, name: Option<&str>) -> (Board, List, Vec<Item>) {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_BOARD_NAME);

    let mut board = Board::new(user.id, name);
    let mut list = List::new(user.id, STARTER_LIST_TITLE);
    list.collaborators = board.collaborators.clone();

    let items: Vec<Item> = STARTER_ITEMS
        .iter()
        .map(|(title, content)| Item::new(user.id, list.id, *title, *content))
        .collect();
    list.items = items.iter().map(|item| item.id).collect();
    board.lists.push(list.id);

    (board, list, items)
}

pub async fn create_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<NewBoardForm>,
) -> Result<Redirect, BackendError> {
    let (board, list, items) = starter_board(&user, form.board_name.as_deref());
    let board = state
        .store
        .insert_board_graph(board, vec![list], items)
        .await?;

    tracing::info!("User {} created board {}", user.id, board.id);
    Ok(Redirect::to(&format!("/board/{}", board.id)))
}

pub async fn show_board(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, BackendError> {
    // An id that cannot exist is the same as one that does not
    let board_id: BoardId = raw_id
        .parse()
        .map_err(|_| BackendError::not_found("board", &raw_id))?;

    let aggregate = resolve_board(
        state.store.as_ref(),
        board_id,
        user.id,
        state.config.request_timeout,
    )
    .await?;

    let mut context = page_context(&user);
    context.insert("board", &aggregate.board);
    context.insert("columns", &aggregate.columns());
    state.views.render("board.html", &context)
}

pub async fn update_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
    Form(form): Form<UpdateListForm>,
) -> Result<Redirect, BackendError> {
    let list_id: ListId = form.list_id.parse()?;

    let list = state
        .store
        .find_list(list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("list", list_id))?;
    ensure_member(&list, "list", user.id)?;

    state
        .store
        .update_list_title(list_id, &form.list_title)
        .await?
        .ok_or_else(|| BackendError::not_found("list", list_id))?;

    tracing::info!("User {} renamed list {}", user.id, list_id);
    Ok(Redirect::to(&referrer_path(&headers)))
}

pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
    Form(form): Form<UpdateItemForm>,
) -> Result<Redirect, BackendError> {
    let list_id: ListId = form.list_id.parse()?;
    let item_id: ItemId = form.item_id.parse()?;

    let list = state
        .store
        .find_list(list_id)
        .await?
        .ok_or_else(|| BackendError::not_found("list", list_id))?;
    if !list.items.contains(&item_id) {
        return Err(BackendError::not_found("item", item_id));
    }

    let item = state
        .store
        .find_item(item_id)
        .await?
        .ok_or_else(|| BackendError::not_found("item", item_id))?;
    // The item's own owner/assignee, or anyone on its list
    if !item.is_member(user.id) {
        ensure_member(&list, "list", user.id)?;
    }

    state
        .store
        .update_item_text(item_id, &form.item_title, &form.item_content)
        .await?
        .ok_or_else(|| BackendError::not_found("item", item_id))?;

    tracing::info!("User {} updated item {}", user.id, item_id);
    Ok(Redirect::to(&referrer_path(&headers)))
}

/// Path of the `Referer` header, or `/dashboard`
///
/// Only the path and query are kept, so the redirect always stays on this
/// site.
pub fn referrer_path(headers: &HeaderMap) -> String {
    const FALLBACK: &str = "/dashboard";

    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return FALLBACK.to_string();
    };

    let Ok(url) = Url::parse("http://localhost/").and_then(|base| base.join(referer)) else {
        return FALLBACK.to_string();
    };

    let path = url.path();
    if !path.starts_with('/') || path.starts_with("//") {
        return FALLBACK.to_string();
    }

    match url.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}
