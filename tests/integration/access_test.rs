//! Owner/collaborator checks on reads and writes

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use organize::backend::store::{BoardReader, Store};
use organize::shared::{Board, Item, List};

use crate::common::*;

struct Shared {
    board: Board,
    list: List,
    item: Item,
}

/// A board owned by `owner_name` with `guest_name` as collaborator
async fn shared_board(app: &TestApp, owner_name: &str, guest_name: &str) -> Shared {
    let owner = app.user(owner_name).await;
    let guest = app.user(guest_name).await;

    let mut board = Board::new(owner.id, "Team");
    board.collaborators.push(guest.id);
    let mut list = List::new(owner.id, "Backlog");
    list.collaborators = board.collaborators.clone();
    let item = Item::new(owner.id, list.id, "Ticket", "details");
    list.items.push(item.id);
    board.lists.push(list.id);

    app.store
        .insert_board_graph(board.clone(), vec![list.clone()], vec![item.clone()])
        .await
        .unwrap();
    Shared { board, list, item }
}

#[tokio::test]
async fn test_stranger_cannot_view_board() {
    let app = TestApp::new();
    app.register("owner", "pw").await;
    app.register("guest", "pw").await;
    let stranger = app.register("stranger", "pw").await;
    let shared = shared_board(&app, "owner", "guest").await;

    let response = app
        .get(&format!("/board/{}", shared.board.id), Some(&stranger))
        .await;
    assert_status(&response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_collaborator_can_view_and_rename() {
    let app = TestApp::new();
    app.register("owner", "pw").await;
    let guest = app.register("guest", "pw").await;
    let shared = shared_board(&app, "owner", "guest").await;

    let page = app
        .get(&format!("/board/{}", shared.board.id), Some(&guest))
        .await;
    assert_status(&page, StatusCode::OK);

    let response = app
        .post_form(
            "/updateList",
            &format!("listID={}&listTitle=Doing", shared.list.id),
            Some(&guest),
        )
        .await;
    assert_status(&response, StatusCode::SEE_OTHER);
    let list = app.store.find_list(shared.list.id).await.unwrap().unwrap();
    assert_eq!(list.title, "Doing");
}

#[tokio::test]
async fn test_stranger_cannot_rename_list() {
    let app = TestApp::new();
    app.register("owner", "pw").await;
    app.register("guest", "pw").await;
    let stranger = app.register("stranger", "pw").await;
    let shared = shared_board(&app, "owner", "guest").await;

    let response = app
        .post_form(
            "/updateList",
            &format!("listID={}&listTitle=Hijacked", shared.list.id),
            Some(&stranger),
        )
        .await;

    assert_status(&response, StatusCode::FORBIDDEN);
    let list = app.store.find_list(shared.list.id).await.unwrap().unwrap();
    assert_eq!(list.title, "Backlog");
}

#[tokio::test]
async fn test_stranger_cannot_edit_item() {
    let app = TestApp::new();
    app.register("owner", "pw").await;
    app.register("guest", "pw").await;
    let stranger = app.register("stranger", "pw").await;
    let shared = shared_board(&app, "owner", "guest").await;

    let response = app
        .post_form(
            "/updateItem",
            &format!(
                "listID={}&itemID={}&itemTitle=Hijacked&itemContent=x",
                shared.list.id, shared.item.id
            ),
            Some(&stranger),
        )
        .await;

    assert_status(&response, StatusCode::FORBIDDEN);
    let item = app.store.find_item(shared.item.id).await.unwrap().unwrap();
    assert_eq!(item.title, "Ticket");
    assert_eq!(item.content, "details");
}

#[tokio::test]
async fn test_shared_board_appears_on_collaborator_dashboard() {
    let app = TestApp::new();
    app.register("owner", "pw").await;
    let guest = app.register("guest", "pw").await;
    shared_board(&app, "owner", "guest").await;

    let html = body_text(app.get("/dashboard", Some(&guest)).await).await;
    assert!(html.contains("Team"));
}
