/**
 * Board Routes
 *
 * - `GET /`
 * - `GET/POST /dashboard`
 * - `GET /board/{id}`
 * - `POST /updateList`, `POST /updateItem`
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::boards::handlers::{
    create_board, dashboard, index, show_board, update_item, update_list,
};
use crate::backend::server::state::AppState;

pub fn configure_board_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(index))
        .route("/dashboard", get(dashboard).post(create_board))
        .route("/board/{id}", get(show_board))
        .route("/updateList", post(update_list))
        .route("/updateItem", post(update_item))
}
