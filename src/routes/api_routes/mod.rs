use crate::models::AppState;
use axum::routing::get;
use axum::Router;

mod ledger;

pub fn init(state: AppState) -> Router {
    Router::new()
        .route("/ledger/balance", get(ledger::balance))
        .route("/ledger/history", get(ledger::history))
        .with_state(state)
}
