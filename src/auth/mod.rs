use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub(crate) mod extractors;
pub mod password;
pub mod repo;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
