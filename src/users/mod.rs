use crate::state::AppState;
use axum::Router;

mod dto;
mod extractors;
pub mod handlers;
mod password;
pub mod repo;
mod repo_types;
mod sanitize;
mod services;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
