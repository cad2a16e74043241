use axum::Router;

use crate::state::AppState;

pub mod criteria;
pub mod dto;
pub mod filter;
pub mod handlers;
pub mod services;
pub mod shape;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
