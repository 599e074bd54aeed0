//! API root document

use crate::core::error::ApiError;
use crate::links::LinkDescriptor;
use crate::links::resources::links_for_root;
use crate::server::state::AppState;
use axum::{Json, extract::State};

/// `GET /api`: entry points of the API
pub async fn get_root(State(state): State<AppState>) -> Result<Json<Vec<LinkDescriptor>>, ApiError> {
    Ok(Json(links_for_root(&state.routes)?))
}
