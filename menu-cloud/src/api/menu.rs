//! Public menu endpoint
//!
//! GET /api/menu/{slug}[?debug=true]: no auth, read-only.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{DebugTrace, MenuView};

use crate::menu::{self, MenuError, assembly};
use crate::state::AppState;

use super::ApiResult;

#[derive(Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub debug: bool,
}

pub async fn public_menu(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<MenuView> {
    let with_trace = query.debug && state.menu_debug_trace;
    let mut trace = menu::new_trace(&slug);

    match state.menu.public_menu(&slug, &mut trace).await {
        Ok(found) => {
            let mut view = assembly::assemble(&found.restaurant, &found.menu);
            if with_trace {
                view.trace = Some(trace);
            }
            Ok(Json(view))
        }
        Err(MenuError::NotFound) => {
            tracing::debug!(slug = %slug, "Public menu not found");
            Err(attach(AppError::restaurant_not_found(slug), with_trace, &trace))
        }
        Err(MenuError::Storage(e)) => {
            tracing::error!(slug = %slug, error = %e, "Public menu storage failure");
            Err(attach(
                AppError::storage_unavailable("Menu storage is unavailable"),
                with_trace,
                &trace,
            ))
        }
    }
}

fn attach(err: AppError, with_trace: bool, trace: &DebugTrace) -> AppError {
    if !with_trace {
        return err;
    }
    match serde_json::to_value(trace) {
        Ok(value) => err.with_detail("trace", value),
        Err(_) => err,
    }
}
