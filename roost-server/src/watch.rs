use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::{Result, State};

pub async fn watchlist(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    Ok(Json(state.store().watchlist(&user)?))
}

/// Watching is a plain follow list with no handshake; both directions of
/// the operation are idempotent.
pub async fn watch_user(
    Extension(state): Extension<State>,
    Path((username, target)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let target = state.store().resolve(&target)?;
    let mut list = state.store().watchlist(&user)?;
    if !list.contains(&target) {
        list.push(target);
        state.store().save_watchlist(&user, &list)?;
    }
    Ok(Json(list))
}

pub async fn stop_watching(
    Extension(state): Extension<State>,
    Path((username, target)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let target = state.store().resolve(&target)?;
    let mut list = state.store().watchlist(&user)?;
    list.retain(|watched| watched != &target);
    state.store().save_watchlist(&user, &list)?;
    Ok(Json(list))
}
