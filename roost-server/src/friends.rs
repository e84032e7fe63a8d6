use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use roost_common::{Msg, PendingRequest, UserId};

use crate::{Result, State};

pub async fn get_friends(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let friends: Vec<UserId> =
        state.friends(|friends| friends.friends_of(&user).cloned().collect())?;
    Ok(Json(friends))
}

pub async fn get_requests(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let requests: Vec<PendingRequest> =
        state.friends(|friends| friends.requests_for(&user).collect())?;
    Ok(Json(requests))
}

pub async fn send_request(
    Extension(state): Extension<State>,
    Path((username, to)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let from = state.store().resolve(&username)?;
    let to = state.store().resolve(&to)?;
    state.friends_mut(|friends| friends.send_request(&from, &to))?;
    tracing::debug!(%from, %to, "friend request sent");
    Ok(Json(Msg {
        msg: format!("Sent request to {to}!"),
    }))
}

/// Withdraws a request the caller sent. Rejection is the recipient's
/// move, so the ordered pair here is always (caller, recipient).
pub async fn remove_request(
    Extension(state): Extension<State>,
    Path((username, to)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let from = state.store().resolve(&username)?;
    let to = state.store().resolve(&to)?;
    state.friends_mut(|friends| friends.withdraw_request(&from, &to))?;
    tracing::debug!(%from, %to, "friend request withdrawn");
    Ok(Json(Msg {
        msg: format!("Withdrew request to {to}!"),
    }))
}

pub async fn accept_request(
    Extension(state): Extension<State>,
    Path((username, from)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let to = state.store().resolve(&username)?;
    let from = state.store().resolve(&from)?;
    state.friends_mut(|friends| friends.accept_request(&from, &to))?;
    tracing::debug!(%from, %to, "friend request accepted");
    Ok(Json(Msg {
        msg: format!("Accepted request from {from}!"),
    }))
}

pub async fn reject_request(
    Extension(state): Extension<State>,
    Path((username, from)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let to = state.store().resolve(&username)?;
    let from = state.store().resolve(&from)?;
    state.friends_mut(|friends| friends.reject_request(&from, &to))?;
    tracing::debug!(%from, %to, "friend request rejected");
    Ok(Json(Msg {
        msg: format!("Rejected request from {from}!"),
    }))
}

pub async fn remove_friend(
    Extension(state): Extension<State>,
    Path((username, friend)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let friend = state.store().resolve(&friend)?;
    state.friends_mut(|friends| friends.remove_friend(&user, &friend))?;
    tracing::debug!(%user, %friend, "friendship removed");
    Ok(Json(Msg {
        msg: format!("Unfriended {friend}!"),
    }))
}
