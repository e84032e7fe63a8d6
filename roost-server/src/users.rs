use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use roost_common::{FriendRequest, Msg, User, UserId};

use crate::{Result, State};

pub async fn create_user(
    Extension(state): Extension<State>,
    Json(user): Json<User>,
) -> Result<impl IntoResponse> {
    state.store().insert_user(&user)?;
    tracing::debug!(user = %user.username, "account created");
    Ok(Json(user))
}

pub async fn list_users(Extension(state): Extension<State>) -> Result<impl IntoResponse> {
    Ok(Json(state.store().users(None)?))
}

pub async fn get_user(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    Ok(Json(state.store().user(&user)?))
}

pub async fn search_users(
    Extension(state): Extension<State>,
    Path(query): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.store().users(Some(&query))?))
}

/// Deletes the account and everything referencing it: friendship edges,
/// pending requests in both directions, and watch-list entries. The
/// friendship teardown enumerates through the core and removes each item,
/// all inside one transaction.
pub async fn delete_user(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    state.friends_mut(|friends| {
        let others: Vec<UserId> = friends.friends_of(&user).cloned().collect();
        for other in others {
            friends.remove_friend(&user, &other)?;
        }
        let pending: Vec<FriendRequest> = friends.requests_involving(&user).cloned().collect();
        for request in pending {
            friends.withdraw_request(&request.from, &request.to)?;
        }
        Ok(())
    })?;
    state.store().remove_watchlist(&user)?;
    state.store().unwatch_everywhere(&user)?;
    state.store().remove_user(&user)?;
    tracing::debug!(%user, "account deleted");
    Ok(Json(Msg {
        msg: format!("User {user} deleted!"),
    }))
}
