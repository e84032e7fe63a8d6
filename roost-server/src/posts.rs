use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use roost_common::{Msg, Post, UserId};
use serde::Deserialize;

use crate::{ApiError, Result, State};

#[derive(Debug, Deserialize)]
pub struct PostFilter {
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostBody {
    pub content: String,
}

pub(crate) fn ensure_author(user: &UserId, post: &Post) -> std::result::Result<(), ApiError> {
    if post.author != *user {
        return Err(ApiError::NotAuthor(user.clone(), post.id));
    }
    Ok(())
}

pub async fn get_posts(
    Extension(state): Extension<State>,
    Query(filter): Query<PostFilter>,
) -> Result<impl IntoResponse> {
    let posts = match filter.author {
        Some(author) => {
            let author = state.store().resolve(&author)?;
            state.store().posts(|post| post.author == author)?
        }
        None => state.store().posts(|_| true)?,
    };
    Ok(Json(posts))
}

pub async fn get_post(
    Extension(state): Extension<State>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.store().post(id)?))
}

pub async fn create_post(
    Extension(state): Extension<State>,
    Path(username): Path<String>,
    Json(body): Json<PostBody>,
) -> Result<impl IntoResponse> {
    let author = state.store().resolve(&username)?;
    let post = state.store().create_post(&author, body.content)?;
    tracing::debug!(author = %post.author, id = post.id, "post created");
    Ok(Json(post))
}

pub async fn update_post(
    Extension(state): Extension<State>,
    Path((username, id)): Path<(String, u64)>,
    Json(body): Json<PostBody>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let mut post = state.store().post(id)?;
    ensure_author(&user, &post)?;
    post.content = body.content;
    state.store().save_post(&post)?;
    Ok(Json(post))
}

pub async fn delete_post(
    Extension(state): Extension<State>,
    Path((username, id)): Path<(String, u64)>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let post = state.store().post(id)?;
    ensure_author(&user, &post)?;
    state.store().remove_post(id)?;
    tracing::debug!(author = %user, id, "post deleted");
    Ok(Json(Msg {
        msg: format!("Post {id} deleted!"),
    }))
}
