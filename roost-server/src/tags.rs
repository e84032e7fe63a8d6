use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::posts::ensure_author;
use crate::{Result, State};

pub async fn tag_post(
    Extension(state): Extension<State>,
    Path((username, tag, id)): Path<(String, String, u64)>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let mut post = state.store().post(id)?;
    ensure_author(&user, &post)?;
    post.tags.insert(tag);
    state.store().save_post(&post)?;
    Ok(Json(post))
}

pub async fn untag_post(
    Extension(state): Extension<State>,
    Path((username, tag, id)): Path<(String, String, u64)>,
) -> Result<impl IntoResponse> {
    let user = state.store().resolve(&username)?;
    let mut post = state.store().post(id)?;
    ensure_author(&user, &post)?;
    post.tags.remove(&tag);
    state.store().save_post(&post)?;
    Ok(Json(post))
}

pub async fn tagged_posts(
    Extension(state): Extension<State>,
    Path(tag): Path<String>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.store().posts(|post| post.tags.contains(&tag))?))
}

pub async fn post_tags(
    Extension(state): Extension<State>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.store().post(id)?.tags))
}
