pub mod friends;
pub mod posts;
pub mod store;
pub mod tags;
pub mod users;
pub mod watch;

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Extension, Router};
use roost_common::UserId;
use roost_friends::{FriendError, Friendships};

use crate::store::Store;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub struct AppError(anyhow::Error);

// Tell axum how to convert `AppError` into a response. Domain errors map
// to the status code they deserve; anything untyped is a 500.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<FriendError>() {
            let status = match err {
                FriendError::SelfRequest | FriendError::SelfFriend => StatusCode::BAD_REQUEST,
                FriendError::DuplicateRequest | FriendError::AlreadyFriends => {
                    StatusCode::CONFLICT
                }
                FriendError::RequestNotFound | FriendError::NotFriends => StatusCode::NOT_FOUND,
                // not a caller mistake: somebody corrupted the stored state
                FriendError::InconsistentState => {
                    tracing::error!("friendship state corrupted: {err}");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            return (status, err.to_string()).into_response();
        }
        if let Some(err) = self.0.downcast_ref::<ApiError>() {
            return (err.status(), err.to_string()).into_response();
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self.0),
        )
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, AppError>`. That way you don't need to do
// that manually.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Failures attributable to the request rather than the server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no such user: {0}")]
    UnknownUser(UserId),

    #[error("username already taken: {0}")]
    UsernameTaken(UserId),

    #[error("no such post: {0}")]
    UnknownPost(u64),

    #[error("{0} is not the author of post {1}")]
    NotAuthor(UserId, u64),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownUser(_) | ApiError::UnknownPost(_) => StatusCode::NOT_FOUND,
            ApiError::UsernameTaken(_) => StatusCode::CONFLICT,
            ApiError::NotAuthor(..) => StatusCode::FORBIDDEN,
        }
    }
}

#[derive(Clone)]
pub struct State {
    store: Store,
    friends: Arc<Mutex<Friendships>>,
}

impl State {
    pub fn open(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        Self::with_store(Store::open(path)?)
    }

    /// Backed by an in-memory database that is discarded on drop. For
    /// tests.
    pub fn temporary() -> anyhow::Result<Self> {
        Self::with_store(Store::temporary()?)
    }

    fn with_store(store: Store) -> anyhow::Result<Self> {
        let friends = store.load_friendships()?;
        Ok(Self {
            store,
            friends: Arc::new(Mutex::new(friends)),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Read access to the friendship state.
    pub fn friends<T>(&self, func: impl FnOnce(&Friendships) -> T) -> Result<T> {
        let friends = self
            .friends
            .lock()
            .map_err(|_| anyhow!("friendship state lock poisoned"))?;
        Ok(func(&friends))
    }

    /// Runs one friendship transaction and persists the outcome. The lock
    /// makes every mutation appear atomic to concurrent callers; a failed
    /// transaction changes nothing and persists nothing.
    pub fn friends_mut<T>(
        &self,
        func: impl FnOnce(&mut Friendships) -> std::result::Result<T, FriendError>,
    ) -> Result<T> {
        let mut friends = self
            .friends
            .lock()
            .map_err(|_| anyhow!("friendship state lock poisoned"))?;
        let out = func(&mut friends)?;
        self.store.save_friendships(&friends)?;
        Ok(out)
    }
}

pub fn app(state: State) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:username",
            get(users::get_user).delete(users::delete_user),
        )
        .route("/search/users/:query", get(users::search_users))
        .route("/posts", get(posts::get_posts))
        .route("/posts/:id", get(posts::get_post))
        .route("/posts/:id/tags", get(tags::post_tags))
        .route("/tags/:tag", get(tags::tagged_posts))
        .route("/:username/posts", post(posts::create_post))
        .route(
            "/:username/posts/:id",
            patch(posts::update_post).delete(posts::delete_post),
        )
        .route(
            "/:username/tags/:tag/:id",
            post(tags::tag_post).delete(tags::untag_post),
        )
        .route("/:username/friends", get(friends::get_friends))
        .route("/:username/friends/:friend", delete(friends::remove_friend))
        .route("/:username/friend/requests", get(friends::get_requests))
        .route(
            "/:username/friend/requests/:to",
            post(friends::send_request).delete(friends::remove_request),
        )
        .route("/:username/friend/accept/:from", put(friends::accept_request))
        .route("/:username/friend/reject/:from", put(friends::reject_request))
        .route("/:username/watch", get(watch::watchlist))
        .route(
            "/:username/watch/:target",
            post(watch::watch_user).delete(watch::stop_watching),
        )
        .layer(Extension(state))
}

async fn root(Extension(_state): Extension<State>) -> &'static str {
    "roost is up"
}
