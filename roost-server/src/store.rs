use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use roost_common::{Post, User, UserId};
use roost_friends::Friendships;
use sled::{Db, Tree};

use crate::ApiError;

/// Key in the default tree holding the serialized friendship state.
const FRIENDSHIPS_KEY: &[u8] = b"friendships";

/// Typed access to the sled trees backing the server. Documents are
/// serde_json values; one tree per collection.
#[derive(Clone)]
pub struct Store {
    db: Db,
    users: Tree,
    posts: Tree,
    watchlists: Tree,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_db(sled::open(path)?)
    }

    /// In-memory database, discarded on drop. For tests.
    pub fn temporary() -> Result<Self> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> Result<Self> {
        Ok(Self {
            users: db.open_tree("users")?,
            posts: db.open_tree("posts")?,
            watchlists: db.open_tree("watchlists")?,
            db,
        })
    }

    // Users --------------------------------------------------------------

    /// Translates a path username into a user reference, verifying that
    /// the account exists. Handlers resolve every name before touching
    /// relationship state, so the friendship core never sees a dangling
    /// reference.
    pub fn resolve(&self, username: &str) -> Result<UserId> {
        let id = UserId::new(username);
        if !self.users.contains_key(id.as_str())? {
            return Err(ApiError::UnknownUser(id).into());
        }
        Ok(id)
    }

    pub fn user(&self, id: &UserId) -> Result<User> {
        let bytes = self
            .users
            .get(id.as_str())?
            .ok_or_else(|| ApiError::UnknownUser(id.clone()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn insert_user(&self, user: &User) -> Result<()> {
        if self.users.contains_key(user.username.as_str())? {
            return Err(ApiError::UsernameTaken(user.username.clone()).into());
        }
        self.users
            .insert(user.username.as_str(), serde_json::to_vec(user)?)?;
        Ok(())
    }

    pub fn remove_user(&self, id: &UserId) -> Result<()> {
        self.users
            .remove(id.as_str())?
            .ok_or_else(|| ApiError::UnknownUser(id.clone()))?;
        Ok(())
    }

    /// All accounts, optionally filtered to usernames containing `filter`.
    pub fn users(&self, filter: Option<&str>) -> Result<Vec<User>> {
        let mut out = Vec::new();
        for entry in self.users.iter() {
            let (_, bytes) = entry?;
            let user: User = serde_json::from_slice(&bytes)?;
            if filter.map_or(true, |q| user.username.as_str().contains(q)) {
                out.push(user);
            }
        }
        Ok(out)
    }

    // Posts --------------------------------------------------------------

    pub fn create_post(&self, author: &UserId, content: String) -> Result<Post> {
        let id = self.db.generate_id()?;
        let post = Post {
            id,
            author: author.clone(),
            content,
            tags: BTreeSet::new(),
        };
        self.posts
            .insert(id.to_be_bytes(), serde_json::to_vec(&post)?)?;
        Ok(post)
    }

    pub fn post(&self, id: u64) -> Result<Post> {
        let bytes = self
            .posts
            .get(id.to_be_bytes())?
            .ok_or(ApiError::UnknownPost(id))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn save_post(&self, post: &Post) -> Result<()> {
        self.posts
            .insert(post.id.to_be_bytes(), serde_json::to_vec(post)?)?;
        Ok(())
    }

    pub fn remove_post(&self, id: u64) -> Result<()> {
        self.posts
            .remove(id.to_be_bytes())?
            .ok_or(ApiError::UnknownPost(id))?;
        Ok(())
    }

    /// Posts matching `filter`, in creation order. Ids are monotonic and
    /// keys big-endian, so key order is creation order.
    pub fn posts(&self, filter: impl Fn(&Post) -> bool) -> Result<Vec<Post>> {
        let mut out = Vec::new();
        for entry in self.posts.iter() {
            let (_, bytes) = entry?;
            let post: Post = serde_json::from_slice(&bytes)?;
            if filter(&post) {
                out.push(post);
            }
        }
        Ok(out)
    }

    // Watch lists --------------------------------------------------------

    pub fn watchlist(&self, user: &UserId) -> Result<Vec<UserId>> {
        Ok(match self.watchlists.get(user.as_str())? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        })
    }

    pub fn save_watchlist(&self, user: &UserId, list: &[UserId]) -> Result<()> {
        self.watchlists
            .insert(user.as_str(), serde_json::to_vec(list)?)?;
        Ok(())
    }

    pub fn remove_watchlist(&self, user: &UserId) -> Result<()> {
        self.watchlists.remove(user.as_str())?;
        Ok(())
    }

    /// Drops `user` from every other account's watch list.
    pub fn unwatch_everywhere(&self, user: &UserId) -> Result<()> {
        for entry in self.watchlists.iter() {
            let (key, bytes) = entry?;
            let mut list: Vec<UserId> = serde_json::from_slice(&bytes)?;
            if list.iter().any(|watched| watched == user) {
                list.retain(|watched| watched != user);
                self.watchlists.insert(key, serde_json::to_vec(&list)?)?;
            }
        }
        Ok(())
    }

    // Friendship state ---------------------------------------------------

    pub fn load_friendships(&self) -> Result<Friendships> {
        Ok(match self.db.get(FRIENDSHIPS_KEY)? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Friendships::default(),
        })
    }

    pub fn save_friendships(&self, friends: &Friendships) -> Result<()> {
        self.db
            .insert(FRIENDSHIPS_KEY, serde_json::to_vec(friends)?)?;
        Ok(())
    }
}
