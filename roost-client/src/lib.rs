pub mod client {
    use std::collections::BTreeSet;

    use anyhow::Result;
    use reqwest::Client;
    use roost_common::{Msg, PendingRequest, Post, User, UserId};

    pub async fn create_user(client: &Client, base: &str, username: impl AsRef<str>) -> Result<User> {
        Ok(client
            .post(format!("{base}/users"))
            .json(&User {
                username: UserId::new(username.as_ref()),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_users(client: &Client, base: &str) -> Result<Vec<User>> {
        Ok(client
            .get(format!("{base}/users"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_user(client: &Client, base: &str, user: &UserId) -> Result<User> {
        Ok(client
            .get(format!("{base}/users/{user}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn delete_user(client: &Client, base: &str, user: &UserId) -> Result<Msg> {
        Ok(client
            .delete(format!("{base}/users/{user}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn search_users(client: &Client, base: &str, query: &str) -> Result<Vec<User>> {
        Ok(client
            .get(format!("{base}/search/users/{query}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_friends(client: &Client, base: &str, user: &UserId) -> Result<Vec<UserId>> {
        Ok(client
            .get(format!("{base}/{user}/friends"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_friend_requests(
        client: &Client,
        base: &str,
        user: &UserId,
    ) -> Result<Vec<PendingRequest>> {
        Ok(client
            .get(format!("{base}/{user}/friend/requests"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn send_friend_request(
        client: &Client,
        base: &str,
        from: &UserId,
        to: &UserId,
    ) -> Result<Msg> {
        Ok(client
            .post(format!("{base}/{from}/friend/requests/{to}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn remove_friend_request(
        client: &Client,
        base: &str,
        from: &UserId,
        to: &UserId,
    ) -> Result<Msg> {
        Ok(client
            .delete(format!("{base}/{from}/friend/requests/{to}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn accept_friend_request(
        client: &Client,
        base: &str,
        user: &UserId,
        from: &UserId,
    ) -> Result<Msg> {
        Ok(client
            .put(format!("{base}/{user}/friend/accept/{from}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn reject_friend_request(
        client: &Client,
        base: &str,
        user: &UserId,
        from: &UserId,
    ) -> Result<Msg> {
        Ok(client
            .put(format!("{base}/{user}/friend/reject/{from}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn unfriend(client: &Client, base: &str, user: &UserId, friend: &UserId) -> Result<Msg> {
        Ok(client
            .delete(format!("{base}/{user}/friends/{friend}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn create_post(
        client: &Client,
        base: &str,
        author: &UserId,
        content: impl AsRef<str>,
    ) -> Result<Post> {
        Ok(client
            .post(format!("{base}/{author}/posts"))
            .json(&serde_json::json!({ "content": content.as_ref() }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn update_post(
        client: &Client,
        base: &str,
        author: &UserId,
        id: u64,
        content: impl AsRef<str>,
    ) -> Result<Post> {
        Ok(client
            .patch(format!("{base}/{author}/posts/{id}"))
            .json(&serde_json::json!({ "content": content.as_ref() }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn delete_post(client: &Client, base: &str, author: &UserId, id: u64) -> Result<Msg> {
        Ok(client
            .delete(format!("{base}/{author}/posts/{id}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn get_posts(client: &Client, base: &str, author: Option<&UserId>) -> Result<Vec<Post>> {
        let url = match author {
            Some(author) => format!("{base}/posts?author={author}"),
            None => format!("{base}/posts"),
        };
        Ok(client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn tag_post(
        client: &Client,
        base: &str,
        author: &UserId,
        tag: &str,
        id: u64,
    ) -> Result<Post> {
        Ok(client
            .post(format!("{base}/{author}/tags/{tag}/{id}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn untag_post(
        client: &Client,
        base: &str,
        author: &UserId,
        tag: &str,
        id: u64,
    ) -> Result<Post> {
        Ok(client
            .delete(format!("{base}/{author}/tags/{tag}/{id}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn posts_with_tag(client: &Client, base: &str, tag: &str) -> Result<Vec<Post>> {
        Ok(client
            .get(format!("{base}/tags/{tag}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn post_tags(client: &Client, base: &str, id: u64) -> Result<BTreeSet<String>> {
        Ok(client
            .get(format!("{base}/posts/{id}/tags"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn watchlist(client: &Client, base: &str, user: &UserId) -> Result<Vec<UserId>> {
        Ok(client
            .get(format!("{base}/{user}/watch"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn watch(client: &Client, base: &str, user: &UserId, target: &UserId) -> Result<Vec<UserId>> {
        Ok(client
            .post(format!("{base}/{user}/watch/{target}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    pub async fn unwatch(client: &Client, base: &str, user: &UserId, target: &UserId) -> Result<Vec<UserId>> {
        Ok(client
            .delete(format!("{base}/{user}/watch/{target}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}
