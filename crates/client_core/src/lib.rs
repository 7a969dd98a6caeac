use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Comment, Post, PostId},
    error::ApiError,
    protocol::{CreatePostRequest, PostsListing},
};
use tracing::debug;
use url::Url;

pub mod credentials;
pub mod error;
pub mod forms;

pub use error::ClientError;
pub use forms::{CommentForm, PostForm};

pub const DEFAULT_POSTS_URL: &str = "http://localhost:4000";
pub const DEFAULT_COMMENTS_URL: &str = "http://localhost:4001";

#[derive(Clone)]
pub struct BlogClient {
    http: Client,
    posts_url: Url,
    comments_url: Url,
}

impl BlogClient {
    pub fn new(posts_url: &str, comments_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            posts_url: parse_base(posts_url)?,
            comments_url: parse_base(comments_url)?,
        })
    }

    pub async fn create_post(&self, title: &str) -> Result<Post, ClientError> {
        let url = endpoint(&self.posts_url, &["posts"])?;
        let response = self
            .send_json(
                url.clone(),
                &CreatePostRequest {
                    title: title.to_string(),
                },
            )
            .await?;
        read_json(url, response).await
    }

    pub async fn list_posts(&self) -> Result<PostsListing, ClientError> {
        let url = endpoint(&self.posts_url, &["posts"])?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::transport(&url, source))?;
        let response = check_status(&url, response).await?;
        read_json(url, response).await
    }

    pub async fn create_comment(&self, post_id: &PostId, content: &str) -> Result<(), ClientError> {
        let url = endpoint(&self.comments_url, &["posts", post_id.as_str(), "comments"])?;
        self.send_json(
            url,
            &Comment {
                content: content.to_string(),
            },
        )
        .await?;
        Ok(())
    }

    async fn send_json<T: Serialize>(&self, url: Url, body: &T) -> Result<Response, ClientError> {
        debug!(%url, "POST");
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::transport(&url, source))?;
        check_status(&url, response).await
    }
}

fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!("{raw}: not a base url")));
    }
    Ok(url)
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn check_status(url: &Url, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error = response.json::<ApiError>().await.ok();
    Err(ClientError::Status {
        url: url.to_string(),
        status,
        error,
    })
}

async fn read_json<T: DeserializeOwned>(url: Url, response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|source| ClientError::transport(&url, source))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
