use shared::domain::{Post, PostId};
use tracing::warn;

use crate::{BlogClient, ClientError};

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    title: String,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub async fn submit(&mut self, client: &BlogClient) -> Result<Post, ClientError> {
        match client.create_post(&self.title).await {
            Ok(post) => {
                self.title.clear();
                Ok(post)
            }
            Err(error) => {
                warn!(%error, "post submission failed");
                Err(error)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentForm {
    post_id: PostId,
    content: String,
}

impl CommentForm {
    pub fn new(post_id: PostId) -> Self {
        Self {
            post_id,
            content: String::new(),
        }
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub async fn submit(&mut self, client: &BlogClient) -> Result<(), ClientError> {
        match client.create_comment(&self.post_id, &self.content).await {
            Ok(()) => {
                self.content.clear();
                Ok(())
            }
            Err(error) => {
                warn!(post_id = %self.post_id, %error, "comment submission failed");
                Err(error)
            }
        }
    }
}
