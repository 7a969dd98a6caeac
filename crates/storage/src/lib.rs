use std::{collections::HashMap, sync::Arc};

use shared::{
    domain::{Post, PostId},
    protocol::PostsListing,
};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<PostsInner>>,
}

#[derive(Default)]
struct PostsInner {
    order: Vec<PostId>,
    by_id: HashMap<PostId, Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> PostsListing {
        let guard = self.inner.read().await;
        let posts = guard
            .order
            .iter()
            .filter_map(|id| guard.by_id.get(id).cloned())
            .collect();
        PostsListing::new(posts)
    }

    pub async fn get(&self, id: &PostId) -> Option<Post> {
        self.inner.read().await.by_id.get(id).cloned()
    }

    pub async fn insert(&self, title: impl Into<String>) -> Post {
        self.insert_with(title, PostId::generate).await
    }

    pub async fn insert_with(
        &self,
        title: impl Into<String>,
        mut next_id: impl FnMut() -> PostId,
    ) -> Post {
        let mut guard = self.inner.write().await;
        let mut id = next_id();
        while guard.by_id.contains_key(&id) {
            debug!(%id, "post id collision, regenerating");
            id = next_id();
        }

        let post = Post {
            id: id.clone(),
            title: title.into(),
        };
        guard.order.push(id.clone());
        guard.by_id.insert(id, post.clone());
        post
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
