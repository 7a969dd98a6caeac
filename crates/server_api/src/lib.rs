use std::sync::Arc;

use shared::{
    domain::Post,
    protocol::{BlogEvent, CreatePostRequest, EventAck, IncomingEvent, PostsListing},
};
use storage::PostStore;
use tracing::{info, warn};

mod publisher;

pub use publisher::{EventPublisher, HttpEventPublisher, NoopEventPublisher};

#[derive(Clone)]
pub struct ApiContext {
    pub store: PostStore,
    pub publisher: Arc<dyn EventPublisher>,
}

impl ApiContext {
    pub fn new(store: PostStore, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }
}

pub async fn list_posts(ctx: &ApiContext) -> PostsListing {
    ctx.store.list().await
}

pub async fn create_post(ctx: &ApiContext, req: CreatePostRequest) -> Post {
    let post = ctx.store.insert(req.title).await;
    info!(id = %post.id, "post created");

    let event = BlogEvent::post_created(&post);
    if let Err(error) = ctx.publisher.publish(&event).await {
        warn!(
            id = %post.id,
            event = event.kind(),
            error = %format!("{error:#}"),
            "event notification failed; post kept"
        );
    }

    post
}

pub fn receive_event(event: &IncomingEvent) -> EventAck {
    info!("Received Event: {}", event.kind_or_missing());
    EventAck::default()
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
