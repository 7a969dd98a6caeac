use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

use crate::domain::{Post, PostId};

pub const EVENT_POST_CREATED: &str = "PostCreated";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsListing {
    posts: Vec<Post>,
}

impl PostsListing {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl Serialize for PostsListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.posts.len()))?;
        for post in &self.posts {
            map.serialize_entry(&post.id, post)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PostsListing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListingVisitor;

        impl<'de> Visitor<'de> for ListingVisitor {
            type Value = PostsListing;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of post id to post")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut posts = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((_key, post)) = access.next_entry::<PostId, Post>()? {
                    posts.push(post);
                }
                Ok(PostsListing { posts })
            }
        }

        deserializer.deserialize_map(ListingVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BlogEvent {
    PostCreated { id: PostId, title: String },
}

impl BlogEvent {
    pub fn post_created(post: &Post) -> Self {
        Self::PostCreated {
            id: post.id.clone(),
            title: post.title.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PostCreated { .. } => EVENT_POST_CREATED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomingEvent {
    pub kind: Option<String>,
    pub payload: Value,
}

impl IncomingEvent {
    pub fn from_value(payload: Value) -> Self {
        let kind = payload
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { kind, payload }
    }

    pub fn kind_or_missing(&self) -> &str {
        self.kind.as_deref().unwrap_or("<missing>")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAck {}
