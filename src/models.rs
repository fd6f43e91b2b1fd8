use serde::Serialize;

use crate::forum::{ForumCategory, ForumPost, ForumThread, ForumUser};

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}

/// A category page: the category and its ordered threads
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: ForumCategory,
    pub threads: Vec<ForumThread>,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: ForumPost,
    pub author: Option<ForumUser>,
}

/// A thread page: the thread, its category, author and posts
#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub category: ForumCategory,
    pub thread: ForumThread,
    pub author: Option<ForumUser>,
    pub posts: Vec<PostView>,
}
