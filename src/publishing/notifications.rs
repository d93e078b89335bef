use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    PostLiked,
    PostCommented,
    PostBookmarked,
    UserFollowed,
    PostPublished,
    /// Any kind this client does not know about yet.
    #[serde(other)]
    Other,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::PostLiked => "post_liked",
            NotificationType::PostCommented => "post_commented",
            NotificationType::PostBookmarked => "post_bookmarked",
            NotificationType::UserFollowed => "user_followed",
            NotificationType::PostPublished => "post_published",
            NotificationType::Other => "other",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "post_liked" => NotificationType::PostLiked,
            "post_commented" => NotificationType::PostCommented,
            "post_bookmarked" => NotificationType::PostBookmarked,
            "user_followed" => NotificationType::UserFollowed,
            "post_published" => NotificationType::PostPublished,
            _ => NotificationType::Other,
        }
    }

    /// Phrase rendered after the actor's name in the notification list.
    pub fn text(&self) -> &'static str {
        match self {
            NotificationType::PostLiked => "liked your post",
            NotificationType::PostCommented => "commented on your post",
            NotificationType::PostBookmarked => "bookmarked your post",
            NotificationType::UserFollowed => "started following you",
            NotificationType::PostPublished => "published a new post",
            NotificationType::Other => "sent a notification",
        }
    }
}
