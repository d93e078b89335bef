use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::notifications::NotificationType;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Followers notified per publish; the follower query is capped at this.
pub const MAX_PUBLISH_RECIPIENTS: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// Form values other than `"draft"` publish.
    pub fn from_form(value: &str) -> Self {
        if value == "draft" {
            PostStatus::Draft
        } else {
            PostStatus::Published
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

/// Whether creating a post with status `status` should notify the author's
/// followers.
pub fn should_notify_on_create(status: PostStatus) -> bool {
    status == PostStatus::Published
}

/// Whether updating a post from `previous` to `next` should notify the
/// author's followers.
///
/// Only a `Draft` to `Published` transition notifies. An unknown previous
/// status (the row could not be read) never notifies, so a failed lookup
/// cannot re-announce a post that was already published.
pub fn should_notify_on_update(previous: Option<PostStatus>, next: PostStatus) -> bool {
    matches!(
        (previous, next),
        (Some(PostStatus::Draft), PostStatus::Published)
    )
}

/// Notification row to insert for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: String,
    pub actor_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub post_id: String,
}

/// Build the `post_published` rows for a newly published post.
///
/// Blank ids, repeats, and the author themself are skipped; at most
/// [`MAX_PUBLISH_RECIPIENTS`] follower rows are considered.
pub fn fan_out_publish<I, T>(
    author_id: &str,
    post_id: &str,
    follower_ids: I,
) -> Vec<NewNotification>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut seen = HashSet::new();
    let rows: Vec<NewNotification> = follower_ids
        .into_iter()
        .take(MAX_PUBLISH_RECIPIENTS)
        .filter_map(|follower| {
            let follower = follower.as_ref().trim();
            if follower.is_empty() || follower == author_id {
                return None;
            }
            if !seen.insert(follower.to_string()) {
                return None;
            }
            Some(NewNotification {
                user_id: follower.to_string(),
                actor_id: author_id.to_string(),
                kind: NotificationType::PostPublished,
                post_id: post_id.to_string(),
            })
        })
        .collect();

    log_info!("Publishing {post_id} notifies {} followers", rows.len());
    rows
}
