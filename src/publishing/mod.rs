//! Author-side helpers that run before handing data to the backend.

pub mod fanout;
pub mod notifications;
pub mod tags;

pub use fanout::{
    fan_out_publish, should_notify_on_create, should_notify_on_update, NewNotification,
    PostStatus, MAX_PUBLISH_RECIPIENTS,
};
pub use notifications::NotificationType;
pub use tags::{normalize_tags, MAX_TAGS_PER_POST};
