mod feed;

pub use feed::{NotificationFeed, DEFAULT_RETENTION};
