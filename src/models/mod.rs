//! Data models for farewatch.

mod listing;
mod subscriber;

pub use listing::{ListingRecord, SourceId, Watermark, WATERMARK_KEY};
pub use subscriber::{NotificationMode, Subscriber, SubscriberFilter};
