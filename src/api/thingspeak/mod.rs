pub mod client;
pub mod models;
#[cfg(test)]
pub mod test_support;

pub use client::ThingSpeakClient;
pub use models::{ApiError, Feed, FieldFeedResponse};
