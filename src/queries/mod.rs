//! Query modules for the spoiler SDK.
//!
//! Each query struct borrows from the [`SpoilerSdk`](crate::SpoilerSdk)'s
//! [`ApiClient`](crate::client::ApiClient) and returns `Result<T>` with
//! typed models.

pub mod releases;

pub use releases::{ReleaseQuery, Resolution};
