//! Async wrapper around [`SpoilerSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client walks card pages.
//!
//! # Example
//!
//! ```ignore
//! use mtg_spoiler_sdk::AsyncSpoilerSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncSpoilerSdk::builder().build().await.unwrap();
//!
//!     let dashboard = sdk.load_dashboard(chrono::Utc::now()).await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let releases = sdk.run(|s| s.releases().list()).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::collector::Collection;
use crate::dashboard::Dashboard;
use crate::error::{Result, SpoilerError};
use crate::models::Release;
use crate::{SpoilerSdk, SpoilerSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncSpoilerSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSpoilerSdk`] instance.
///
/// Wraps a [`SpoilerSdkBuilder`]; use [`configure`](Self::configure) to reach
/// any of its options.
#[derive(Default)]
pub struct AsyncSpoilerSdkBuilder {
    inner: SpoilerSdkBuilder,
}

impl AsyncSpoilerSdkBuilder {
    /// Apply options to the underlying sync builder.
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SpoilerSdkBuilder) -> SpoilerSdkBuilder,
    {
        self.inner = f(self.inner);
        self
    }

    /// Directory of the theme preference file.
    pub fn prefs_dir<P: AsRef<Path>>(self, path: P) -> Self {
        let dir: PathBuf = path.as_ref().to_path_buf();
        self.configure(|b| b.prefs_dir(dir))
    }

    /// Build the async SDK.
    ///
    /// The blocking HTTP client is created on the blocking thread pool so it
    /// never touches the async event loop.
    pub async fn build(self) -> Result<AsyncSpoilerSdk> {
        tokio::task::spawn_blocking(move || {
            let sdk = self.inner.build()?;
            Ok(AsyncSpoilerSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| SpoilerError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSpoilerSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`SpoilerSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`SpoilerSdk`] is shared
/// behind a [`Mutex`] so page walks never interleave.
pub struct AsyncSpoilerSdk {
    inner: Arc<Mutex<SpoilerSdk>>,
}

impl AsyncSpoilerSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncSpoilerSdkBuilder {
        AsyncSpoilerSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&SpoilerSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SpoilerSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| SpoilerError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| SpoilerError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Fetch the release catalog asynchronously.
    pub async fn list_releases(&self) -> Result<Vec<Release>> {
        self.run(|s| s.releases().list()).await
    }

    /// Collect a release's cards asynchronously.
    pub async fn collect(&self, release_code: &str) -> Result<Collection> {
        let code = release_code.to_string();
        self.run(move |s| Ok(s.collect(&code))).await
    }

    /// Run the startup pipeline asynchronously.
    ///
    /// Only fails if the blocking task itself cannot run; pipeline problems
    /// are reported through [`Dashboard::status`].
    pub async fn load_dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard> {
        self.run(move |s| Ok(s.load_dashboard(now))).await
    }

    /// Close the SDK, releasing the HTTP client on the blocking pool.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| SpoilerError::InvalidArgument("SDK lock poisoned".into()))?;
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| SpoilerError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
