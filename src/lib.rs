//! MTG spoiler SDK for Rust.
//!
//! Tracks the next upcoming Magic: The Gathering release and its revealed
//! cards using the public Scryfall API. The SDK resolves which release to
//! follow, walks the paginated card search for it, orders the cards, and
//! derives the filtered gallery view and prerelease countdown.
//!
//! # Quick start
//!
//! ```no_run
//! use mtg_spoiler_sdk::SpoilerSdk;
//!
//! let sdk = SpoilerSdk::builder().build().unwrap();
//! let mut dashboard = sdk.load_dashboard(chrono::Utc::now());
//!
//! dashboard.view.set_search("dragon");
//! for entry in dashboard.visible() {
//!     println!("{} {}", entry.card.name, entry.card.mana_cost().unwrap_or(""));
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod collector;
pub mod config;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod prefs;
pub mod queries;
pub mod resolver;
pub mod view;

#[cfg(feature = "async")]
pub use async_client::AsyncSpoilerSdk;
pub use client::ApiClient;
pub use collector::{CardCollector, Collection, CollectionStatus, PageSource, PrintMode};
pub use countdown::{Countdown, CountdownTicker};
pub use dashboard::{Dashboard, LoadStatus};
pub use error::{Result, SpoilerError};
pub use prefs::{Theme, ThemeStore};
pub use resolver::SetResolver;
pub use view::{ColorFilter, SelectionSet, ViewState};

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use collector::CollectorSettings;
use models::ReleaseCategory;

// ---------------------------------------------------------------------------
// SpoilerSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SpoilerSdk`] instance.
///
/// Use [`SpoilerSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SpoilerSdkBuilder::build) to create the SDK.
pub struct SpoilerSdkBuilder {
    api_base: String,
    timeout: Duration,
    collector: CollectorSettings,
    trackable: Vec<ReleaseCategory>,
    grace_days: u32,
    prefs_dir: Option<PathBuf>,
}

impl Default for SpoilerSdkBuilder {
    fn default() -> Self {
        Self {
            api_base: config::API_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            collector: CollectorSettings::default(),
            trackable: ReleaseCategory::default_trackable(),
            grace_days: config::RECENT_GRACE_DAYS as u32,
            prefs_dir: None,
        }
    }
}

impl SpoilerSdkBuilder {
    /// Point the SDK at a different API base (mirrors, local test servers).
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pause between consecutive card search pages.
    ///
    /// Defaults to 100ms, inside the upstream's requested 50-100ms.
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.collector.page_delay = delay;
        self
    }

    /// Extra attempts per failing page. A 429 response waits for its
    /// `Retry-After` before retrying. Defaults to 0.
    pub fn page_retries(mut self, retries: u32) -> Self {
        self.collector.page_retries = retries;
        self
    }

    pub fn print_mode(mut self, mode: PrintMode) -> Self {
        self.collector.print_mode = mode;
        self
    }

    /// Release categories eligible for tracking.
    pub fn trackable(mut self, categories: Vec<ReleaseCategory>) -> Self {
        self.trackable = categories;
        self
    }

    /// Days a shipped release remains trackable. Defaults to 60; 0 tracks
    /// future releases only.
    pub fn grace_days(mut self, days: u32) -> Self {
        self.grace_days = days;
        self
    }

    /// Directory of the theme preference file.
    ///
    /// If not set, the platform config directory is used (e.g.
    /// `~/.config/mtg-spoiler-sdk` on Linux).
    pub fn prefs_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.prefs_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK. No request is made until a query runs.
    pub fn build(self) -> Result<SpoilerSdk> {
        if self.api_base.trim().is_empty() {
            return Err(SpoilerError::InvalidArgument(
                "api base must not be empty".into(),
            ));
        }
        let client = ApiClient::new(self.api_base, self.timeout)?;
        Ok(SpoilerSdk {
            client,
            resolver: SetResolver::new(self.trackable, self.grace_days),
            collector: self.collector,
            prefs: ThemeStore::new(self.prefs_dir),
        })
    }
}

// ---------------------------------------------------------------------------
// SpoilerSdk
// ---------------------------------------------------------------------------

/// The main entry point for the spoiler SDK.
///
/// Owns the HTTP client and configuration and hands out lightweight
/// borrowing wrappers per concern.
///
/// Created via [`SpoilerSdk::builder()`].
pub struct SpoilerSdk {
    client: ApiClient,
    resolver: SetResolver,
    collector: CollectorSettings,
    prefs: ThemeStore,
}

impl SpoilerSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> SpoilerSdkBuilder {
        SpoilerSdkBuilder::default()
    }

    // -- Component accessors -----------------------------------------------

    /// Access the release catalog query interface.
    pub fn releases(&self) -> queries::ReleaseQuery<'_> {
        queries::ReleaseQuery::new(&self.client, &self.resolver)
    }

    /// Card collector bound to the live API.
    pub fn collector(&self) -> CardCollector<&ApiClient> {
        CardCollector::new(&self.client, self.collector)
    }

    pub fn resolver(&self) -> &SetResolver {
        &self.resolver
    }

    /// The persistent theme preference store.
    pub fn theme(&self) -> &ThemeStore {
        &self.prefs
    }

    // -- Pipeline ------------------------------------------------------------

    /// Run the full startup sequence: read the theme, fetch and resolve the
    /// release catalog, then collect the target's cards.
    ///
    /// Never fails; problems are reported through
    /// [`Dashboard::status`].
    pub fn load_dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        let theme = self.prefs.load();
        Dashboard::assemble(
            theme,
            self.releases().list(),
            &self.resolver,
            &self.collector(),
            now,
        )
    }

    /// Collect the cards of `release_code`.
    pub fn collect(&self, release_code: &str) -> Collection {
        self.collector().collect(release_code)
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SpoilerSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpoilerSdk(api_base={}, print_mode={}, grace_days={}, prefs={})",
            self.client.base,
            self.collector.print_mode.as_query(),
            self.resolver.grace_days(),
            self.prefs.path().display()
        )
    }
}
