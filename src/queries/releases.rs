//! Release catalog queries against the live API.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::{Result, SpoilerError};
use crate::models::{Release, TargetRelease};
use crate::resolver::SetResolver;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of fetching the catalog and resolving a target.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A release is being tracked.
    Tracked(TargetRelease),
    /// The catalog loaded but nothing qualifies.
    NothingTracked,
    /// The catalog could not be fetched or decoded.
    Unavailable { error: String },
}

impl Resolution {
    pub fn target(&self) -> Option<&TargetRelease> {
        match self {
            Resolution::Tracked(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_target(self) -> Option<TargetRelease> {
        match self {
            Resolution::Tracked(t) => Some(t),
            _ => None,
        }
    }

    /// Resolve over an already-attempted catalog fetch.
    pub fn from_catalog(
        catalog: Result<Vec<Release>>,
        resolver: &SetResolver,
        now: DateTime<Utc>,
    ) -> Resolution {
        match catalog {
            Ok(releases) => match resolver.resolve(&releases, now) {
                Some(target) => {
                    info!(code = target.code(), name = target.name(), "tracking release");
                    Resolution::Tracked(target)
                }
                None => Resolution::NothingTracked,
            },
            Err(e) => {
                warn!(error = %e, "release catalog unavailable");
                Resolution::Unavailable {
                    error: e.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ReleaseQuery
// ---------------------------------------------------------------------------

/// Query interface for the release catalog.
pub struct ReleaseQuery<'a> {
    client: &'a ApiClient,
    resolver: &'a SetResolver,
}

impl<'a> ReleaseQuery<'a> {
    pub fn new(client: &'a ApiClient, resolver: &'a SetResolver) -> Self {
        Self { client, resolver }
    }

    /// Every release in the catalog, in upstream order.
    pub fn list(&self) -> Result<Vec<Release>> {
        self.client.list_releases()
    }

    /// One release by code (case-insensitive).
    pub fn get(&self, code: &str) -> Result<Option<Release>> {
        match self.client.get_release(code) {
            Ok(release) => Ok(Some(release)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Trackable releases within the resolver's window, ascending by date.
    pub fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Release>> {
        let releases = self.list()?;
        Ok(self
            .resolver
            .candidates(&releases, now)
            .into_iter()
            .map(|(_, r)| r.clone())
            .collect())
    }

    /// Fetch the catalog and resolve the target. Never fails.
    pub fn resolve_target(&self, now: DateTime<Utc>) -> Resolution {
        Resolution::from_catalog(self.list(), self.resolver, now)
    }

    /// Track a specific release by code, bypassing resolution.
    pub fn target_by_code(&self, code: &str) -> Result<TargetRelease> {
        let release = self
            .get(code)?
            .ok_or_else(|| SpoilerError::NotFound(format!("release '{code}'")))?;
        TargetRelease::new(release).ok_or_else(|| {
            SpoilerError::InvalidArgument(format!("release '{code}' has no usable release date"))
        })
    }
}
