//! Selection of the single release a session tracks.
//!
//! Candidates are releases of a trackable category whose date lies in the
//! future or inside a grace window behind `now`. The earliest upcoming
//! candidate wins; when every candidate has already shipped, the most
//! recent one is kept so a just-released set stays on screen.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config;
use crate::models::{Release, ReleaseCategory, TargetRelease};

/// Pure, in-memory resolver over an already-fetched release catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SetResolver {
    trackable: Vec<ReleaseCategory>,
    grace: Duration,
}

impl Default for SetResolver {
    fn default() -> Self {
        Self {
            trackable: ReleaseCategory::default_trackable(),
            grace: Duration::days(config::RECENT_GRACE_DAYS),
        }
    }
}

impl SetResolver {
    /// Resolver tracking `trackable` with a grace window of `grace_days`.
    ///
    /// A grace of zero keeps only releases dated at or after `now`.
    pub fn new(trackable: Vec<ReleaseCategory>, grace_days: u32) -> Self {
        Self {
            trackable,
            grace: Duration::days(i64::from(grace_days)),
        }
    }

    pub fn trackable(&self) -> &[ReleaseCategory] {
        &self.trackable
    }

    pub fn grace_days(&self) -> i64 {
        self.grace.num_days()
    }

    pub fn is_trackable(&self, category: &ReleaseCategory) -> bool {
        self.trackable.contains(category)
    }

    /// Trackable, dated releases inside the retention window, ascending by
    /// release date. Ties keep catalog order.
    pub fn candidates<'r>(
        &self,
        releases: &'r [Release],
        now: DateTime<Utc>,
    ) -> Vec<(DateTime<Utc>, &'r Release)> {
        let cutoff = now
            .checked_sub_signed(self.grace)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut out: Vec<(DateTime<Utc>, &Release)> = releases
            .iter()
            .filter(|r| self.is_trackable(&r.category))
            .filter_map(|r| r.release_instant().map(|at| (at, r)))
            .filter(|(at, _)| *at >= cutoff)
            .collect();
        out.sort_by_key(|(at, _)| *at);
        out
    }

    /// Pick the target release, or `None` when nothing qualifies.
    pub fn resolve(&self, releases: &[Release], now: DateTime<Utc>) -> Option<TargetRelease> {
        let candidates = self.candidates(releases, now);

        let chosen = candidates
            .iter()
            .find(|(at, _)| *at >= now)
            .or_else(|| candidates.last())
            .map(|(_, r)| (*r).clone());

        match &chosen {
            Some(r) => debug!(code = %r.code, candidates = candidates.len(), "resolved target release"),
            None => debug!(total = releases.len(), "no trackable release in window"),
        }

        chosen.and_then(TargetRelease::new)
    }
}

/// Resolve with the default categories and grace window.
pub fn resolve(releases: &[Release], now: DateTime<Utc>) -> Option<TargetRelease> {
    SetResolver::default().resolve(releases, now)
}
