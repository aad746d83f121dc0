//! Session state of the spoiler dashboard.
//!
//! Owns the independently mutable cells (theme, target release, sorted card
//! list, view inputs, selection) and recomputes derived views on demand.
//! The card list is only ever replaced wholesale with a fully sorted
//! [`Collection`], so a partially sorted list is never observable.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::collector::{CardCollector, Collection, CollectionStatus, PageSource};
use crate::countdown::{self, Countdown, CountdownTicker};
use crate::error::Result;
use crate::models::{Card, ColorClass, Release, TargetRelease};
use crate::prefs::{Theme, ThemeStore};
use crate::queries::Resolution;
use crate::resolver::SetResolver;
use crate::view::{self, CardView, SelectionSet, ViewState};
use crate::SpoilerSdk;

/// Where the startup pipeline ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Target resolved and every card page retrieved.
    Ready,
    /// Target resolved; card retrieval stopped early or failed.
    Degraded(CollectionStatus),
    /// No trackable release in the window.
    NothingTracked,
    /// The release catalog could not be fetched.
    ReleasesUnavailable { error: String },
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    theme: Theme,
    target: Option<TargetRelease>,
    collection: Collection,
    status: LoadStatus,
    /// Search text and color filter.
    pub view: ViewState,
    pub selection: SelectionSet,
}

impl Dashboard {
    /// Load against the live API; see [`SpoilerSdk::load_dashboard`].
    pub fn load(sdk: &SpoilerSdk, now: DateTime<Utc>) -> Self {
        sdk.load_dashboard(now)
    }

    /// Run the startup pipeline: resolve a target from `catalog`, then
    /// collect its cards through `collector`.
    pub fn assemble<S: PageSource>(
        theme: Theme,
        catalog: Result<Vec<Release>>,
        resolver: &SetResolver,
        collector: &CardCollector<S>,
        now: DateTime<Utc>,
    ) -> Self {
        let resolution = Resolution::from_catalog(catalog, resolver, now);
        Self::from_resolution(theme, resolution, collector)
    }

    pub fn from_resolution<S: PageSource>(
        theme: Theme,
        resolution: Resolution,
        collector: &CardCollector<S>,
    ) -> Self {
        let (target, collection, status) = match resolution {
            Resolution::Tracked(target) => {
                let collection = collector.collect(&target.release().query_code());
                let status = match &collection.status {
                    CollectionStatus::Complete => LoadStatus::Ready,
                    other => LoadStatus::Degraded(other.clone()),
                };
                (Some(target), collection, status)
            }
            Resolution::NothingTracked => (None, Collection::empty(), LoadStatus::NothingTracked),
            Resolution::Unavailable { error } => (
                None,
                Collection::empty(),
                LoadStatus::ReleasesUnavailable { error },
            ),
        };

        info!(status = ?status, cards = collection.len(), "dashboard loaded");
        Self {
            theme,
            target,
            collection,
            status,
            view: ViewState::default(),
            selection: SelectionSet::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it.
    pub fn toggle_theme(&mut self, store: &ThemeStore) -> Result<Theme> {
        self.theme = store.toggle(self.theme)?;
        Ok(self.theme)
    }

    pub fn target(&self) -> Option<&TargetRelease> {
        self.target.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// The authoritative, sorted card list.
    pub fn cards(&self) -> &[Card] {
        &self.collection.cards
    }

    /// Cards passing the current view inputs, with selection flags.
    pub fn visible(&self) -> Vec<CardView<'_>> {
        let shown = view::derive(&self.collection.cards, &self.view);
        view::annotate(&shown, &self.selection)
    }

    /// Visible cards grouped by color class.
    pub fn visible_groups(&self) -> Vec<(ColorClass, Vec<&Card>)> {
        let shown = view::derive(&self.collection.cards, &self.view);
        view::group_by_color(&shown)
    }

    pub fn selected_cards(&self) -> Vec<&Card> {
        self.selection.selected_cards(&self.collection.cards)
    }

    pub fn toggle_selection(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Time left until the target's prerelease, if a target is tracked.
    pub fn countdown(&self, now: DateTime<Utc>) -> Option<Countdown> {
        self.target
            .as_ref()
            .map(|t| countdown::tick(t.prerelease_instant(), now))
    }

    /// Start a once-per-second countdown schedule for the target. `None`
    /// when nothing is tracked, so no timer is ever left running without a
    /// target.
    pub fn start_countdown<F>(&self, on_tick: F) -> Option<CountdownTicker>
    where
        F: FnMut(Countdown) + Send + 'static,
    {
        self.target
            .as_ref()
            .map(|t| CountdownTicker::start(t.prerelease_instant(), on_tick))
    }
}
