//! Exhaustive retrieval of every card printing in a release.
//!
//! The search endpoint is paginated: each page carries `has_more` and an
//! opaque `next_page` target. [`CardCollector`] follows the chain one page
//! at a time until it runs out, then applies the global card order before
//! handing the list back. Failures never escape: they are reported through
//! [`CollectionStatus`] alongside whatever cards were gathered.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config;
use crate::error::{Result, SpoilerError};
use crate::models::{Card, ListPage};

// ---------------------------------------------------------------------------
// PrintMode
// ---------------------------------------------------------------------------

/// Whether to retrieve every printing or one entry per card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// All print variants; duplicates by name are kept.
    #[default]
    AllPrints,
    /// One printing per card; duplicates by id are also dropped locally.
    UniqueCards,
}

impl PrintMode {
    /// Value of the upstream `unique` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            PrintMode::AllPrints => "prints",
            PrintMode::UniqueCards => "cards",
        }
    }
}

// ---------------------------------------------------------------------------
// PageSource
// ---------------------------------------------------------------------------

/// A paginated card source.
///
/// Implemented by [`ApiClient`](crate::client::ApiClient) for the live API
/// and by scripted fakes in tests.
pub trait PageSource {
    /// Request target of the first page for a release.
    fn initial_target(&self, release_code: &str, mode: PrintMode) -> String;

    /// Fetch one page. `target` is either the initial target or a
    /// `next_page` value taken verbatim from the previous page.
    fn fetch_page(&self, target: &str) -> Result<ListPage<Card>>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn initial_target(&self, release_code: &str, mode: PrintMode) -> String {
        (**self).initial_target(release_code, mode)
    }

    fn fetch_page(&self, target: &str) -> Result<ListPage<Card>> {
        (**self).fetch_page(target)
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Outcome of a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Every page was retrieved.
    Complete,
    /// A page after the first failed, or the chain broke off; earlier pages
    /// were kept.
    Partial { pages: usize, error: String },
    /// The first page failed; nothing was retrieved.
    Failed { error: String },
}

/// Sorted cards of a release plus how the retrieval went.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub cards: Vec<Card>,
    pub pages: usize,
    pub status: CollectionStatus,
}

impl Collection {
    pub fn empty() -> Self {
        Self {
            cards: Vec::new(),
            pages: 0,
            status: CollectionStatus::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == CollectionStatus::Complete
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// CollectorSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorSettings {
    /// Pause between consecutive page requests.
    pub page_delay: Duration,
    /// Extra attempts per page before giving up on it.
    pub page_retries: u32,
    pub print_mode: PrintMode,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            page_delay: config::DEFAULT_PAGE_DELAY,
            page_retries: 0,
            print_mode: PrintMode::AllPrints,
        }
    }
}

// ---------------------------------------------------------------------------
// CardCollector
// ---------------------------------------------------------------------------

/// Sequential page walker over a [`PageSource`].
pub struct CardCollector<S: PageSource> {
    source: S,
    settings: CollectorSettings,
}

impl<S: PageSource> CardCollector<S> {
    pub fn new(source: S, settings: CollectorSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &CollectorSettings {
        &self.settings
    }

    /// Retrieve, accumulate and sort every card of `release_code`.
    ///
    /// Never fails: a failing first page yields an empty
    /// [`CollectionStatus::Failed`] collection, a failing later page a
    /// [`CollectionStatus::Partial`] one holding the pages already read. A
    /// page announcing more results without a `next_page` is also partial.
    /// An upstream `not_found` search error on the first page means no cards
    /// are revealed yet and is a complete, empty collection.
    pub fn collect(&self, release_code: &str) -> Collection {
        let mode = self.settings.print_mode;
        let mut target = Some(self.source.initial_target(release_code, mode));
        let mut cards: Vec<Card> = Vec::new();
        let mut pages = 0usize;
        let mut status = CollectionStatus::Complete;

        while let Some(current) = target.take() {
            if pages > 0 && !self.settings.page_delay.is_zero() {
                thread::sleep(self.settings.page_delay);
            }

            match self.fetch_with_retry(&current) {
                Ok(page) => {
                    pages += 1;
                    debug!(
                        page = pages,
                        received = page.data.len(),
                        has_more = page.has_more,
                        "card page"
                    );
                    if page.has_more && page.next_page.is_none() {
                        warn!(code = release_code, page = pages, "more pages announced without next_page");
                        status = CollectionStatus::Partial {
                            pages,
                            error: "missing next_page".to_string(),
                        };
                    }
                    target = page.continuation().map(str::to_string);
                    cards.extend(page.data);
                }
                Err(e) if pages == 0 && e.is_empty_search() => {
                    debug!(code = release_code, "no cards revealed yet");
                }
                Err(e) => {
                    warn!(code = release_code, page = pages + 1, error = %e, "card page failed");
                    status = if pages == 0 {
                        CollectionStatus::Failed {
                            error: e.to_string(),
                        }
                    } else {
                        CollectionStatus::Partial {
                            pages,
                            error: e.to_string(),
                        }
                    };
                }
            }
        }

        if mode == PrintMode::UniqueCards {
            dedup_by_id(&mut cards);
        }
        sort_cards(&mut cards);

        info!(code = release_code, cards = cards.len(), pages, "collected release cards");
        Collection {
            cards,
            pages,
            status,
        }
    }

    fn fetch_with_retry(&self, target: &str) -> Result<ListPage<Card>> {
        let mut attempt = 0u32;
        loop {
            match self.source.fetch_page(target) {
                Ok(page) => return Ok(page),
                Err(e) if e.is_empty_search() || attempt >= self.settings.page_retries => {
                    return Err(e)
                }
                Err(e) => {
                    attempt += 1;
                    let wait = retry_wait(&e, self.settings.page_delay);
                    debug!(attempt, wait_ms = wait.as_millis() as u64, error = %e, "retrying page");
                    if !wait.is_zero() {
                        thread::sleep(wait);
                    }
                }
            }
        }
    }
}

fn retry_wait(err: &SpoilerError, page_delay: Duration) -> Duration {
    match err {
        SpoilerError::RateLimited {
            retry_after_secs: Some(secs),
        } => Duration::from_secs(*secs),
        SpoilerError::RateLimited {
            retry_after_secs: None,
        } => config::DEFAULT_RETRY_AFTER,
        _ => page_delay,
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Global card order: color class rank, then mana value. Stable, so equal
/// keys keep arrival order.
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by(|a, b| {
        a.color_class()
            .cmp(&b.color_class())
            .then_with(|| a.cmc.total_cmp(&b.cmc))
    });
}

/// Keep the first occurrence of each card id.
pub fn dedup_by_id(cards: &mut Vec<Card>) {
    let mut seen = HashSet::new();
    cards.retain(|c| seen.insert(c.id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_wait_honours_retry_after() {
        let err = SpoilerError::RateLimited {
            retry_after_secs: Some(3),
        };
        assert_eq!(retry_wait(&err, Duration::from_millis(100)), Duration::from_secs(3));
    }

    #[test]
    fn retry_wait_defaults_without_header() {
        let err = SpoilerError::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(
            retry_wait(&err, Duration::from_millis(100)),
            config::DEFAULT_RETRY_AFTER
        );
    }

    #[test]
    fn retry_wait_uses_page_delay_for_other_errors() {
        let err = SpoilerError::InvalidArgument("boom".into());
        assert_eq!(
            retry_wait(&err, Duration::from_millis(40)),
            Duration::from_millis(40)
        );
    }
}
