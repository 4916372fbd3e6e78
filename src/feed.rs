//! Fetch/view state machine for the rate list.
//!
//! ```text
//! Loading ──ok──▶ Loaded ──refresh──▶ Loading
//!    └──err──▶ Failed ──retry──▶ Loading
//! ```
//!
//! Every request is tagged with a sequence number. Only the response to
//! the most recently issued request is applied; older responses arriving
//! late are discarded. A feed created from externally supplied data starts
//! `Loaded` and ignores refresh and retry.

use tracing::{debug, info, warn};

use crate::api::{FetchError, RateProvider};
use crate::filter::FilterCriteria;
use crate::models::{Rate, RatesPage};

/// What the rate list view is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Loading,
    /// An empty page is a valid result, rendered as "no results".
    Loaded(RatesPage),
    Failed(FetchError),
}

/// A fetch the caller must perform and report back with
/// [`RateFeed::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub criteria: FilterCriteria,
}

/// Owns the rate list and its loading lifecycle.
#[derive(Debug, Clone)]
pub struct RateFeed {
    state: FeedState,
    external: bool,
    latest_seq: u64,
    last_criteria: FilterCriteria,
}

impl RateFeed {
    /// A feed that will fetch; starts `Loading` with no request issued.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FeedState::Loading,
            external: false,
            latest_seq: 0,
            last_criteria: FilterCriteria::default(),
        }
    }

    /// A feed over externally supplied data; starts `Loaded`.
    #[must_use]
    pub fn with_data(page: RatesPage) -> Self {
        Self {
            state: FeedState::Loaded(page),
            external: true,
            ..Self::new()
        }
    }

    /// Picks the starting state from the provider's preloaded data.
    #[must_use]
    pub fn for_provider(provider: &dyn RateProvider) -> Self {
        match provider.preloaded() {
            Some(page) => Self::with_data(page),
            None => Self::new(),
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading)
    }

    /// The loaded rates, or an empty slice while loading or failed.
    pub fn rates(&self) -> &[Rate] {
        match &self.state {
            FeedState::Loaded(page) => &page.rates,
            _ => &[],
        }
    }

    pub fn last_updated(&self) -> Option<&str> {
        match &self.state {
            FeedState::Loaded(page) => page.last_updated.as_deref(),
            _ => None,
        }
    }

    /// Enters `Loading` and issues a new request for `criteria`.
    ///
    /// Returns `None` for external feeds, which never fetch.
    pub fn begin(&mut self, criteria: FilterCriteria) -> Option<RequestTicket> {
        if self.external {
            return None;
        }
        self.latest_seq += 1;
        self.last_criteria = criteria.clone();
        self.state = FeedState::Loading;
        debug!(seq = self.latest_seq, "Rate request issued");
        Some(RequestTicket {
            seq: self.latest_seq,
            criteria,
        })
    }

    /// Repeats the last request with the same criteria.
    pub fn retry(&mut self) -> Option<RequestTicket> {
        self.begin(self.last_criteria.clone())
    }

    /// Applies the outcome of request `seq`.
    ///
    /// Returns `false` and leaves the state untouched when a newer request
    /// has been issued since, or when the feed is external.
    pub fn complete(&mut self, seq: u64, result: Result<RatesPage, FetchError>) -> bool {
        if self.external || seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "Discarding superseded rate response");
            return false;
        }
        self.state = match result {
            Ok(page) => {
                info!(seq, count = page.rates.len(), "Rates loaded");
                FeedState::Loaded(page)
            }
            Err(err) => {
                warn!(seq, error = %err, "Rate fetch failed");
                FeedState::Failed(err)
            }
        };
        true
    }
}

impl Default for RateFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LocalProvider;

    #[test]
    fn starts_loading() {
        let feed = RateFeed::new();
        assert!(feed.is_loading());
        assert!(feed.rates().is_empty());
    }

    #[test]
    fn success_replaces_state() {
        let mut feed = RateFeed::new();
        let ticket = feed.begin(FilterCriteria::default()).unwrap();
        assert!(feed.complete(ticket.seq, Ok(RatesPage::default())));
        assert_eq!(feed.state(), &FeedState::Loaded(RatesPage::default()));
    }

    #[test]
    fn application_error_message_is_kept() {
        let mut feed = RateFeed::new();
        let ticket = feed.begin(FilterCriteria::default()).unwrap();
        feed.complete(ticket.seq, Err(FetchError::Application("X".into())));
        match feed.state() {
            FeedState::Failed(err) => assert_eq!(err.user_message(), "X"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn retry_reuses_last_criteria() {
        let mut feed = RateFeed::new();
        let criteria = FilterCriteria {
            province: Some("Ontario".into()),
            ..FilterCriteria::default()
        };
        let first = feed.begin(criteria.clone()).unwrap();
        feed.complete(first.seq, Err(FetchError::NotFound));

        let retry = feed.retry().unwrap();
        assert!(feed.is_loading());
        assert_eq!(retry.criteria, criteria);
        assert!(retry.seq > first.seq);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut feed = RateFeed::new();
        let old = feed.begin(FilterCriteria::default()).unwrap();
        let new = feed.begin(FilterCriteria::default()).unwrap();

        let fresh = RatesPage::default();
        assert!(feed.complete(new.seq, Ok(fresh.clone())));
        assert!(!feed.complete(old.seq, Err(FetchError::Server(500))));
        assert_eq!(feed.state(), &FeedState::Loaded(fresh));
    }

    #[test]
    fn external_data_skips_loading() {
        let provider = LocalProvider::new(Vec::new());
        let mut feed = RateFeed::for_provider(&provider);
        assert!(feed.is_external());
        assert!(matches!(feed.state(), FeedState::Loaded(_)));
        assert!(feed.begin(FilterCriteria::default()).is_none());
        assert!(feed.retry().is_none());
        assert!(!feed.complete(0, Err(FetchError::NotFound)));
        assert!(matches!(feed.state(), FeedState::Loaded(_)));
    }
}
