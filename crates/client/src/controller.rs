//! Paginated remote list controller.
//!
//! A [`ListController`] owns everything a list screen renders: the page
//! cursor, the accumulated records, and the fetch status. Views drive it
//! through four intents and observe it through [`ListSnapshot`]s, either on
//! demand or by subscribing to a `watch` channel that is updated on every
//! state change. The owner passes the controller (or snapshots) to whoever
//! needs them; there is no global lookup.
//!
//! # Intents
//!
//! - [`ListController::search`], [`ListController::apply_filter`] and
//!   [`ListController::refresh`] reset to page 1, clear the data and fetch.
//! - [`ListController::load_more`] fetches the next page and appends it.
//!
//! # Ordering
//!
//! Every reset intent starts a new query generation and responses from older
//! generations are discarded, so the visible list never mixes pages fetched
//! under different queries. Within one generation, overlapping `load_more`
//! fetches (only possible with [`ListOptions::overlapping_pages`]) append in
//! completion order, not request order.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use storekeep_core::{FilterSet, Page, Resource, ResultItem, SearchValue};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::credentials::{CredentialSource, Credentials};
use crate::error::ListError;
use crate::query;
use crate::search_input::SearchSink;
use crate::transport::{CatalogTransport, FetchOutcome, PageRequest};

/// Tunables for a list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Records requested per page.
    pub page_size: u32,
    /// Let `load_more` start while another fetch is still in flight.
    ///
    /// Overlapping pages append in completion order and can therefore arrive
    /// out of order.
    pub overlapping_pages: bool,
    /// Sleep this long before every network call.
    pub simulated_latency: Option<Duration>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            overlapping_pages: false,
            simulated_latency: None,
        }
    }
}

impl From<&ClientConfig> for ListOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            page_size: config.page_size,
            overlapping_pages: config.overlapping_pages,
            simulated_latency: config.simulated_latency,
        }
    }
}

/// Effective status a view renders against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStatus {
    /// Nothing in flight; more pages may exist.
    Idle,
    /// First fetch after mount.
    Loading,
    /// Fetch started by `search`, `apply_filter` or `refresh`.
    Refreshing,
    /// Fetch of a page after the first.
    LoadingMore,
    /// The last fetch failed; see [`ListSnapshot::error`].
    Error,
    /// The backend has no further pages for the current query.
    Exhausted,
}

/// Read-only view of controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub status: ListStatus,
    pub page: Page,
    pub data: Vec<ResultItem>,
    pub error: Option<ListError>,
    pub has_more_to_load: bool,
    pub search_value: SearchValue,
    pub filters: FilterSet,
}

impl ListSnapshot {
    /// Whether any fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(
            self.status,
            ListStatus::Loading | ListStatus::Refreshing | ListStatus::LoadingMore
        )
    }

    /// Whether the in-flight fetch was started by a reset intent.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        matches!(self.status, ListStatus::Refreshing)
    }

    #[must_use]
    pub const fn has_more_to_load(&self) -> bool {
        self.has_more_to_load
    }
}

/// How the last fetch of the current generation ended.
#[derive(Debug, Clone)]
enum Settled {
    Ready,
    Exhausted,
    Failed(ListError),
}

/// Everything needed to run one fetch without holding the state lock.
#[derive(Debug)]
struct FetchTicket {
    generation: u64,
    page: Page,
    search_value: SearchValue,
    filters: FilterSet,
}

#[derive(Debug)]
struct ControllerState {
    page: Page,
    data: Vec<ResultItem>,
    search_value: SearchValue,
    filters: FilterSet,
    in_flight: usize,
    refreshing: bool,
    settled: Settled,
    generation: u64,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            page: Page::FIRST,
            data: Vec::new(),
            search_value: SearchValue::default(),
            filters: FilterSet::default(),
            in_flight: 0,
            refreshing: false,
            settled: Settled::Ready,
            generation: 0,
        }
    }

    const fn has_more(&self) -> bool {
        matches!(self.settled, Settled::Ready)
    }

    const fn status(&self) -> ListStatus {
        if self.in_flight > 0 {
            if self.refreshing {
                ListStatus::Refreshing
            } else if self.page.is_first() {
                ListStatus::Loading
            } else {
                ListStatus::LoadingMore
            }
        } else {
            match self.settled {
                Settled::Ready => ListStatus::Idle,
                Settled::Exhausted => ListStatus::Exhausted,
                Settled::Failed(_) => ListStatus::Error,
            }
        }
    }

    fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            status: self.status(),
            page: self.page,
            data: self.data.clone(),
            error: match &self.settled {
                Settled::Failed(err) => Some(err.clone()),
                Settled::Ready | Settled::Exhausted => None,
            },
            has_more_to_load: self.has_more(),
            search_value: self.search_value.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Start a new query generation at page 1 with no data.
    fn reset(&mut self, refreshing: bool) {
        self.generation = self.generation.wrapping_add(1);
        self.page = Page::FIRST;
        self.data.clear();
        self.in_flight = 0;
        self.refreshing = refreshing;
        self.settled = Settled::Ready;
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.in_flight += 1;
        FetchTicket {
            generation: self.generation,
            page: self.page,
            search_value: self.search_value.clone(),
            filters: self.filters.clone(),
        }
    }

    fn apply(&mut self, page: Page, result: Result<FetchOutcome, ListError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        self.settled = match result {
            // Reset intents clear `data`, so page 1 lands on an empty list.
            Ok(FetchOutcome::Items(items)) if !items.is_empty() => {
                self.data.extend(items);
                Settled::Ready
            }
            Ok(FetchOutcome::Items(_)) => Settled::Exhausted,
            Ok(FetchOutcome::Unrecognized) => {
                warn!(%page, "Unrecognized payload treated as end of list");
                Settled::Exhausted
            }
            Ok(FetchOutcome::BackendFailure {
                code,
                message,
                status,
            }) => Settled::Failed(ListError::Backend {
                code,
                message,
                status,
            }),
            Err(err) => Settled::Failed(err),
        };

        if self.in_flight == 0 {
            self.refreshing = false;
        }
    }
}

/// Paginated list state machine for one resource.
pub struct ListController<T> {
    transport: T,
    resource: Resource,
    options: ListOptions,
    /// Set exactly once by [`ListController::mount`].
    credentials: OnceLock<Result<Credentials, ListError>>,
    active: AtomicBool,
    state: Mutex<ControllerState>,
    updates: watch::Sender<ListSnapshot>,
}

impl<T> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("resource", &self.resource)
            .field("options", &self.options)
            .field("active", &self.active.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<T: CatalogTransport> ListController<T> {
    /// Create an unmounted controller. Nothing is fetched until [`mount`].
    ///
    /// [`mount`]: ListController::mount
    #[must_use]
    pub fn new(transport: T, resource: Resource, options: ListOptions) -> Self {
        let state = ControllerState::new();
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            transport,
            resource,
            options,
            credentials: OnceLock::new(),
            active: AtomicBool::new(true),
            state: Mutex::new(state),
            updates,
        }
    }

    /// Start with `value` as the search text instead of an empty search.
    #[must_use]
    pub fn with_search(mut self, value: impl Into<SearchValue>) -> Self {
        self.state.get_mut().search_value = value.into();
        self.publish_initial();
        self
    }

    /// Start with `filters` instead of an empty filter set.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.state.get_mut().filters = filters;
        self.publish_initial();
        self
    }

    fn publish_initial(&mut self) {
        let snapshot = self.state.get_mut().snapshot();
        self.updates.send_replace(snapshot);
    }

    /// Load credentials, then fetch the first page.
    ///
    /// Credentials are read exactly once per controller; calling `mount`
    /// again does nothing. If they cannot be read, no request is ever made
    /// and the controller settles in [`ListStatus::Error`].
    #[instrument(skip(self, source), fields(resource = %self.resource))]
    pub async fn mount<S: CredentialSource>(&self, source: &S) {
        if self.credentials.get().is_some() || !self.is_active() {
            debug!("Already mounted");
            return;
        }

        let loaded = source.load().await.map_err(ListError::from);
        if let Err(err) = &loaded {
            warn!(error = %err, "Credentials unavailable, list will not fetch");
        }
        if self.credentials.set(loaded).is_err() {
            debug!("Concurrent mount won the race");
            return;
        }

        match self.credentials.get() {
            Some(Ok(_)) => {
                info!("Mounted list");
                if let Some(ticket) = self.reset_with(false, |_| {}).await {
                    self.fetch(ticket).await;
                }
            }
            Some(Err(err)) => {
                let mut state = self.state.lock().await;
                state.settled = Settled::Failed(err.clone());
                self.publish(&state);
            }
            None => {}
        }
    }

    /// Search for `value`, starting over at page 1.
    #[instrument(skip(self, value), fields(resource = %self.resource))]
    pub async fn search(&self, value: impl Into<SearchValue>) {
        let value = value.into();
        info!(search = %value, "Search");
        if let Some(ticket) = self.reset_with(true, |state| state.search_value = value).await {
            self.fetch(ticket).await;
        }
    }

    /// Replace the filter set, starting over at page 1.
    #[instrument(skip(self, filters), fields(resource = %self.resource))]
    pub async fn apply_filter(&self, filters: FilterSet) {
        info!(?filters, "Apply filter");
        if let Some(ticket) = self.reset_with(true, |state| state.filters = filters).await {
            self.fetch(ticket).await;
        }
    }

    /// Re-fetch from page 1 with the current search and filters.
    #[instrument(skip(self), fields(resource = %self.resource))]
    pub async fn refresh(&self) {
        info!("Refresh");
        if let Some(ticket) = self.reset_with(true, |_| {}).await {
            self.fetch(ticket).await;
        }
    }

    /// Fetch and append the next page.
    ///
    /// Does nothing when the list is exhausted or failed, or when a fetch is
    /// already in flight and overlapping pages are not enabled.
    #[instrument(skip(self), fields(resource = %self.resource))]
    pub async fn load_more(&self) {
        if !self.is_active() {
            return;
        }

        let ticket = {
            let mut state = self.state.lock().await;
            if !state.has_more() {
                debug!("Nothing more to load");
                return;
            }
            if state.in_flight > 0 && !self.options.overlapping_pages {
                debug!(in_flight = state.in_flight, "Fetch already in flight");
                return;
            }
            state.page = state.page.next();
            let ticket = state.begin_fetch();
            self.publish(&state);
            ticket
        };

        info!(page = %ticket.page, "Load more");
        self.fetch(ticket).await;
    }

    /// Unmount: later intents do nothing and in-flight results are dropped.
    pub fn close(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            debug!(resource = %self.resource, "List closed");
        }
    }

    /// Whether the controller still accepts intents and results.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        self.updates.borrow().clone()
    }

    /// Receive a new snapshot on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.updates.subscribe()
    }

    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }

    /// Apply `update`, reset to a new generation and claim a fetch.
    async fn reset_with(
        &self,
        refreshing: bool,
        update: impl FnOnce(&mut ControllerState) + Send,
    ) -> Option<FetchTicket> {
        if !self.is_active() {
            return None;
        }
        let mut state = self.state.lock().await;
        update(&mut state);
        state.reset(refreshing);
        let ticket = state.begin_fetch();
        self.publish(&state);
        Some(ticket)
    }

    async fn fetch(&self, ticket: FetchTicket) {
        let result = self.request(&ticket).await;

        let mut state = self.state.lock().await;
        if !self.is_active() {
            debug!(page = %ticket.page, "List closed, discarding response");
            return;
        }
        if state.generation != ticket.generation {
            debug!(page = %ticket.page, "Discarding response from a superseded query");
            return;
        }
        state.apply(ticket.page, result);
        self.publish(&state);
    }

    async fn request(&self, ticket: &FetchTicket) -> Result<FetchOutcome, ListError> {
        let credentials = match self.credentials.get() {
            Some(Ok(credentials)) => credentials,
            Some(Err(err)) => return Err(err.clone()),
            None => {
                return Err(ListError::CredentialsUnavailable(
                    "credentials have not been loaded".to_string(),
                ));
            }
        };

        if let Some(latency) = self.options.simulated_latency {
            tokio::time::sleep(latency).await;
        }

        let url = query::build(
            credentials.base_url(),
            self.resource,
            ticket.page,
            self.options.page_size,
            &ticket.search_value,
            &ticket.filters,
        )?;
        debug!(%url, "Requesting page");

        let request = PageRequest {
            url,
            authorization: credentials.authorization(),
        };
        self.transport.fetch_page(&request).await
    }

    fn publish(&self, state: &ControllerState) {
        self.updates.send_replace(state.snapshot());
    }
}

impl<T: CatalogTransport> SearchSink for ListController<T> {
    async fn search(&self, value: SearchValue) {
        Self::search(self, value).await;
    }
}
