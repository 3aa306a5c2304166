//! Paginated list controller.
//!
//! Owns filters, paging, sorting and the current page of rows for one view.
//! Every state change that needs data returns a [`FetchTicket`]; the caller
//! runs the request (inline via [`ListController::load`] or on a background
//! task) and hands the result back to [`ListController::apply_response`].
//!
//! Each ticket carries a sequence number and only the response to the most
//! recent ticket is applied, so a slow response to an earlier request can
//! never overwrite a newer page.

use log::{debug, info, warn};

use super::filters::FilterSet;
use crate::backend::{BackendError, ListPage, ListQuery, ListResource, MonitoringBackend, Pagination, SortOrder};
use crate::grid::{Row, RowKey, RowKeyError};

/// A request the controller wants sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub resource: ListResource,
    pub query: ListQuery,
}

/// What happened when a response was handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and counters were replaced
    Applied { rows: usize, rejected: usize },
    /// The request failed; rows were cleared and `error` set
    Failed(String),
    /// A newer request was issued after this one; nothing changed
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListController {
    resource: ListResource,
    row_key: RowKey,
    filters: FilterSet,
    default_sort_by: String,
    default_sort_order: SortOrder,
    sort_by: String,
    sort_order: SortOrder,
    page: u32,
    per_page: u32,
    total_count: u64,
    total_pages: u32,
    rows: Vec<Row>,
    row_keys: Vec<String>,
    rejected: Vec<RowKeyError>,
    loading: bool,
    error: Option<String>,
    last_seq: u64,
}

impl ListController {
    pub fn new(
        resource: ListResource,
        row_key: RowKey,
        filters: FilterSet,
        sort_by: &str,
        sort_order: SortOrder,
        per_page: u32,
    ) -> Self {
        Self {
            resource,
            row_key,
            filters,
            default_sort_by: sort_by.to_string(),
            default_sort_order: sort_order,
            sort_by: sort_by.to_string(),
            sort_order,
            page: 1,
            per_page: per_page.max(1),
            total_count: 0,
            total_pages: 0,
            rows: Vec::new(),
            row_keys: Vec::new(),
            rejected: Vec::new(),
            loading: false,
            error: None,
            last_seq: 0,
        }
    }

    pub fn resource(&self) -> ListResource {
        self.resource
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Stable key of each row, parallel to [`rows`](Self::rows)
    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    /// Rows of the last page that were dropped for lacking a unique key
    pub fn rejected_rows(&self) -> &[RowKeyError] {
        &self.rejected
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Edit filters in place. Edits take effect on the next
    /// [`apply_filters`](Self::apply_filters).
    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    pub fn set_filter(&mut self, name: &str, value: Option<String>) -> bool {
        self.filters.set(name, value)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// The query the current state maps to
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            per_page: self.per_page,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
            filters: self.filters.non_empty(),
        }
    }

    /// Request the current page
    pub fn fetch_page(&mut self) -> FetchTicket {
        self.last_seq += 1;
        self.loading = true;
        self.error = None;

        let ticket = FetchTicket {
            seq: self.last_seq,
            resource: self.resource,
            query: self.query(),
        };
        debug!("{}: fetch #{} {:?}", self.resource, ticket.seq, ticket.query);
        ticket
    }

    /// Go back to the first page and fetch with the current filters
    pub fn apply_filters(&mut self) -> FetchTicket {
        self.page = 1;
        self.fetch_page()
    }

    /// Clear filters and sorting to their defaults, then fetch the first page
    pub fn reset_filters(&mut self) -> FetchTicket {
        self.filters.reset();
        self.sort_by = self.default_sort_by.clone();
        self.sort_order = self.default_sort_order;
        self.page = 1;
        self.fetch_page()
    }

    /// Change the page size; restarts from the first page
    pub fn set_per_page(&mut self, per_page: u32) -> FetchTicket {
        self.per_page = per_page.max(1);
        self.page = 1;
        self.fetch_page()
    }

    pub fn set_sort_by(&mut self, sort_by: &str) -> FetchTicket {
        self.sort_by = sort_by.to_string();
        self.fetch_page()
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) -> FetchTicket {
        self.sort_order = sort_order;
        self.fetch_page()
    }

    pub fn toggle_sort_order(&mut self) -> FetchTicket {
        self.set_sort_order(self.sort_order.toggled())
    }

    /// Move to `page` (1-indexed). Pages outside the known range are ignored.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchTicket> {
        let last = self.total_pages.max(1);
        if page == 0 || page > last {
            return None;
        }
        self.page = page;
        Some(self.fetch_page())
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Whether `seq` is the newest request issued
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.last_seq
    }

    /// Hand back the result of a request issued by this controller
    pub fn apply_response(&mut self, seq: u64, result: Result<ListPage, BackendError>) -> FetchOutcome {
        if !self.is_current(seq) {
            debug!(
                "{}: discarding stale response #{} (latest is #{})",
                self.resource, seq, self.last_seq
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(ListPage { rows, pagination }) => {
                let keyed = self.row_key.partition(rows);
                for rejected in &keyed.rejected {
                    warn!("{}: {} (keyed by {})", self.resource, rejected, self.row_key.description());
                }

                let Pagination {
                    page,
                    per_page,
                    total_count,
                    total_pages,
                } = pagination;
                if page > 0 {
                    self.page = page;
                }
                if per_page > 0 {
                    self.per_page = per_page;
                }
                self.total_count = total_count;
                self.total_pages = total_pages;

                self.rows = keyed.rows;
                self.row_keys = keyed.keys;
                self.rejected = keyed.rejected;
                self.error = None;

                info!(
                    "{}: page {}/{} with {} rows ({} total)",
                    self.resource,
                    self.page,
                    self.total_pages,
                    self.rows.len(),
                    self.total_count
                );
                FetchOutcome::Applied {
                    rows: self.rows.len(),
                    rejected: self.rejected.len(),
                }
            }
            Err(err) => {
                warn!("{}: fetch #{} failed: {}", self.resource, seq, err);
                let message = format!("Failed to fetch {}: {}", self.resource, err);
                self.rows.clear();
                self.row_keys.clear();
                self.rejected.clear();
                self.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Fetch the current page inline and apply it
    pub async fn load(&mut self, backend: &dyn MonitoringBackend) -> FetchOutcome {
        let ticket = self.fetch_page();
        self.run(backend, ticket).await
    }

    /// Send a ticket's request and apply the response
    pub async fn run(&mut self, backend: &dyn MonitoringBackend, ticket: FetchTicket) -> FetchOutcome {
        let result = backend.fetch_list(ticket.resource, &ticket.query).await;
        self.apply_response(ticket.seq, result)
    }
}
