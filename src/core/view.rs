use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    aggregate::average_match_level,
    filters::{apply_filters, FilterCriteria, FilterField},
    normalize::{normalize, normalize_page},
    pagination::{PageSizes, PaginationState},
    sorting::{sort_users, SortConfig, SortKey},
};
use crate::models::{PageResponse, RawUser, User};

/// Page fetch the controller wants issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequest {
    pub generation: u64,
    pub page: u64,
    pub page_size: u64,
}

/// Single-record fetch the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub generation: u64,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub user_id: String,
    /// `None` while loading, and after a failed or empty fetch
    pub record: Option<User>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    List,
    Detail(DetailState),
}

/// What happened to a completed page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The page replaced the working set. `refetch` is set when the reported
    /// total no longer covers the current page and a clamped page must load.
    Applied { refetch: Option<ListRequest> },
    /// The fetch failed and the previous working set stays on screen.
    /// Pagination already points at the requested page, so refreshing
    /// retries that page.
    Failed,
    Stale,
}

/// What happened to a completed detail fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Loaded,
    Empty,
    Failed,
    Stale,
}

/// List/detail state machine owning the working set of one view session
///
/// The controller never performs I/O. List and detail intents hand back a
/// request tagged with a generation number; the caller runs it against the
/// data source and passes the result to `apply_list_result` or
/// `apply_detail_result`. A result whose generation is no longer current is
/// dropped, so a slow fetch cannot overwrite the state of a newer one.
#[derive(Debug, Clone)]
pub struct ViewController {
    users: Vec<User>,
    total: u64,
    pagination: PaginationState,
    sort: SortConfig,
    filters: FilterCriteria,
    view: ViewState,
    loading: bool,
    fetch_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    list_generation: u64,
    detail_generation: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(PageSizes::default())
    }
}

impl ViewController {
    pub fn new(sizes: PageSizes) -> Self {
        Self {
            users: Vec::new(),
            total: 0,
            pagination: PaginationState::new(sizes),
            sort: SortConfig::default(),
            filters: FilterCriteria::default(),
            view: ViewState::List,
            // Nothing is loaded until the first fetch completes
            loading: true,
            fetch_error: None,
            fetched_at: None,
            list_generation: 0,
            detail_generation: 0,
        }
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Users of the loaded page, unfiltered and in backend order
    pub fn loaded_users(&self) -> &[User] {
        &self.users
    }

    /// Filtered then sorted users of the loaded page
    pub fn visible_users(&self) -> Vec<&User> {
        sort_users(apply_filters(&self.filters, &self.users), self.sort)
    }

    // List intents

    /// Load the current page again (also used for the first load)
    pub fn refresh(&mut self) -> ListRequest {
        self.begin_list_fetch()
    }

    pub fn go_to_page(&mut self, n: u64) -> Option<ListRequest> {
        self.pagination.go_to_page(n).then(|| self.begin_list_fetch())
    }

    pub fn go_to_page_input(&mut self, input: &str) -> Option<ListRequest> {
        self.pagination
            .go_to_page_input(input)
            .then(|| self.begin_list_fetch())
    }

    pub fn next(&mut self) -> Option<ListRequest> {
        self.pagination.next().then(|| self.begin_list_fetch())
    }

    pub fn prev(&mut self) -> Option<ListRequest> {
        self.pagination.prev().then(|| self.begin_list_fetch())
    }

    pub fn toggle_all_mode(&mut self) -> ListRequest {
        self.pagination.toggle_all_mode();
        self.begin_list_fetch()
    }

    // Local intents, never fetch

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
    }

    // Detail intents

    pub fn select_user(&mut self, user_id: impl Into<String>) -> DetailRequest {
        let user_id = user_id.into();
        self.detail_generation += 1;
        self.view = ViewState::Detail(DetailState {
            user_id: user_id.clone(),
            record: None,
            loading: true,
        });
        DetailRequest {
            generation: self.detail_generation,
            user_id,
        }
    }

    /// Leave the detail view. The list state from before the drill-down is
    /// kept as is and no list fetch is issued.
    pub fn go_back(&mut self) -> bool {
        if self.view == ViewState::List {
            return false;
        }
        // Any detail fetch still in flight belongs to the view we just left
        self.detail_generation += 1;
        self.view = ViewState::List;
        true
    }

    // Completions

    pub fn apply_list_result<E: Display>(
        &mut self,
        request: ListRequest,
        result: Result<PageResponse, E>,
    ) -> ListOutcome {
        if request.generation != self.list_generation {
            tracing::warn!(
                "Discarding stale page {} result (generation {}, current {})",
                request.page,
                request.generation,
                self.list_generation
            );
            return ListOutcome::Stale;
        }

        self.loading = false;

        match result {
            Ok(page) => {
                self.users = normalize_page(page.data);
                self.total = page.total;
                self.fetch_error = None;
                self.fetched_at = Some(Utc::now());

                tracing::debug!(
                    "Loaded page {} ({} users, total {})",
                    request.page,
                    self.users.len(),
                    self.total
                );

                let refetch = self
                    .pagination
                    .apply_total(page.total)
                    .then(|| self.begin_list_fetch());
                ListOutcome::Applied { refetch }
            }
            Err(e) => {
                // Previous page stays visible
                tracing::error!("Failed to fetch page {}: {}", request.page, e);
                self.fetch_error = Some(e.to_string());
                ListOutcome::Failed
            }
        }
    }

    pub fn apply_detail_result<E: Display>(
        &mut self,
        request: &DetailRequest,
        result: Result<Option<RawUser>, E>,
    ) -> DetailOutcome {
        let ViewState::Detail(detail) = &mut self.view else {
            return DetailOutcome::Stale;
        };
        if request.generation != self.detail_generation {
            tracing::warn!(
                "Discarding stale detail result for user {} (generation {}, current {})",
                request.user_id,
                request.generation,
                self.detail_generation
            );
            return DetailOutcome::Stale;
        }

        detail.loading = false;

        match result {
            Ok(Some(raw)) => {
                detail.record = Some(normalize(raw));
                DetailOutcome::Loaded
            }
            Ok(None) => {
                tracing::debug!("No record for user {}", request.user_id);
                detail.record = None;
                DetailOutcome::Empty
            }
            Err(e) => {
                tracing::error!("Failed to fetch user {}: {}", request.user_id, e);
                detail.record = None;
                DetailOutcome::Failed
            }
        }
    }

    /// Read-only projection for the presentation layer
    pub fn snapshot(&self) -> ViewSnapshot {
        let detail = match &self.view {
            ViewState::List => None,
            ViewState::Detail(detail) => Some(DetailSnapshot {
                user_id: detail.user_id.clone(),
                loading: detail.loading,
                record: detail.record.as_ref().map(UserRow::from),
            }),
        };

        ViewSnapshot {
            mode: match self.view {
                ViewState::List => ViewMode::List,
                ViewState::Detail(_) => ViewMode::Detail,
            },
            users: self.visible_users().into_iter().map(UserRow::from).collect(),
            loaded_count: self.users.len(),
            total: self.total,
            pagination: self.pagination,
            sort: self.sort,
            filters: self.filters.clone(),
            loading: self.loading,
            fetch_error: self.fetch_error.clone(),
            fetched_at: self.fetched_at,
            detail,
        }
    }

    fn begin_list_fetch(&mut self) -> ListRequest {
        self.list_generation += 1;
        self.loading = true;
        ListRequest {
            generation: self.list_generation,
            page: self.pagination.current_page,
            page_size: self.pagination.page_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Detail,
}

/// A user plus the derived values the list shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    #[serde(flatten)]
    pub user: User,
    pub matches_count: usize,
    pub average_match_level: f64,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            user: user.clone(),
            matches_count: user.matches.len(),
            average_match_level: average_match_level(&user.matches),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSnapshot {
    pub user_id: String,
    pub loading: bool,
    pub record: Option<UserRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub mode: ViewMode,
    pub users: Vec<UserRow>,
    pub loaded_count: usize,
    pub total: u64,
    pub pagination: PaginationState,
    pub sort: SortConfig,
    pub filters: FilterCriteria,
    pub loading: bool,
    pub fetch_error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub detail: Option<DetailSnapshot>,
}
