use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{Labels, UsersAdminConfig};
use crate::contract::model::{Category, EntryContext, User};
use crate::domain::list_view::{
    filter::{filter_by_category, filter_by_text, SearchField, StatusWords},
    window::{slice, total_pages, PageEvent, PageWindow},
    ListViewError,
};
use crate::domain::stats::UserStats;

/// Static settings of a list view.
#[derive(Debug, Clone)]
pub struct ListViewOptions {
    pub page_size_options: Vec<usize>,
    pub default_page_size: usize,
    pub search_fields: Vec<SearchField>,
    pub labels: Labels,
}

impl From<&UsersAdminConfig> for ListViewOptions {
    fn from(cfg: &UsersAdminConfig) -> Self {
        Self {
            page_size_options: cfg.page_size_options.clone(),
            default_page_size: cfg.default_page_size,
            search_fields: cfg.search_fields.clone(),
            labels: cfg.labels.clone(),
        }
    }
}

impl Default for ListViewOptions {
    fn default() -> Self {
        Self::from(&UsersAdminConfig::default())
    }
}

/// Which predicate currently produces the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ActiveFilter {
    None,
    Text(String),
    Category(Category),
}

/// Identifies one fetch; only the most recently issued token may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// One rendered page of the filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub items: &'a [User],
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// In-memory list state: collection, filter, search box and page window.
///
/// The filtered set is rebuilt whenever the collection or the filter changes;
/// the visible slice is always cut from the filtered set.
#[derive(Debug)]
pub struct ListView {
    options: ListViewOptions,
    words: StatusWords,
    collection: Vec<User>,
    filtered: Vec<User>,
    filter: ActiveFilter,
    search_display: String,
    window: PageWindow,
    pending_category: Option<Category>,
    latest_request: u64,
    loading: bool,
    recomputes: u64,
}

impl ListView {
    pub fn new(options: ListViewOptions, entry: EntryContext) -> Self {
        let words = StatusWords::new(&options.labels.active, &options.labels.inactive);
        let window = PageWindow::new(options.default_page_size);
        Self {
            options,
            words,
            collection: Vec::new(),
            filtered: Vec::new(),
            filter: ActiveFilter::None,
            search_display: String::new(),
            window,
            pending_category: entry.category,
            latest_request: 0,
            loading: false,
            recomputes: 0,
        }
    }

    // ---- fetch ----

    pub fn begin_fetch(&mut self) -> RequestToken {
        self.latest_request += 1;
        self.loading = true;
        RequestToken(self.latest_request)
    }

    /// Land a fetched collection. Returns `false` (and changes nothing) when
    /// a newer fetch was issued after `token`.
    pub fn complete_fetch(&mut self, token: RequestToken, users: Vec<User>) -> bool {
        if token.0 != self.latest_request {
            debug!(
                token = token.0,
                latest = self.latest_request,
                "discarding stale fetch result"
            );
            return false;
        }

        self.loading = false;
        self.collection = users;
        self.search_display.clear();
        self.filter = ActiveFilter::None;
        self.recompute();

        if let Some(category) = self.pending_category.take() {
            self.apply_category(category);
        }
        true
    }

    pub fn fail_fetch(&mut self, token: RequestToken) {
        if token.0 == self.latest_request {
            self.loading = false;
        }
    }

    // ---- inputs ----

    /// Apply an effective (already debounced) search term.
    pub fn apply_search(&mut self, term: &str) {
        self.search_display = term.to_string();
        self.filter = if term.trim().is_empty() {
            ActiveFilter::None
        } else {
            ActiveFilter::Text(term.to_string())
        };
        self.recompute();
    }

    /// Restrict to one status and show its label in the search box.
    pub fn apply_category(&mut self, category: Category) {
        self.search_display = match category {
            Category::Active => self.options.labels.active.clone(),
            Category::Inactive => self.options.labels.inactive.clone(),
        };
        self.filter = ActiveFilter::Category(category);
        self.recompute();
    }

    pub fn change_page(&mut self, event: PageEvent) -> Result<(), ListViewError> {
        if !self.options.page_size_options.contains(&event.page_size) {
            return Err(ListViewError::UnsupportedPageSize {
                size: event.page_size,
                options: self.options.page_size_options.clone(),
            });
        }
        self.window.apply(event);
        trace!(index = self.window.index, size = self.window.size, "page changed");
        Ok(())
    }

    fn recompute(&mut self) {
        self.filtered = match &self.filter {
            ActiveFilter::None => self.collection.clone(),
            ActiveFilter::Text(term) => filter_by_text(
                &self.collection,
                term,
                &self.options.search_fields,
                &self.words,
            ),
            ActiveFilter::Category(category) => filter_by_category(&self.collection, *category),
        };
        self.window.first_page();
        self.recomputes += 1;
        debug!(
            total = self.collection.len(),
            filtered = self.filtered.len(),
            "filtered set recomputed"
        );
    }

    // ---- outputs ----

    pub fn visible(&self) -> &[User] {
        slice(&self.filtered, self.window.index, self.window.size)
    }

    pub fn page(&self) -> PageView<'_> {
        PageView {
            items: self.visible(),
            page_index: self.window.index,
            page_size: self.window.size,
            total_items: self.filtered.len(),
            total_pages: total_pages(self.filtered.len(), self.window.size),
        }
    }

    pub fn collection(&self) -> &[User] {
        &self.collection
    }

    pub fn filtered(&self) -> &[User] {
        &self.filtered
    }

    pub fn filter(&self) -> &ActiveFilter {
        &self.filter
    }

    pub fn search_display(&self) -> &str {
        &self.search_display
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.options.page_size_options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// How many times the filtered set has been rebuilt.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    pub fn stats(&self) -> UserStats {
        UserStats::from_users(&self.collection)
    }

    /// Record shown in the detail dialog.
    pub fn details(&self, id: &str) -> Option<&User> {
        self.collection
            .iter()
            .find(|u| u.id.as_deref() == Some(id))
    }
}
