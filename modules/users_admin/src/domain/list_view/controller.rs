use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::{NotificationTexts, UsersAdminConfig};
use crate::contract::{
    client::UsersApi,
    error::Fault,
    model::{Category, EntryContext, User},
};
use crate::domain::dialog::DialogOutcome;
use crate::domain::list_view::{
    debounce::{debouncer, Debouncer, InputHandle},
    view::{ListView, ListViewOptions},
    window::PageEvent,
    ListViewError,
};
use crate::domain::notify::{Notification, NotificationSink};

/// Result of a delete request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation dialog was declined or dismissed.
    Cancelled,
    /// The record has no identifier.
    Skipped,
}

/// Drives a [`ListView`]: fetches through the collection client, feeds
/// debounced search input into it and runs the delete flow.
pub struct UsersListController {
    api: Arc<dyn UsersApi>,
    sink: Arc<dyn NotificationSink>,
    texts: NotificationTexts,
    view: ListView,
    search: Debouncer<String>,
    input: Option<InputHandle<String>>,
}

impl UsersListController {
    pub fn new(
        api: Arc<dyn UsersApi>,
        sink: Arc<dyn NotificationSink>,
        config: &UsersAdminConfig,
        entry: EntryContext,
    ) -> Self {
        let (input, search) = debouncer(config.search_debounce);
        Self {
            api,
            sink,
            texts: config.notifications.clone(),
            view: ListView::new(ListViewOptions::from(config), entry),
            search,
            input: Some(input),
        }
    }

    /// Handle for raw search-box keystrokes; `None` after [`Self::close_input`].
    pub fn search_input(&self) -> Option<InputHandle<String>> {
        self.input.clone()
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Fetch the whole collection and reset search, filter and window.
    ///
    /// The fault is returned for local handling only; it was already
    /// reported by the interceptor in front of the client.
    #[instrument(name = "users_admin.list.refresh", skip_all)]
    pub async fn refresh(&mut self) -> Result<(), Fault> {
        let token = self.view.begin_fetch();
        match self.api.list().await {
            Ok(users) => {
                if self.view.complete_fetch(token, users) {
                    self.search
                        .mark_forwarded(self.view.search_display().to_string());
                    debug!(total = self.view.collection().len(), "collection loaded");
                }
                Ok(())
            }
            Err(fault) => {
                self.view.fail_fetch(token);
                Err(fault)
            }
        }
    }

    /// Wait for the next effective search term and apply it.
    ///
    /// Returns the applied term, or `None` once every search input handle,
    /// including the controller's own, is gone.
    pub async fn next_search(&mut self) -> Option<String> {
        let term = self.search.next().await?;
        debug!(term = %term, "search applied");
        self.view.apply_search(&term);
        Some(term)
    }

    /// Close the controller's own input handle so that [`Self::next_search`]
    /// ends when the outside handles are dropped.
    pub fn close_input(&mut self) {
        self.input = None;
    }

    pub fn apply_category(&mut self, category: Category) {
        self.view.apply_category(category);
        self.search
            .mark_forwarded(self.view.search_display().to_string());
    }

    pub fn change_page(&mut self, event: PageEvent) -> Result<(), ListViewError> {
        self.view.change_page(event)
    }

    pub fn details(&self, id: &str) -> Option<&User> {
        self.view.details(id)
    }

    /// Delete `user` once `confirmation` resolves to a confirmed dialog.
    ///
    /// On success a notification is sent and the collection is refetched.
    /// On failure the collection is left as it was.
    #[instrument(name = "users_admin.list.delete", skip_all, fields(user_id = ?user.id))]
    pub async fn delete<F>(&mut self, user: &User, confirmation: F) -> Result<DeleteOutcome, Fault>
    where
        F: Future<Output = DialogOutcome<bool>>,
    {
        if !confirmation.await.is_confirmed() {
            debug!("delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        let Some(id) = user.id.as_deref() else {
            debug!("record without id, nothing to delete");
            return Ok(DeleteOutcome::Skipped);
        };

        self.api.remove(id).await?;
        info!(user_id = %id, "user deleted");
        self.sink
            .notify(Notification::info(&self.texts.user_deleted, &self.texts));

        if let Err(fault) = self.refresh().await {
            warn!(error = %fault, "refresh after delete failed");
        }
        Ok(DeleteOutcome::Deleted)
    }
}
