use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use crate::config::NotificationTexts;
use crate::contract::{
    client::UsersApi,
    error::Fault,
    model::{NewUser, User, UserPatch},
};
use crate::domain::fault::classify;
use crate::domain::notify::{Notification, NotificationSink};

/// UsersApi decorator that reports every fault to the user exactly once and
/// then hands the same fault back to the caller.
pub struct InterceptedUsersClient {
    inner: Arc<dyn UsersApi>,
    sink: Arc<dyn NotificationSink>,
    texts: NotificationTexts,
}

impl InterceptedUsersClient {
    pub fn new(
        inner: Arc<dyn UsersApi>,
        sink: Arc<dyn NotificationSink>,
        texts: NotificationTexts,
    ) -> Self {
        Self { inner, sink, texts }
    }

    fn report(&self, op: &'static str, fault: Fault) -> Fault {
        let message = classify(&fault, &self.texts.fallback_error);
        error!(
            op,
            kind = fault.kind(),
            status = fault.status(),
            error = %fault,
            "collection call failed"
        );
        self.sink.notify(Notification::error(message, &self.texts));
        fault
    }
}

#[async_trait]
impl UsersApi for InterceptedUsersClient {
    async fn list(&self) -> Result<Vec<User>, Fault> {
        self.inner.list().await.map_err(|f| self.report("list", f))
    }

    async fn get(&self, id: &str) -> Result<User, Fault> {
        self.inner.get(id).await.map_err(|f| self.report("get", f))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, Fault> {
        self.inner
            .create(new_user)
            .await
            .map_err(|f| self.report("create", f))
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, Fault> {
        self.inner
            .update(id, patch)
            .await
            .map_err(|f| self.report("update", f))
    }

    async fn remove(&self, id: &str) -> Result<(), Fault> {
        self.inner.remove(id).await.map_err(|f| self.report("remove", f))
    }
}
