use async_trait::async_trait;

use crate::contract::{
    error::Fault,
    model::{NewUser, User, UserPatch},
};

/// Operations against the remote user collection.
///
/// Every call is single-shot: implementations do not retry and keep no cache.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// All records; the endpoint performs no filtering or paging.
    async fn list(&self) -> Result<Vec<User>, Fault>;

    /// Fails with [`Fault::NotFound`] for unknown ids.
    async fn get(&self, id: &str) -> Result<User, Fault>;

    /// Returns the stored record with its assigned id.
    async fn create(&self, new_user: NewUser) -> Result<User, Fault>;

    /// Fails with [`Fault::NotFound`] for unknown ids.
    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, Fault>;

    /// Fails with [`Fault::NotFound`] for unknown ids.
    async fn remove(&self, id: &str) -> Result<(), Fault>;
}
