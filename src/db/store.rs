use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Job, NewJob, NewUser, ProfileUpdate, UserProfile},
};

/// Job posting persistence
///
/// `list_all` returns postings in a stable order (creation order); the
/// recommendation engine relies on receiving the same order it scores.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Job>>;

    async fn create(&self, job: NewJob) -> AppResult<Job>;

    /// Returns false when no posting had this id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// User profile persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Fails with `Conflict` when the email is already registered
    async fn create(&self, user: NewUser) -> AppResult<UserProfile>;

    /// Returns `None` when the user does not exist
    async fn update(&self, id: Uuid, update: ProfileUpdate) -> AppResult<Option<UserProfile>>;
}
