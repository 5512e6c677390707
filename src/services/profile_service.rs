use std::sync::Arc;

use uuid::Uuid;

use crate::repos::{NewProfile, ProfilePatch, ProfileRepository, ProfileRow, RepoResult};

/// Orchestration between handlers and the profile store.
///
/// Holds the store as a named capability; every call is forwarded as is.
#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: NewProfile) -> RepoResult<Uuid> {
        self.repo.create(&input).await
    }

    pub async fn get(&self, user_id: Uuid) -> RepoResult<ProfileRow> {
        self.repo.get(user_id).await
    }

    pub async fn update(&self, user_id: Uuid, patch: ProfilePatch) -> RepoResult<()> {
        self.repo.update(user_id, &patch).await
    }

    pub async fn delete(&self, user_id: Uuid) -> RepoResult<()> {
        self.repo.delete(user_id).await
    }
}
