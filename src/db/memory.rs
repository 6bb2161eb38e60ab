use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::{JobStore, UserStore},
    error::{AppError, AppResult},
    models::{Job, NewJob, NewUser, ProfileUpdate, UserProfile},
};

/// In-process store used by tests and when no database is configured
///
/// Jobs live in a `Vec` so `list_all` keeps insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    jobs: RwLock<Vec<Job>>,
    users: RwLock<Vec<UserProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl JobStore for InMemoryStore {
    async fn list_all(&self) -> AppResult<Vec<Job>> {
        Ok(self.jobs.read().await.clone())
    }

    async fn create(&self, job: NewJob) -> AppResult<Job> {
        let job = job.into_job();
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() != before)
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<UserProfile> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let profile = user.into_profile();
        users.push(profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: Uuid, update: ProfileUpdate) -> AppResult<Option<UserProfile>> {
        let mut users = self.users.write().await;

        if let Some(email) = &update.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::Conflict("Email already in use".to_string()));
            }
        }

        match users.iter_mut().find(|u| u.id == id) {
            Some(profile) => {
                update.apply(profile);
                Ok(Some(profile.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            skills_required: vec![],
            job_type: "Full-time".to_string(),
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "asha".to_string(),
            email: email.to_string(),
            location: None,
            experience: Some(1.0),
            skills: vec!["aws".to_string()],
            job_type: None,
        }
    }

    #[tokio::test]
    async fn test_jobs_keep_insertion_order() {
        let store = InMemoryStore::new();
        for title in ["First", "Second", "Third"] {
            JobStore::create(&store, new_job(title)).await.unwrap();
        }

        let titles: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_delete_job() {
        let store = InMemoryStore::new();
        let job = JobStore::create(&store, new_job("Gone")).await.unwrap();

        assert!(store.delete(job.id).await.unwrap());
        assert!(!store.delete(job.id).await.unwrap());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        UserStore::create(&store, new_user("a@example.com")).await.unwrap();

        let err = UserStore::create(&store, new_user("a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_user() {
        let store = InMemoryStore::new();
        let user = UserStore::create(&store, new_user("a@example.com")).await.unwrap();

        let update = ProfileUpdate {
            skills: Some(vec!["airflow".to_string()]),
            ..Default::default()
        };
        let updated = store.update(user.id, update).await.unwrap().unwrap();
        assert_eq!(updated.skills, vec!["airflow"]);

        let missing = store
            .update(Uuid::new_v4(), ProfileUpdate::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
