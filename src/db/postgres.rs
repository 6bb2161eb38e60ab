use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    db::{JobStore, UserStore},
    error::{AppError, AppResult},
    models::{Job, NewJob, NewUser, ProfileUpdate, UserProfile},
};

const UNIQUE_VIOLATION: &str = "23505";

const JOB_COLUMNS: &str = "id, title, company, location, skills_required, job_type, created_at";
const USER_COLUMNS: &str = "id, username, email, location, experience, skills, job_type, created_at";

/// Creates a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Postgres-backed job and user store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-constraint violation to `Conflict`, anything else as usual
fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    let is_unique = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if is_unique {
        AppError::Conflict(message.to_string())
    } else {
        AppError::from(err)
    }
}

#[async_trait::async_trait]
impl JobStore for PgStore {
    async fn list_all(&self) -> AppResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY created_at, id",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn create(&self, job: NewJob) -> AppResult<Job> {
        let job = job.into_job();

        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, company, location, skills_required, job_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.skills_required)
        .bind(&job.job_type)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl UserStore for PgStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> AppResult<UserProfile> {
        let profile = user.into_profile();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, location, experience, skills, job_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.location)
        .bind(profile.experience)
        .bind(&profile.skills)
        .bind(&profile.job_type)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User already exists"))?;

        Ok(profile)
    }

    async fn update(&self, id: Uuid, update: ProfileUpdate) -> AppResult<Option<UserProfile>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut profile) = existing else {
            return Ok(None);
        };

        update.apply(&mut profile);

        sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, location = $4, experience = $5, skills = $6, job_type = $7
            WHERE id = $1
            "#,
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.location)
        .bind(profile.experience)
        .bind(&profile.skills)
        .bind(&profile.job_type)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "Email already in use"))?;

        tx.commit().await?;

        Ok(Some(profile))
    }
}
