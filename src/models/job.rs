use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A job posting as stored and returned to clients
///
/// Postings are immutable inputs to the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Store-assigned identifier, immutable once created
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub skills_required: Vec<String>,
    /// Employment category (e.g., "Full-time", "Contract")
    pub job_type: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a job posting
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub job_type: String,
}

impl NewJob {
    /// Rejects postings with blank identifying fields
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("Job {} is required", field)));
            }
        }
        Ok(())
    }

    /// Materializes the posting with a fresh identifier
    pub fn into_job(self) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: self.title,
            company: self.company,
            location: self.location,
            skills_required: self.skills_required,
            job_type: self.job_type,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job() -> NewJob {
        NewJob {
            title: "Data Engineer".to_string(),
            company: "DataWorks".to_string(),
            location: "Bangalore".to_string(),
            skills_required: vec!["Python".to_string(), "AWS".to_string()],
            job_type: "Contract".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_job() {
        assert!(new_job().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut job = new_job();
        job.title = "  ".to_string();
        let err = job.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("title")));
    }

    #[test]
    fn test_new_job_deserializes_camel_case() {
        let json = r#"{
            "title": "Cloud Architect",
            "company": "CloudNet",
            "location": "Pune",
            "skillsRequired": ["AWS", "GCP"],
            "jobType": "Contract"
        }"#;

        let job: NewJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.skills_required, vec!["AWS", "GCP"]);
        assert_eq!(job.job_type, "Contract");
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let job = new_job().into_job();
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["skillsRequired"][1], "AWS");
        assert_eq!(value["jobType"], "Contract");
        assert!(value.get("createdAt").is_some());
    }
}
