use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Accepted job-type preferences
pub const JOB_TYPE_PREFERENCES: [&str; 3] = ["remote", "onsite", "any"];

/// A registered user's profile, the requester side of a recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub location: Option<String>,
    /// Years of experience
    pub experience: Option<f64>,
    pub skills: Vec<String>,
    /// Job-type preference; treated as "any" when absent
    pub job_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub location: Option<String>,
    pub experience: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub job_type: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::InvalidInput("Username is required".to_string()));
        }
        validate_email(&self.email)?;
        validate_experience(self.experience)?;
        validate_job_type(self.job_type.as_deref())
    }

    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            location: self.location,
            experience: self.experience,
            skills: self.skills,
            job_type: self.job_type,
            created_at: Utc::now(),
        }
    }
}

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub experience: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub job_type: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err(AppError::InvalidInput("Username is required".to_string()));
            }
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_experience(self.experience)?;
        validate_job_type(self.job_type.as_deref())
    }

    /// Applies the present fields onto `profile`
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(username) = self.username {
            profile.username = username;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(location) = self.location {
            profile.location = Some(location);
        }
        if let Some(experience) = self.experience {
            profile.experience = Some(experience);
        }
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
        if let Some(job_type) = self.job_type {
            profile.job_type = Some(job_type);
        }
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid && !email.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(
            "Please include a valid email".to_string(),
        ))
    }
}

fn validate_experience(experience: Option<f64>) -> AppResult<()> {
    match experience {
        Some(years) if !years.is_finite() || years < 0.0 => Err(AppError::InvalidInput(
            "Experience must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_job_type(job_type: Option<&str>) -> AppResult<()> {
    match job_type {
        Some(value) if !JOB_TYPE_PREFERENCES.contains(&value) => Err(AppError::InvalidInput(
            "Job type must be remote, onsite, or any".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            location: Some("Pune".to_string()),
            experience: Some(2.0),
            skills: vec!["aws".to_string()],
            job_type: Some("remote".to_string()),
        }
    }

    #[test]
    fn test_validate_new_user() {
        assert!(new_user().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        for email in ["", "asha", "asha@", "@example.com", "asha@example", "a b@example.com"] {
            let mut user = new_user();
            user.email = email.to_string();
            assert!(user.validate().is_err(), "accepted {:?}", email);
        }
    }

    #[test]
    fn test_validate_rejects_negative_experience() {
        let mut user = new_user();
        user.experience = Some(-1.0);
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_job_type() {
        let update = ProfileUpdate {
            job_type: Some("hybrid".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut profile = new_user().into_profile();
        let update = ProfileUpdate {
            experience: Some(0.0),
            skills: Some(vec!["airflow".to_string()]),
            ..Default::default()
        };

        update.apply(&mut profile);

        assert_eq!(profile.username, "asha");
        assert_eq!(profile.experience, Some(0.0));
        assert_eq!(profile.skills, vec!["airflow"]);
        assert_eq!(profile.job_type.as_deref(), Some("remote"));
    }
}
