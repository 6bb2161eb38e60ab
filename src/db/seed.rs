use crate::{db::JobStore, error::AppResult, models::NewJob};

/// The standard postings loaded into an empty job board
pub fn default_jobs() -> Vec<NewJob> {
    [
        ("Full Stack Developer", "TechCorp", "Remote", &["JavaScript", "React", "Node.js", "MongoDB"][..], "Full-time"),
        ("Data Engineer", "DataWorks", "Bangalore", &["Python", "SQL", "Airflow", "AWS"][..], "Contract"),
        ("Frontend Developer", "Designly", "Mumbai", &["HTML", "CSS", "JavaScript", "React"][..], "Internship"),
        ("Backend Developer", "CodeBase", "Hyderabad", &["Node.js", "Express", "MongoDB", "Docker"][..], "Full-time"),
        ("Machine Learning Engineer", "AI Innovations", "Remote", &["Python", "TensorFlow", "PyTorch", "NLP"][..], "Full-time"),
        ("Cloud Architect", "CloudNet", "Pune", &["AWS", "Azure", "GCP", "Kubernetes"][..], "Contract"),
        ("DevOps Engineer", "Opsify", "Chennai", &["CI/CD", "Docker", "Kubernetes", "Linux"][..], "Full-time"),
        ("Cybersecurity Analyst", "SecureIT", "Delhi", &["Network Security", "Penetration Testing", "SIEM", "Linux"][..], "Full-time"),
        ("Mobile App Developer", "Appify", "Remote", &["Flutter", "Dart", "Firebase"][..], "Internship"),
        ("UI/UX Designer", "DesignPro", "Bangalore", &["Figma", "Adobe XD", "Wireframing", "Prototyping"][..], "Full-time"),
    ]
    .into_iter()
    .map(|(title, company, location, skills, job_type)| NewJob {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        skills_required: skills.iter().map(|s| s.to_string()).collect(),
        job_type: job_type.to_string(),
    })
    .collect()
}

/// Inserts the default postings when the store has none
///
/// Returns the number of postings inserted.
pub async fn seed_jobs_if_empty(store: &dyn JobStore) -> AppResult<usize> {
    if !store.list_all().await?.is_empty() {
        tracing::info!("Job store already populated, skipping seed");
        return Ok(0);
    }

    let jobs = default_jobs();
    let count = jobs.len();
    for job in jobs {
        store.create(job).await?;
    }

    tracing::info!(count = count, "Seeded job postings");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryStore, MockJobStore};
    use crate::error::AppError;

    #[test]
    fn test_default_jobs_are_valid() {
        let jobs = default_jobs();
        assert_eq!(jobs.len(), 10);
        assert!(jobs.iter().all(|job| job.validate().is_ok()));
        assert_eq!(jobs[1].skills_required, vec!["Python", "SQL", "Airflow", "AWS"]);
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let store = InMemoryStore::new();

        assert_eq!(seed_jobs_if_empty(&store).await.unwrap(), 10);
        assert_eq!(seed_jobs_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.list_all().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_seed_surfaces_storage_failure() {
        let mut store = MockJobStore::new();
        store
            .expect_list_all()
            .returning(|| Err(AppError::StorageUnavailable("connection refused".to_string())));
        store.expect_create().times(0);

        let err = seed_jobs_if_empty(&store).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
