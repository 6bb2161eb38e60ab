use crate::models::Job;

/// Preference rendered when the profile has none
pub const DEFAULT_JOB_TYPE: &str = "any";

/// Renders the query-side text sent to the embedding provider
pub fn query_text(expanded_skills: &[String], experience: f64, job_type: Option<&str>) -> String {
    format!(
        "Skills: {}. Experience: {} years. Preferences: {}.",
        expanded_skills.join(", "),
        experience,
        job_type.unwrap_or(DEFAULT_JOB_TYPE)
    )
}

/// Renders the document-side text for one posting
pub fn job_text(job: &Job) -> String {
    format!(
        "{} at {} in {}. Skills: {}. Type: {}.",
        job.title,
        job.company,
        job.location,
        job.skills_required.join(", "),
        job.job_type
    )
}
