use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Job;

/// A job posting paired with its similarity to the requester's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub job: Job,
    pub score: f64,
}

/// Ranked recommendation returned to the requester
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub requester_id: Uuid,
    /// Requester's display name
    pub candidate: String,
    /// Highest score first
    pub matches: Vec<ScoredMatch>,
}
