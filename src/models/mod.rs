pub mod job;
pub mod recommendation;
pub mod user;

pub use job::{Job, NewJob};
pub use recommendation::{Recommendation, ScoredMatch};
pub use user::{NewUser, ProfileUpdate, UserProfile};
