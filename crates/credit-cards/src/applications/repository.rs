use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, CreditCardApplication};
use super::evaluation::ApplicationDecision;

/// Repository record containing the application and the decision reached at intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub application: CreditCardApplication,
    pub decision: ApplicationDecision,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            applicant: self.application.applicant_name(),
            decision: self.decision,
            decision_summary: self.decision.summary(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Applications awaiting human review, oldest first.
    fn referred(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a stored application. The frequent-flyer number is withheld.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub applicant: String,
    pub decision: ApplicationDecision,
    pub decision_summary: String,
    pub submitted_at: DateTime<Utc>,
}
