use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{ApplicationId, NewApplicationDetails};
use super::evaluation::CreditCardApplicationEvaluator;
use super::frequent_flyer::FrequentFlyerNumberValidator;
use super::intake::{ApplicationIntake, IntakeRejection};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};

/// Service composing intake validation, the evaluator, and the repository.
pub struct CreditCardApplicationService<R, V: ?Sized> {
    intake: ApplicationIntake,
    repository: Arc<R>,
    evaluator: Arc<CreditCardApplicationEvaluator<V>>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    application_id_for(APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Padded to the full width of `u64` so identifier order always matches submission order.
pub(crate) fn application_id_for(sequence: u64) -> ApplicationId {
    ApplicationId(format!("app-{sequence:020}"))
}

impl<R, V> CreditCardApplicationService<R, V>
where
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    pub fn new(repository: Arc<R>, validator: Arc<V>) -> Self {
        Self::with_evaluator(
            repository,
            Arc::new(CreditCardApplicationEvaluator::new(validator)),
        )
    }

    pub fn with_evaluator(
        repository: Arc<R>,
        evaluator: Arc<CreditCardApplicationEvaluator<V>>,
    ) -> Self {
        Self {
            intake: ApplicationIntake,
            repository,
            evaluator,
        }
    }

    pub fn evaluator(&self) -> &CreditCardApplicationEvaluator<V> {
        &self.evaluator
    }

    /// Validate, evaluate, and persist a submitted application.
    ///
    /// Rejected forms are never evaluated or stored.
    pub fn submit(
        &self,
        details: NewApplicationDetails,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let application = match self.intake.application_from_details(details) {
            Ok(application) => application,
            Err(rejection) => {
                warn!(violations = rejection.violations.len(), "application rejected at intake");
                return Err(rejection.into());
            }
        };

        let decision = self.evaluator.evaluate(&application);
        let record = ApplicationRecord {
            id: next_application_id(),
            application,
            decision,
            submitted_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.id,
            decision = stored.decision.label(),
            "application stored"
        );
        Ok(stored)
    }

    /// Fetch a stored application for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Applications awaiting human review.
    pub fn referred(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.repository.referred(limit)?)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Rejected(#[from] IntakeRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
