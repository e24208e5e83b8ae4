//! Credit card application intake, evaluation, and storage seams.

pub mod domain;
pub mod evaluation;
pub mod frequent_flyer;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationId, CreditCardApplication, NewApplicationDetails};
pub use evaluation::{
    ApplicationDecision, CreditCardApplicationEvaluator, AUTO_REFERRAL_MAX_AGE,
    HIGH_INCOME_THRESHOLD, LOW_INCOME_THRESHOLD,
};
pub use frequent_flyer::{FrequentFlyerNumberValidator, LoyaltySchemeValidator};
pub use intake::{ApplicationIntake, FieldViolation, IntakeRejection, MINIMUM_APPLICANT_AGE};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, RepositoryError,
};
pub use router::application_router;
pub use service::{ApplicationServiceError, CreditCardApplicationService};
