mod policy;

pub use policy::ApplicationDecision;

use std::sync::Arc;

use tracing::debug;

use super::domain::CreditCardApplication;
use super::frequent_flyer::FrequentFlyerNumberValidator;

/// Incomes at or above this are accepted without further checks.
pub const HIGH_INCOME_THRESHOLD: i32 = 100_000;
/// Adult applicants with a valid number earning below this are declined.
pub const LOW_INCOME_THRESHOLD: i32 = 20_000;
/// Applicants this age or younger always go to a human.
pub const AUTO_REFERRAL_MAX_AGE: i32 = 20;

/// Stateless rule engine deciding credit card applications.
///
/// The validator is injected and shared; the evaluator never constructs one. Rules fire in
/// a fixed order and the first match wins:
///
/// 1. income `>=` [`HIGH_INCOME_THRESHOLD`] is auto-accepted without consulting the validator;
/// 2. an invalid frequent-flyer number is referred to a human;
/// 3. age `<=` [`AUTO_REFERRAL_MAX_AGE`] is referred to a human;
/// 4. income `<` [`LOW_INCOME_THRESHOLD`] is auto-declined;
/// 5. everything else is referred to a human.
pub struct CreditCardApplicationEvaluator<V: ?Sized> {
    validator: Arc<V>,
}

impl<V> CreditCardApplicationEvaluator<V>
where
    V: FrequentFlyerNumberValidator + ?Sized,
{
    pub fn new(validator: Arc<V>) -> Self {
        Self { validator }
    }

    pub fn evaluate(&self, application: &CreditCardApplication) -> ApplicationDecision {
        let decision = self.decide(application);

        debug!(
            gross_annual_income = application.gross_annual_income,
            age = application.age,
            decision = decision.label(),
            "evaluated credit card application"
        );

        decision
    }

    // Comparisons only: income and age may sit at i32::MIN or i32::MAX.
    fn decide(&self, application: &CreditCardApplication) -> ApplicationDecision {
        if application.gross_annual_income >= HIGH_INCOME_THRESHOLD {
            return ApplicationDecision::AutoAccepted;
        }

        if !self
            .validator
            .is_valid(application.frequent_flyer_number.as_deref())
        {
            return ApplicationDecision::ReferredToHuman;
        }

        if application.age <= AUTO_REFERRAL_MAX_AGE {
            return ApplicationDecision::ReferredToHuman;
        }

        if application.gross_annual_income < LOW_INCOME_THRESHOLD {
            return ApplicationDecision::AutoDeclined;
        }

        ApplicationDecision::ReferredToHuman
    }
}

impl<V: ?Sized> Clone for CreditCardApplicationEvaluator<V> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
        }
    }
}
