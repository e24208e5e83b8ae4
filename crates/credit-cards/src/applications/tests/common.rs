use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use serde_json::Value;

use crate::applications::domain::{ApplicationId, CreditCardApplication, NewApplicationDetails};
use crate::applications::evaluation::{
    ApplicationDecision, CreditCardApplicationEvaluator, HIGH_INCOME_THRESHOLD,
    LOW_INCOME_THRESHOLD,
};
use crate::applications::frequent_flyer::FrequentFlyerNumberValidator;
use crate::applications::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError,
};
use crate::applications::{application_router, CreditCardApplicationService};

pub(super) const EXPECTED_HIGH_INCOME_THRESHOLD: i32 = 100_000;
pub(super) const EXPECTED_LOW_INCOME_THRESHOLD: i32 = 20_000;

/// Validator double returning a fixed answer and counting how often it is asked.
pub(super) struct FixedValidator {
    answer: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<Option<String>>>,
}

impl FixedValidator {
    pub(super) fn valid() -> Arc<Self> {
        Arc::new(Self::answering(true))
    }

    pub(super) fn invalid() -> Arc<Self> {
        Arc::new(Self::answering(false))
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn seen(&self) -> Vec<Option<String>> {
        self.seen.lock().expect("validator mutex poisoned").clone()
    }
}

impl FrequentFlyerNumberValidator for FixedValidator {
    fn is_valid(&self, frequent_flyer_number: Option<&str>) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("validator mutex poisoned")
            .push(frequent_flyer_number.map(str::to_string));
        self.answer
    }
}

pub(super) fn evaluator(
    validator: &Arc<FixedValidator>,
) -> CreditCardApplicationEvaluator<FixedValidator> {
    CreditCardApplicationEvaluator::new(Arc::clone(validator))
}

pub(super) fn application(gross_annual_income: i32, age: i32) -> CreditCardApplication {
    CreditCardApplication {
        first_name: "Eugenia".to_string(),
        last_name: "Parvulescu".to_string(),
        frequent_flyer_number: Some("012345-A".to_string()),
        age,
        gross_annual_income,
    }
}

pub(super) fn details() -> NewApplicationDetails {
    NewApplicationDetails {
        first_name: Some("Eugenia".to_string()),
        last_name: Some("Parvulescu".to_string()),
        frequent_flyer_number: Some("012345-A".to_string()),
        age: Some(21),
        gross_annual_income: Some(100_000),
    }
}

pub(super) fn referred_details() -> NewApplicationDetails {
    NewApplicationDetails {
        gross_annual_income: Some(50_000),
        ..details()
    }
}

pub(super) fn declined_details() -> NewApplicationDetails {
    NewApplicationDetails {
        gross_annual_income: Some(LOW_INCOME_THRESHOLD - 1),
        ..details()
    }
}

pub(super) fn record(id: &str, decision: ApplicationDecision) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id.to_string()),
        application: application(HIGH_INCOME_THRESHOLD - 1, 30),
        decision,
        submitted_at: chrono::Utc::now(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<BTreeMap<ApplicationId, ApplicationRecord>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned())
    }

    fn referred(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .filter(|record| record.decision == ApplicationDecision::ReferredToHuman)
            .take(limit)
            .cloned()
            .collect())
    }
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn referred(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn referred(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with<R>(
    repository: Arc<R>,
    validator: Arc<FixedValidator>,
) -> CreditCardApplicationService<R, FixedValidator>
where
    R: ApplicationRepository + 'static,
{
    CreditCardApplicationService::new(repository, validator)
}

pub(super) fn router_with_service<R>(
    service: CreditCardApplicationService<R, FixedValidator>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
{
    application_router(Arc::new(service))
}

pub(super) fn json_payload(
    details: &NewApplicationDetails,
) -> Result<axum::Json<Value>, JsonRejection> {
    Ok(axum::Json(
        serde_json::to_value(details).expect("details serialize"),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[test]
fn thresholds_match_published_policy() {
    assert_eq!(HIGH_INCOME_THRESHOLD, EXPECTED_HIGH_INCOME_THRESHOLD);
    assert_eq!(LOW_INCOME_THRESHOLD, EXPECTED_LOW_INCOME_THRESHOLD);
}
