use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::applications::{
    ApplicationDecision, ApplicationRepository, ApplicationServiceError,
    CreditCardApplicationService, FrequentFlyerNumberValidator, NewApplicationDetails,
};

/// Status text reported when a batch job is accepted.
pub const BATCH_JOB_STARTED: &str = "Batch Job Started";

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read batch input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid batch CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch aborted at row {row}: {source}")]
    Service {
        row: usize,
        source: ApplicationServiceError,
    },
}

/// Row that failed intake validation; the batch carries on without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub row: usize,
    pub messages: Vec<String>,
}

/// Totals produced by a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub decisions: BTreeMap<ApplicationDecision, usize>,
    pub rejected: Vec<RowRejection>,
}

impl BatchSummary {
    pub fn count(&self, decision: ApplicationDecision) -> usize {
        self.decisions.get(&decision).copied().unwrap_or(0)
    }

    pub fn stored(&self) -> usize {
        self.decisions.values().sum()
    }
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
    #[serde(default)]
    age: Option<i32>,
    #[serde(default)]
    gross_annual_income: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    frequent_flyer_number: Option<String>,
}

impl From<BatchRow> for NewApplicationDetails {
    fn from(row: BatchRow) -> Self {
        NewApplicationDetails {
            first_name: row.first_name,
            last_name: row.last_name,
            frequent_flyer_number: row.frequent_flyer_number,
            age: row.age,
            gross_annual_income: row.gross_annual_income,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Submit every CSV row through the service.
///
/// Columns: `first_name,last_name,age,gross_annual_income,frequent_flyer_number`. Rows are
/// numbered from 1, excluding the header. The whole input is parsed before anything is
/// submitted, so malformed CSV aborts the run with nothing stored. Rows rejected at intake
/// are reported and skipped.
pub fn run_batch<Rd, R, V>(
    reader: Rd,
    service: &CreditCardApplicationService<R, V>,
) -> Result<BatchSummary, BatchError>
where
    Rd: Read,
    R: ApplicationRepository + 'static,
    V: FrequentFlyerNumberValidator + ?Sized + 'static,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = csv_reader
        .deserialize::<BatchRow>()
        .map(|row| row.map(NewApplicationDetails::from))
        .collect::<Result<Vec<_>, csv::Error>>()?;

    let mut summary = BatchSummary::default();

    for (index, details) in rows.into_iter().enumerate() {
        let row_number = index + 1;
        summary.processed += 1;

        match service.submit(details) {
            Ok(record) => {
                *summary.decisions.entry(record.decision).or_insert(0) += 1;
            }
            Err(ApplicationServiceError::Rejected(rejection)) => {
                warn!(row = row_number, "batch row rejected at intake");
                summary.rejected.push(RowRejection {
                    row: row_number,
                    messages: rejection
                        .messages()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                });
            }
            Err(source) => {
                return Err(BatchError::Service {
                    row: row_number,
                    source,
                })
            }
        }
    }

    info!(
        processed = summary.processed,
        stored = summary.stored(),
        rejected = summary.rejected.len(),
        "batch evaluation finished"
    );

    Ok(summary)
}
