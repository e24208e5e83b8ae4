use crate::infra::InMemoryApplicationRepository;
use clap::Args;
use credit_cards::applications::{
    ApplicationDecision, CreditCardApplication, CreditCardApplicationEvaluator,
    CreditCardApplicationService, FrequentFlyerNumberValidator, LoyaltySchemeValidator,
};
use credit_cards::error::AppError;
use credit_cards::jobs::{run_batch, BatchSummary};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Applicant age in years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i32,
    /// Gross annual income
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) income: i32,
    /// Frequent flyer number, e.g. 012345-A
    #[arg(long)]
    pub(crate) frequent_flyer_number: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV with first_name,last_name,age,gross_annual_income,frequent_flyer_number columns
    pub(crate) path: PathBuf,
}

/// Labelled applicant shown by the demo.
struct Scenario {
    label: &'static str,
    application: CreditCardApplication,
}

fn scenario(label: &'static str, income: i32, age: i32, number: &str) -> Scenario {
    Scenario {
        label,
        application: CreditCardApplication {
            first_name: "Demo".to_string(),
            last_name: "Applicant".to_string(),
            frequent_flyer_number: Some(number.to_string()),
            age,
            gross_annual_income: income,
        },
    }
}

fn reference_scenarios() -> Vec<Scenario> {
    vec![
        scenario("high income, any number", 100_000, 45, "unknown"),
        scenario("sub-high income, invalid number", 99_999, 21, "0a2c3v3"),
        scenario("sub-high income, age 20", 99_999, 20, "012345-A"),
        scenario("low income adult", 19_999, 21, "012345-Q"),
        scenario("middle income adult", 50_000, 21, "012345-Y"),
    ]
}

pub(crate) fn evaluate_with<V>(
    evaluator: &CreditCardApplicationEvaluator<V>,
    args: &EvaluateArgs,
) -> ApplicationDecision
where
    V: FrequentFlyerNumberValidator + ?Sized,
{
    let application = CreditCardApplication {
        frequent_flyer_number: args.frequent_flyer_number.clone(),
        age: args.age,
        gross_annual_income: args.income,
        ..CreditCardApplication::default()
    };
    evaluator.evaluate(&application)
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let evaluator = CreditCardApplicationEvaluator::new(Arc::new(LoyaltySchemeValidator));
    let decision = evaluate_with(&evaluator, &args);

    println!("Decision: {decision} ({})", decision.summary());
    Ok(())
}

pub(crate) fn run_batch_file(args: BatchArgs) -> Result<(), AppError> {
    let file = std::fs::File::open(&args.path)?;
    let service = CreditCardApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(LoyaltySchemeValidator),
    );

    let summary = run_batch(file, &service)?;
    render_batch_summary(&summary);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let evaluator = CreditCardApplicationEvaluator::new(Arc::new(LoyaltySchemeValidator));

    println!("Credit card decision demo");
    for Scenario { label, application } in reference_scenarios() {
        let decision = evaluator.evaluate(&application);
        println!(
            "- {label}: income {}, age {}, number {} -> {decision}",
            application.gross_annual_income,
            application.age,
            application.frequent_flyer_number.as_deref().unwrap_or("<none>"),
        );
    }

    Ok(())
}

fn render_batch_summary(summary: &BatchSummary) {
    println!("Batch evaluation");
    println!("Rows processed: {}", summary.processed);
    for decision in [
        ApplicationDecision::AutoAccepted,
        ApplicationDecision::AutoDeclined,
        ApplicationDecision::ReferredToHuman,
    ] {
        println!("- {decision}: {}", summary.count(decision));
    }

    if summary.rejected.is_empty() {
        println!("\nRejected rows: none");
    } else {
        println!("\nRejected rows");
        for rejection in &summary.rejected {
            println!("- row {}: {}", rejection.row, rejection.messages.join("; "));
        }
    }
}
