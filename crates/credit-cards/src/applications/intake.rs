use serde::Serialize;
use serde_json::{Map, Value};

use super::domain::{CreditCardApplication, NewApplicationDetails};

/// Youngest applicant the intake form accepts.
pub const MINIMUM_APPLICANT_AGE: i32 = 18;

/// Single form field failing intake validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Submitted form rejected by intake, carrying the details back for redisplay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("application rejected: {}", summarize(.violations))]
pub struct IntakeRejection {
    pub violations: Vec<FieldViolation>,
    pub details: NewApplicationDetails,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntakeRejection {
    pub fn messages(&self) -> Vec<&'static str> {
        self.violations
            .iter()
            .map(|violation| violation.message)
            .collect()
    }
}

/// Guard turning raw form details into an applicant record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationIntake;

impl ApplicationIntake {
    /// Validate every field, reporting all violations at once.
    pub fn application_from_details(
        &self,
        details: NewApplicationDetails,
    ) -> Result<CreditCardApplication, IntakeRejection> {
        let mut violations = Vec::new();

        let first_name = required_text(&details.first_name);
        if first_name.is_none() {
            violations.push(FieldViolation {
                field: "first_name",
                message: "Please provide a first name",
            });
        }

        let last_name = required_text(&details.last_name);
        if last_name.is_none() {
            violations.push(FieldViolation {
                field: "last_name",
                message: "Please provide a last name",
            });
        }

        let frequent_flyer_number = required_text(&details.frequent_flyer_number);
        if frequent_flyer_number.is_none() {
            violations.push(FieldViolation {
                field: "frequent_flyer_number",
                message: "Please provide a frequent flyer number",
            });
        }

        match details.age {
            Some(age) if age >= MINIMUM_APPLICANT_AGE => {}
            _ => violations.push(FieldViolation {
                field: "age",
                message: "You must be at least 18 years old",
            }),
        }

        if details.gross_annual_income.is_none() {
            violations.push(FieldViolation {
                field: "gross_annual_income",
                message: "Please provide your gross income",
            });
        }

        match (
            first_name,
            last_name,
            frequent_flyer_number,
            details.age,
            details.gross_annual_income,
        ) {
            (Some(first_name), Some(last_name), Some(number), Some(age), Some(income))
                if violations.is_empty() =>
            {
                Ok(CreditCardApplication {
                    first_name,
                    last_name,
                    frequent_flyer_number: Some(number),
                    age,
                    gross_annual_income: income,
                })
            }
            _ => Err(IntakeRejection {
                violations,
                details,
            }),
        }
    }
}

/// Read form fields out of a loosely typed JSON body.
///
/// Missing and `null` fields stay absent so intake can report them. Fields of the wrong type
/// are reported here, each against its own field, instead of failing the whole body.
pub fn details_from_json(body: &Value) -> Result<NewApplicationDetails, Vec<FieldViolation>> {
    let Some(fields) = body.as_object() else {
        return Err(vec![FieldViolation {
            field: "body",
            message: "Application details must be a JSON object",
        }]);
    };

    let mut violations = Vec::new();
    let details = NewApplicationDetails {
        first_name: text_field(fields, "first_name", "First name must be text", &mut violations),
        last_name: text_field(fields, "last_name", "Last name must be text", &mut violations),
        frequent_flyer_number: text_field(
            fields,
            "frequent_flyer_number",
            "Frequent flyer number must be text",
            &mut violations,
        ),
        age: whole_number_field(fields, "age", "Age must be a whole number", &mut violations),
        gross_annual_income: whole_number_field(
            fields,
            "gross_annual_income",
            "Gross income must be a whole number",
            &mut violations,
        ),
    };

    if violations.is_empty() {
        Ok(details)
    } else {
        Err(violations)
    }
}

fn text_field(
    fields: &Map<String, Value>,
    field: &'static str,
    message: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(FieldViolation { field, message });
            None
        }
    }
}

fn whole_number_field(
    fields: &Map<String, Value>,
    field: &'static str,
    message: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<i32> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let number = value.as_i64().and_then(|number| i32::try_from(number).ok());
            if number.is_none() {
                violations.push(FieldViolation { field, message });
            }
            number
        }
    }
}

fn required_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
