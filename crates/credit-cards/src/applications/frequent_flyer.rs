//! Frequent-flyer number validation capability consumed by the evaluator.

/// Answers whether a frequent-flyer number is valid.
///
/// Implementations never fail: a number that cannot be parsed, recognised, or looked up
/// is reported as invalid. `None` stands for an absent number.
pub trait FrequentFlyerNumberValidator: Send + Sync {
    fn is_valid(&self, frequent_flyer_number: Option<&str>) -> bool;
}

const VALID_SCHEME_IDENTIFIERS: [char; 3] = ['A', 'Q', 'Y'];
const EXPECTED_TOTAL_LENGTH: usize = 8;
const EXPECTED_MEMBER_NUMBER_LENGTH: usize = 6;

/// Offline validator checking the partner loyalty scheme number format, e.g. `012345-A`.
///
/// Six member digits, one separator character (not inspected), and a trailing scheme
/// identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoyaltySchemeValidator;

impl LoyaltySchemeValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn scheme_identifiers() -> &'static [char] {
        &VALID_SCHEME_IDENTIFIERS
    }
}

impl FrequentFlyerNumberValidator for LoyaltySchemeValidator {
    fn is_valid(&self, frequent_flyer_number: Option<&str>) -> bool {
        let Some(number) = frequent_flyer_number else {
            return false;
        };

        if number.chars().count() != EXPECTED_TOTAL_LENGTH {
            return false;
        }

        let member_number_is_numeric = number
            .chars()
            .take(EXPECTED_MEMBER_NUMBER_LENGTH)
            .all(|character| character.is_ascii_digit());
        if !member_number_is_numeric {
            return false;
        }

        number
            .chars()
            .last()
            .map(|scheme| VALID_SCHEME_IDENTIFIERS.contains(&scheme))
            .unwrap_or(false)
    }
}
