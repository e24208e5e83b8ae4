use serde::{Deserialize, Serialize};

/// Outcome of evaluating a single credit card application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    AutoAccepted,
    AutoDeclined,
    ReferredToHuman,
}

impl ApplicationDecision {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationDecision::AutoAccepted => "auto_accepted",
            ApplicationDecision::AutoDeclined => "auto_declined",
            ApplicationDecision::ReferredToHuman => "referred_to_human",
        }
    }

    pub fn summary(self) -> String {
        match self {
            ApplicationDecision::AutoAccepted => "application accepted".to_string(),
            ApplicationDecision::AutoDeclined => "application declined".to_string(),
            ApplicationDecision::ReferredToHuman => {
                "application referred for human review".to_string()
            }
        }
    }
}

impl std::fmt::Display for ApplicationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
