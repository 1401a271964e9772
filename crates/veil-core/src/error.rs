#![forbid(unsafe_code)]

//! Per-rule failures surfaced by the batch driver.

use crate::id::RuleFingerprint;

/// Why a rule could not be processed.
///
/// Always scoped to one rule: a batch records the error and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// Neither the registry nor the matcher produced a widget for the rule.
    NoMatch {
        fingerprint: RuleFingerprint,
        view_class: String,
    },
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch {
                fingerprint,
                view_class,
            } => write!(f, "rule {fingerprint} ({view_class}) did not match any view"),
        }
    }
}

impl std::error::Error for ControlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_message_names_class() {
        let err = ControlError::NoMatch {
            fingerprint: RuleFingerprint(0x1f),
            view_class: "android.widget.Button".into(),
        };
        assert_eq!(
            err.to_string(),
            "rule 000000000000001f (android.widget.Button) did not match any view"
        );
    }
}
