//! Text shown by the presentation layer.

use crate::types::{Language, Period, Phase};

/// Formats remaining seconds as `mm:ss`, rounding up to whole seconds.
///
/// Negative or non-finite values render as `00:00`.
pub fn format_remaining(remaining_seconds: f64) -> String {
    let total = if remaining_seconds.is_finite() {
        remaining_seconds.max(0.0).ceil() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Localized status labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabels {
    /// Label during work periods
    pub working: String,
    /// Label during regular breaks
    pub resting: String,
    /// Label during the long break
    pub long_resting: String,
}

impl StatusLabels {
    /// Returns the label set for `language`.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Ja => Self {
                working: "作業中".to_string(),
                resting: "休憩中".to_string(),
                long_resting: "長い休憩中".to_string(),
            },
            Language::En => Self {
                working: "Working".to_string(),
                resting: "Resting".to_string(),
                long_resting: "Long break".to_string(),
            },
        }
    }

    /// Returns the label for `period`.
    pub fn label(&self, period: &Period) -> &str {
        match period.phase {
            Phase::Work => &self.working,
            Phase::Break if period.long_break => &self.long_resting,
            Phase::Break => &self.resting,
        }
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}
