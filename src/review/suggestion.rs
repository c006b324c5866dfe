use serde::{Deserialize, Serialize};

use crate::error::{CouncilError, Result};

/// Severity of a finding, derived from its impact score.
///
/// Ordered from least to most severe so `max` yields the most severe level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Derive severity from an impact score using the fixed thresholds.
    pub fn from_impact(impact_score: f64) -> Self {
        if impact_score >= 9.0 {
            Self::Critical
        } else if impact_score >= 7.0 {
            Self::High
        } else if impact_score >= 5.0 {
            Self::Medium
        } else if impact_score >= 3.0 {
            Self::Low
        } else {
            Self::Info
        }
    }

    pub fn all() -> [Severity; 5] {
        [
            Self::Critical,
            Self::High,
            Self::Medium,
            Self::Low,
            Self::Info,
        ]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
            Self::Info => write!(f, "INFO"),
        }
    }
}

/// A single code review finding produced by one agent.
///
/// Scores are clamped at construction: `impact_score` to [1.0, 10.0],
/// `confidence` to [0.0, 1.0]. `severity` is always derived from the clamped
/// impact score, so the engine can rely on both invariants without
/// re-validating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub agent_name: String,
    pub principle: String,
    pub line_number: Option<u32>,
    pub original_code: Option<String>,
    pub suggested_code: Option<String>,
    pub reasoning: String,
    pub educational_explanation: String,
    pub impact_score: f64,
    pub confidence: f64,
    pub severity: Severity,
    pub category: String,
}

impl Suggestion {
    /// Create a suggestion with a fresh id.
    ///
    /// Fails fast when `principle` or `reasoning` is empty; those fields are
    /// required for every downstream consumer (conflict descriptions, synergy
    /// filters, report text).
    pub fn new(
        agent_name: impl Into<String>,
        principle: impl Into<String>,
        reasoning: impl Into<String>,
        educational_explanation: impl Into<String>,
        impact_score: f64,
        confidence: f64,
    ) -> Result<Self> {
        let principle = principle.into();
        let reasoning = reasoning.into();

        if principle.trim().is_empty() {
            return Err(CouncilError::InvalidSuggestion(
                "principle must not be empty".to_string(),
            ));
        }
        if reasoning.trim().is_empty() {
            return Err(CouncilError::InvalidSuggestion(
                "reasoning must not be empty".to_string(),
            ));
        }

        let impact_score = impact_score.clamp(1.0, 10.0);

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string()[..8].to_string(),
            agent_name: agent_name.into(),
            principle,
            line_number: None,
            original_code: None,
            suggested_code: None,
            reasoning,
            educational_explanation: educational_explanation.into(),
            impact_score,
            confidence: confidence.clamp(0.0, 1.0),
            severity: Severity::from_impact(impact_score),
            category: "general".to_string(),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_line(mut self, line_number: u32) -> Self {
        self.line_number = Some(line_number);
        self
    }

    pub fn with_original_code(mut self, code: impl Into<String>) -> Self {
        self.original_code = Some(code.into());
        self
    }

    pub fn with_suggested_code(mut self, code: impl Into<String>) -> Self {
        self.suggested_code = Some(code.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Concatenated text used by keyword classifiers.
    pub fn classification_text(&self) -> String {
        format!(
            "{} {} {}",
            self.principle, self.reasoning, self.educational_explanation
        )
        .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(impact: f64, confidence: f64) -> Suggestion {
        Suggestion::new(
            "Security Agent",
            "Input Validation",
            "untrusted input reaches the query",
            "validate before use",
            impact,
            confidence,
        )
        .unwrap()
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_impact(10.0), Severity::Critical);
        assert_eq!(Severity::from_impact(9.0), Severity::Critical);
        assert_eq!(Severity::from_impact(8.999), Severity::High);
        assert_eq!(Severity::from_impact(7.0), Severity::High);
        assert_eq!(Severity::from_impact(6.999), Severity::Medium);
        assert_eq!(Severity::from_impact(5.0), Severity::Medium);
        assert_eq!(Severity::from_impact(4.999), Severity::Low);
        assert_eq!(Severity::from_impact(3.0), Severity::Low);
        assert_eq!(Severity::from_impact(2.999), Severity::Info);
        assert_eq!(Severity::from_impact(1.0), Severity::Info);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Info);
        assert_eq!(
            [Severity::Low, Severity::Critical, Severity::Medium]
                .into_iter()
                .max(),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn test_scores_clamped_at_construction() {
        let s = suggestion(42.0, 3.0);
        assert_eq!(s.impact_score, 10.0);
        assert_eq!(s.confidence, 1.0);
        assert_eq!(s.severity, Severity::Critical);

        let s = suggestion(-5.0, -1.0);
        assert_eq!(s.impact_score, 1.0);
        assert_eq!(s.confidence, 0.0);
        assert_eq!(s.severity, Severity::Info);
    }

    #[test]
    fn test_severity_derived_from_clamped_impact() {
        let s = suggestion(7.5, 0.8);
        assert_eq!(s.severity, Severity::High);
    }

    #[test]
    fn test_empty_principle_rejected() {
        let result = Suggestion::new("Agent", "", "reasoning", "explanation", 5.0, 0.5);
        assert!(matches!(result, Err(CouncilError::InvalidSuggestion(_))));
    }

    #[test]
    fn test_empty_reasoning_rejected() {
        let result = Suggestion::new("Agent", "Principle", "  ", "explanation", 5.0, 0.5);
        assert!(matches!(result, Err(CouncilError::InvalidSuggestion(_))));
    }

    #[test]
    fn test_builder_fields() {
        let s = suggestion(6.0, 0.7)
            .with_line(12)
            .with_original_code("let x = 1;")
            .with_suggested_code("let count = 1;")
            .with_category("naming");
        assert_eq!(s.line_number, Some(12));
        assert_eq!(s.suggested_code.as_deref(), Some("let count = 1;"));
        assert_eq!(s.category, "naming");
    }

    #[test]
    fn test_classification_text_is_lowercased() {
        let s = suggestion(6.0, 0.7);
        let text = s.classification_text();
        assert!(text.contains("input validation"));
        assert!(text.contains("untrusted input"));
    }
}
