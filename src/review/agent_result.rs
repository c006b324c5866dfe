use serde::{Deserialize, Serialize};

use super::{Severity, Suggestion};

/// Counts per severity level. All five levels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl SeverityBreakdown {
    pub fn from_suggestions(suggestions: &[Suggestion]) -> Self {
        let mut breakdown = Self::default();
        for suggestion in suggestions {
            breakdown.record(suggestion.severity);
        }
        breakdown
    }

    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn count_for(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// Complete analysis result from a single agent run.
///
/// `total_issues` and `severity_breakdown` are computed in the constructor so
/// they always agree with the suggestion list. The collaboration engine
/// consumes this read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRunResult {
    pub agent_name: String,
    pub agent_description: String,
    pub suggestions: Vec<Suggestion>,
    pub execution_time: f64,
    pub total_issues: usize,
    pub severity_breakdown: SeverityBreakdown,
}

impl AgentRunResult {
    pub fn new(
        agent_name: impl Into<String>,
        agent_description: impl Into<String>,
        suggestions: Vec<Suggestion>,
        execution_time: f64,
    ) -> Self {
        let severity_breakdown = SeverityBreakdown::from_suggestions(&suggestions);
        Self {
            agent_name: agent_name.into(),
            agent_description: agent_description.into(),
            total_issues: suggestions.len(),
            severity_breakdown,
            suggestions,
            execution_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(impact: f64) -> Suggestion {
        Suggestion::new(
            "Clean Code Agent",
            "Meaningful Names",
            "name does not reveal intent",
            "use descriptive names",
            impact,
            0.8,
        )
        .unwrap()
    }

    #[test]
    fn test_breakdown_counts_every_level() {
        let suggestions = vec![
            suggestion(9.5),
            suggestion(7.5),
            suggestion(7.0),
            suggestion(5.0),
            suggestion(3.5),
            suggestion(1.0),
        ];
        let breakdown = SeverityBreakdown::from_suggestions(&suggestions);
        assert_eq!(breakdown.critical, 1);
        assert_eq!(breakdown.high, 2);
        assert_eq!(breakdown.medium, 1);
        assert_eq!(breakdown.low, 1);
        assert_eq!(breakdown.info, 1);
        assert_eq!(breakdown.total(), suggestions.len());
    }

    #[test]
    fn test_result_invariants_hold_by_construction() {
        let suggestions = vec![suggestion(9.0), suggestion(4.0)];
        let result = AgentRunResult::new("Clean Code Agent", "naming and structure", suggestions, 0.02);
        assert_eq!(result.total_issues, 2);
        assert_eq!(result.severity_breakdown.total(), result.total_issues);
        assert_eq!(result.severity_breakdown.critical, 1);
        assert_eq!(result.severity_breakdown.low, 1);
    }

    #[test]
    fn test_empty_run_is_valid() {
        let result = AgentRunResult::new("Security Agent", "owasp", vec![], 0.0);
        assert_eq!(result.total_issues, 0);
        assert_eq!(result.severity_breakdown.total(), 0);
    }
}
