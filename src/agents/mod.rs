//! Rule-based review agents.
//!
//! Each agent scans source lines against its own declarative rule table and
//! emits [`Suggestion`]s. Agents are independent producers: the collaboration
//! engine consumes their output without knowing how it was derived.

mod clean_code;
mod coordinator;
mod design_patterns;
mod performance;
mod security;
mod testability;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;
use crate::review::Suggestion;

pub use clean_code::CleanCodeAgent;
pub use coordinator::{AgentCoordinator, ReviewOutcome, ReviewSummary};
pub use design_patterns::DesignPatternsAgent;
pub use performance::PerformanceAgent;
pub use security::SecurityAgent;
pub use testability::TestabilityAgent;

/// An independent analysis producer. Emits one batch of suggestions per
/// review invocation.
#[async_trait]
pub trait ReviewAgent: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn specializations(&self) -> &[&str];

    async fn analyze(&self, code: &str, language: &str) -> Result<Vec<Suggestion>>;
}

/// One entry in an agent's rule table: a trigger pattern plus the finding it
/// produces.
pub(crate) struct LineRule {
    pub trigger: Regex,
    pub principle: &'static str,
    pub reasoning: &'static str,
    pub explanation: &'static str,
    pub suggested_code: Option<&'static str>,
    pub impact_score: f64,
    pub confidence: f64,
    pub category: &'static str,
}

impl LineRule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trigger: &str,
        principle: &'static str,
        reasoning: &'static str,
        explanation: &'static str,
        suggested_code: Option<&'static str>,
        impact_score: f64,
        confidence: f64,
        category: &'static str,
    ) -> Self {
        Self {
            trigger: Regex::new(trigger).expect("rule trigger must be a valid regex"),
            principle,
            reasoning,
            explanation,
            suggested_code,
            impact_score,
            confidence,
            category,
        }
    }
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#') || trimmed.starts_with("//")
}

/// Scan source lines against a rule table. The first matching rule per line
/// wins, so rule order encodes precedence.
pub(crate) fn scan_lines(
    agent_name: &str,
    rules: &[LineRule],
    code: &str,
    skip_comments: bool,
) -> Result<Vec<Suggestion>> {
    let mut suggestions = Vec::new();

    for (index, line) in code.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if skip_comments && is_comment_line(line) {
            continue;
        }

        let line_number = (index + 1) as u32;
        for rule in rules {
            if rule.trigger.is_match(line) {
                let mut suggestion = Suggestion::new(
                    agent_name,
                    rule.principle,
                    rule.reasoning,
                    rule.explanation,
                    rule.impact_score,
                    rule.confidence,
                )?
                .with_line(line_number)
                .with_original_code(line.trim())
                .with_category(rule.category);

                if let Some(code) = rule.suggested_code {
                    suggestion = suggestion.with_suggested_code(code);
                }

                suggestions.push(suggestion);
                break;
            }
        }
    }

    Ok(suggestions)
}

/// The full default agent roster in hierarchy order.
pub fn default_agents() -> Vec<std::sync::Arc<dyn ReviewAgent>> {
    vec![
        std::sync::Arc::new(SecurityAgent::new()),
        std::sync::Arc::new(PerformanceAgent::new()),
        std::sync::Arc::new(CleanCodeAgent::new()),
        std::sync::Arc::new(DesignPatternsAgent::new()),
        std::sync::Arc::new(TestabilityAgent::new()),
    ]
}
