use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::collaboration::{CollaborationEngine, CollaborationReport, Conflict};
use crate::config::CouncilConfig;
use crate::error::{CouncilError, Result};
use crate::review::AgentRunResult;

use super::{default_agents, ReviewAgent};

/// Fan-out/fan-in agent execution.
///
/// All agents are launched concurrently and awaited together; the engine only
/// sees fully materialized results, never partial ones, because conflict
/// detection needs a global view across every agent's output. A failed or
/// timed-out agent is logged and skipped; the engine accepts whatever subset
/// completes.
pub struct AgentCoordinator {
    agents: Vec<Arc<dyn ReviewAgent>>,
    engine: CollaborationEngine,
    agent_timeout: Duration,
    min_confidence: f64,
}

impl AgentCoordinator {
    pub fn new(agents: Vec<Arc<dyn ReviewAgent>>, engine: CollaborationEngine) -> Self {
        Self {
            agents,
            engine,
            agent_timeout: Duration::from_secs(30),
            min_confidence: 0.0,
        }
    }

    /// Build a coordinator from configuration: roster filter, timeout,
    /// confidence floor and the project context for the engine.
    pub fn from_config(config: &CouncilConfig) -> Result<Self> {
        let roster = default_agents();
        let agents = if config.agents.enabled.is_empty() {
            roster
        } else {
            let mut selected = Vec::new();
            for name in &config.agents.enabled {
                let agent = roster
                    .iter()
                    .find(|a| a.name() == name)
                    .ok_or_else(|| CouncilError::UnknownAgent(name.clone()))?;
                selected.push(Arc::clone(agent));
            }
            selected
        };

        let engine = CollaborationEngine::new(config.project.clone());
        Ok(Self::new(agents, engine)
            .with_agent_timeout(Duration::from_secs(config.agents.timeout_secs))
            .with_min_confidence(config.review.min_confidence))
    }

    pub fn with_agent_timeout(mut self, agent_timeout: Duration) -> Self {
        self.agent_timeout = agent_timeout;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn agents(&self) -> &[Arc<dyn ReviewAgent>] {
        &self.agents
    }

    pub fn engine(&self) -> &CollaborationEngine {
        &self.engine
    }

    /// Run the full review: all agents concurrently, then collaboration
    /// analysis and conflict resolution over the completed batch.
    pub async fn run_review(&self, code: &str, language: &str) -> ReviewOutcome {
        let agent_results = self.run_agents(code, language).await;

        let collaboration = self.engine.analyze_collaboration(&agent_results);
        let resolved_conflicts = self.engine.resolve_conflicts(&collaboration.conflicts);
        let summary = ReviewSummary::compute(&agent_results, &collaboration, &resolved_conflicts);

        info!(
            agents = summary.total_agents,
            suggestions = summary.total_suggestions,
            conflicts = summary.conflicts_detected,
            score = summary.collaboration_score,
            "Review complete"
        );

        ReviewOutcome {
            reviewed_at: Utc::now(),
            language: language.to_string(),
            summary,
            agent_results,
            collaboration,
            resolved_conflicts,
        }
    }

    async fn run_agents(&self, code: &str, language: &str) -> Vec<AgentRunResult> {
        let tasks = self.agents.iter().map(|agent| {
            let agent = Arc::clone(agent);
            async move {
                let start = std::time::Instant::now();
                match timeout(self.agent_timeout, agent.analyze(code, language)).await {
                    Ok(Ok(suggestions)) => {
                        let kept: Vec<_> = suggestions
                            .into_iter()
                            .filter(|s| s.confidence >= self.min_confidence)
                            .collect();
                        debug!(
                            agent = agent.name(),
                            suggestions = kept.len(),
                            "Agent run complete"
                        );
                        Some(AgentRunResult::new(
                            agent.name(),
                            agent.description(),
                            kept,
                            start.elapsed().as_secs_f64(),
                        ))
                    }
                    Ok(Err(e)) => {
                        warn!(agent = agent.name(), error = %e, "Agent failed, skipping");
                        None
                    }
                    Err(_) => {
                        warn!(
                            agent = agent.name(),
                            timeout_secs = self.agent_timeout.as_secs(),
                            "Agent timed out, skipping"
                        );
                        None
                    }
                }
            }
        });

        join_all(tasks).await.into_iter().flatten().collect()
    }
}

/// Terminal artifact of one review invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub reviewed_at: DateTime<Utc>,
    pub language: String,
    pub summary: ReviewSummary,
    pub agent_results: Vec<AgentRunResult>,
    /// Collaboration report with conflicts in their detected, unresolved form.
    pub collaboration: CollaborationReport,
    /// The same conflicts after resolution, in detection order.
    pub resolved_conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total_agents: usize,
    pub total_suggestions: usize,
    pub average_impact_score: f64,
    pub conflicts_detected: usize,
    pub conflicts_auto_resolved: usize,
    pub synergies_found: usize,
    pub collaboration_score: f64,
}

impl ReviewSummary {
    fn compute(
        agent_results: &[AgentRunResult],
        collaboration: &CollaborationReport,
        resolved_conflicts: &[Conflict],
    ) -> Self {
        let total_suggestions = collaboration.total_suggestions;
        let impact_sum: f64 = agent_results
            .iter()
            .flat_map(|r| r.suggestions.iter())
            .map(|s| s.impact_score)
            .sum();

        Self {
            total_agents: agent_results.len(),
            total_suggestions,
            average_impact_score: impact_sum / total_suggestions.max(1) as f64,
            conflicts_detected: collaboration.conflicts.len(),
            conflicts_auto_resolved: resolved_conflicts
                .iter()
                .filter(|c| c.resolved_suggestion.is_some())
                .count(),
            synergies_found: collaboration.synergies.len(),
            collaboration_score: collaboration.overall_collaboration_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectContext;
    use crate::error::Result as CouncilResult;
    use crate::review::Suggestion;
    use async_trait::async_trait;

    struct FixedAgent {
        name: &'static str,
        suggestions: Vec<Suggestion>,
    }

    #[async_trait]
    impl ReviewAgent for FixedAgent {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "fixed test agent"
        }

        fn specializations(&self) -> &[&str] {
            &[]
        }

        async fn analyze(&self, _code: &str, _language: &str) -> CouncilResult<Vec<Suggestion>> {
            Ok(self.suggestions.clone())
        }
    }

    struct FailingAgent;

    #[async_trait]
    impl ReviewAgent for FailingAgent {
        fn name(&self) -> &str {
            "Broken Agent"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        fn specializations(&self) -> &[&str] {
            &[]
        }

        async fn analyze(&self, _code: &str, _language: &str) -> CouncilResult<Vec<Suggestion>> {
            Err(CouncilError::agent("Broken Agent", "synthetic failure"))
        }
    }

    fn coordinator(agents: Vec<Arc<dyn ReviewAgent>>) -> AgentCoordinator {
        AgentCoordinator::new(agents, CollaborationEngine::new(ProjectContext::default()))
    }

    #[tokio::test]
    async fn test_failed_agent_is_skipped_not_fatal() {
        let fixed = FixedAgent {
            name: "Security Agent",
            suggestions: vec![Suggestion::new(
                "Security Agent",
                "Input Validation",
                "validate it",
                "explanation",
                7.0,
                0.8,
            )
            .unwrap()],
        };

        let coordinator = coordinator(vec![Arc::new(fixed), Arc::new(FailingAgent)]);
        let outcome = coordinator.run_review("code", "rust").await;

        assert_eq!(outcome.summary.total_agents, 1);
        assert_eq!(outcome.summary.total_suggestions, 1);
    }

    #[tokio::test]
    async fn test_zero_agents_yield_perfect_score() {
        let coordinator = coordinator(vec![]);
        let outcome = coordinator.run_review("code", "rust").await;

        assert_eq!(outcome.summary.total_suggestions, 0);
        assert_eq!(outcome.summary.collaboration_score, 100.0);
        assert!(outcome.collaboration.conflicts.is_empty());
        assert!(outcome.resolved_conflicts.is_empty());
    }

    #[tokio::test]
    async fn test_confidence_floor_filters_suggestions() {
        let fixed = FixedAgent {
            name: "Security Agent",
            suggestions: vec![
                Suggestion::new("Security Agent", "A", "r", "e", 7.0, 0.9).unwrap(),
                Suggestion::new("Security Agent", "B", "r", "e", 7.0, 0.2).unwrap(),
            ],
        };

        let coordinator = coordinator(vec![Arc::new(fixed)]).with_min_confidence(0.5);
        let outcome = coordinator.run_review("code", "rust").await;
        assert_eq!(outcome.summary.total_suggestions, 1);
    }

    #[tokio::test]
    async fn test_unknown_enabled_agent_rejected() {
        let mut config = CouncilConfig::default();
        config.agents.enabled = vec!["Imaginary Agent".to_string()];
        let err = AgentCoordinator::from_config(&config).unwrap_err();
        assert!(matches!(err, CouncilError::UnknownAgent(_)));
    }

    #[tokio::test]
    async fn test_report_conflicts_remain_unresolved() {
        let first = FixedAgent {
            name: "Security Agent",
            suggestions: vec![Suggestion::new(
                "Security Agent",
                "Validation",
                "validate",
                "e",
                9.0,
                0.9,
            )
            .unwrap()
            .with_line(5)
            .with_suggested_code("a")],
        };
        let second = FixedAgent {
            name: "Performance Agent",
            suggestions: vec![Suggestion::new(
                "Performance Agent",
                "Batching",
                "batch",
                "e",
                6.0,
                0.8,
            )
            .unwrap()
            .with_line(5)
            .with_suggested_code("b")],
        };

        let coordinator = coordinator(vec![Arc::new(first), Arc::new(second)]);
        let outcome = coordinator.run_review("code", "rust").await;

        assert_eq!(outcome.collaboration.conflicts.len(), 1);
        assert!(!outcome.collaboration.conflicts[0].is_resolved());
        assert!(outcome.resolved_conflicts[0].is_resolved());
        assert_eq!(outcome.summary.conflicts_auto_resolved, 1);
    }
}
