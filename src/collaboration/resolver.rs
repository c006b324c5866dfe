use tracing::debug;

use crate::config::{ProjectContext, ProjectPriority};
use crate::review::Suggestion;

use super::patterns::{agent_names, AgentHierarchy};
use super::types::{Conflict, ConflictType, ResolutionStrategy};

/// Applies a resolution strategy per conflict, chosen from the conflict type
/// and the project context.
///
/// Resolution is copy-in/copy-out: the input conflict is never mutated, and
/// re-resolving the same conflict yields the same outcome (synthesis ids
/// excepted, which are freshly generated each time).
pub struct ConflictResolver {
    context: ProjectContext,
    hierarchy: AgentHierarchy,
}

impl ConflictResolver {
    pub fn new(context: ProjectContext) -> Self {
        Self {
            context,
            hierarchy: AgentHierarchy::default(),
        }
    }

    pub fn with_hierarchy(mut self, hierarchy: AgentHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Pick the resolution strategy for a conflict. First match wins:
    /// irreconcilable trade-offs need human judgment unless a context bias is
    /// declared; duplicate or dominance situations resolve automatically.
    pub fn select_strategy(&self, conflict: &Conflict) -> ResolutionStrategy {
        match conflict.conflict_type {
            ConflictType::Philosophical => {
                if self.context.priority != ProjectPriority::Balanced {
                    ResolutionStrategy::ContextDriven
                } else {
                    ResolutionStrategy::UserChoice
                }
            }
            ConflictType::Contradictory => ResolutionStrategy::ImpactWeighted,
            ConflictType::Overlapping => ResolutionStrategy::Synthesis,
            ConflictType::Priority => ResolutionStrategy::AgentHierarchy,
        }
    }

    /// Resolve a single conflict, returning a resolved copy.
    pub fn resolve(&self, conflict: &Conflict) -> Conflict {
        let strategy = self.select_strategy(conflict);

        let mut resolved = conflict.clone();
        resolved.resolution_strategy = Some(strategy);

        match strategy {
            ResolutionStrategy::ContextDriven => self.resolve_by_context(&mut resolved),
            ResolutionStrategy::ImpactWeighted => self.resolve_by_impact(&mut resolved),
            ResolutionStrategy::AgentHierarchy => self.resolve_by_hierarchy(&mut resolved),
            ResolutionStrategy::Synthesis => Self::resolve_by_synthesis(&mut resolved),
            ResolutionStrategy::UserChoice => Self::defer_to_user(&mut resolved),
        }

        debug!(
            conflict_id = %resolved.conflict_id,
            strategy = %strategy,
            auto_resolved = resolved.resolved_suggestion.is_some(),
            "Conflict resolved"
        );

        resolved
    }

    fn preference_order(priority: ProjectPriority) -> &'static [&'static str] {
        match priority {
            ProjectPriority::Performance => &[
                agent_names::PERFORMANCE,
                agent_names::SECURITY,
                agent_names::CLEAN_CODE,
            ],
            ProjectPriority::Security => &[
                agent_names::SECURITY,
                agent_names::PERFORMANCE,
                agent_names::DESIGN_PATTERNS,
            ],
            ProjectPriority::Maintainability => &[
                agent_names::CLEAN_CODE,
                agent_names::DESIGN_PATTERNS,
                agent_names::TESTABILITY,
            ],
            ProjectPriority::Balanced => &[],
        }
    }

    fn resolve_by_context(&self, conflict: &mut Conflict) {
        for agent in Self::preference_order(self.context.priority) {
            if let Some(winner) = conflict
                .conflicting_suggestions
                .iter()
                .find(|s| s.agent_name == *agent)
            {
                conflict.resolved_suggestion = Some(winner.clone());
                conflict.resolution_rationale = Some(format!(
                    "Resolved based on project priority: {}",
                    self.context.priority
                ));
                return;
            }
        }

        // The declared priority does not cover any involved agent; weigh by
        // impact instead.
        self.resolve_by_impact(conflict);
    }

    fn resolve_by_impact(&self, conflict: &mut Conflict) {
        // Highest impact wins; ties go to the higher-ranked agent, then to
        // the first-encountered suggestion.
        let mut best: Option<&Suggestion> = None;
        for candidate in &conflict.conflicting_suggestions {
            let replace = match best {
                None => true,
                Some(current) => {
                    candidate.impact_score > current.impact_score
                        || (candidate.impact_score == current.impact_score
                            && self.hierarchy.rank(&candidate.agent_name)
                                > self.hierarchy.rank(&current.agent_name))
                }
            };
            if replace {
                best = Some(candidate);
            }
        }

        if let Some(winner) = best {
            conflict.resolution_rationale = Some(format!(
                "Resolved by selecting highest impact suggestion (score: {})",
                winner.impact_score
            ));
            conflict.resolved_suggestion = Some(winner.clone());
        }
    }

    fn resolve_by_hierarchy(&self, conflict: &mut Conflict) {
        let mut best_rank = 0;
        let mut winner: Option<&Suggestion> = None;
        for candidate in &conflict.conflicting_suggestions {
            let rank = self.hierarchy.rank(&candidate.agent_name);
            if winner.is_none() || rank > best_rank {
                best_rank = rank;
                winner = Some(candidate);
            }
        }

        if let Some(winner) = winner {
            conflict.resolution_rationale = Some(format!(
                "Resolved using agent hierarchy (rank: {best_rank})"
            ));
            conflict.resolved_suggestion = Some(winner.clone());
        }
    }

    fn resolve_by_synthesis(conflict: &mut Conflict) {
        let constituents = &conflict.conflicting_suggestions;
        if constituents.is_empty() {
            return;
        }

        let mut principles: Vec<&str> = Vec::new();
        for suggestion in constituents {
            if !principles.contains(&suggestion.principle.as_str()) {
                principles.push(&suggestion.principle);
            }
        }

        let reasonings: Vec<&str> = constituents.iter().map(|s| s.reasoning.as_str()).collect();
        let explanations: Vec<&str> = constituents
            .iter()
            .map(|s| s.educational_explanation.as_str())
            .collect();

        let impact_score =
            constituents.iter().map(|s| s.impact_score).sum::<f64>() / constituents.len() as f64;
        // Synthesis is only as confident as its weakest input.
        let confidence = constituents
            .iter()
            .map(|s| s.confidence)
            .fold(f64::MAX, f64::min);
        let severity = constituents
            .iter()
            .map(|s| s.severity)
            .max()
            .unwrap_or_else(|| crate::review::Severity::from_impact(impact_score));

        let mut synthesized = match Suggestion::new(
            "Collaboration Engine",
            format!("Combined approach: {}", principles.join(", ")),
            format!("Synthesized from multiple approaches: {}", reasonings.join("; ")),
            format!(
                "This represents a convergence of multiple best practices: {}",
                explanations.join(" | ")
            ),
            impact_score,
            confidence,
        ) {
            Ok(s) => s,
            // Constituents were validated at construction, so their joined
            // texts are non-empty.
            Err(_) => return,
        };

        synthesized = synthesized
            .with_id(format!("synthesized_{}", uuid::Uuid::new_v4()))
            .with_category("synthesis");
        // The most severe constituent carries through, not the severity the
        // averaged impact would imply.
        synthesized.severity = severity;
        synthesized.line_number = conflict.line_number;
        synthesized.original_code = constituents[0].original_code.clone();
        // No line-level code merge is attempted; take the first candidate.
        synthesized.suggested_code = constituents
            .iter()
            .find_map(|s| s.suggested_code.clone());

        conflict.resolved_suggestion = Some(synthesized);
        conflict.resolution_rationale = Some(
            "Resolved by synthesizing multiple agent suggestions into unified approach"
                .to_string(),
        );
    }

    fn defer_to_user(conflict: &mut Conflict) {
        conflict.resolution_rationale = Some(format!(
            "Requires user decision - multiple valid approaches with different trade-offs ({})",
            conflict.description
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Severity;

    fn suggestion(agent: &str, principle: &str, impact: f64, confidence: f64) -> Suggestion {
        Suggestion::new(agent, principle, "reasoning", "explanation", impact, confidence).unwrap()
    }

    fn conflict(conflict_type: ConflictType, suggestions: Vec<Suggestion>) -> Conflict {
        let involved_agents = suggestions
            .iter()
            .map(|s| s.agent_name.clone())
            .collect();
        Conflict {
            conflict_id: "test_conflict".to_string(),
            conflict_type,
            involved_agents,
            conflicting_suggestions: suggestions,
            line_number: Some(10),
            description: "test".to_string(),
            impact_assessment: 8.0,
            resolution_strategy: None,
            resolved_suggestion: None,
            resolution_rationale: None,
        }
    }

    fn context_with(priority: ProjectPriority) -> ProjectContext {
        ProjectContext {
            priority,
            ..Default::default()
        }
    }

    #[test]
    fn test_strategy_table() {
        let balanced = ConflictResolver::new(context_with(ProjectPriority::Balanced));
        let biased = ConflictResolver::new(context_with(ProjectPriority::Security));

        let philosophical = conflict(ConflictType::Philosophical, vec![]);
        assert_eq!(
            biased.select_strategy(&philosophical),
            ResolutionStrategy::ContextDriven
        );
        assert_eq!(
            balanced.select_strategy(&philosophical),
            ResolutionStrategy::UserChoice
        );

        assert_eq!(
            balanced.select_strategy(&conflict(ConflictType::Contradictory, vec![])),
            ResolutionStrategy::ImpactWeighted
        );
        assert_eq!(
            balanced.select_strategy(&conflict(ConflictType::Overlapping, vec![])),
            ResolutionStrategy::Synthesis
        );
        assert_eq!(
            balanced.select_strategy(&conflict(ConflictType::Priority, vec![])),
            ResolutionStrategy::AgentHierarchy
        );
    }

    #[test]
    fn test_impact_weighted_picks_highest_score() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let input = conflict(
            ConflictType::Contradictory,
            vec![
                suggestion(agent_names::PERFORMANCE, "Batching", 6.0, 0.8),
                suggestion(agent_names::SECURITY, "Parameterized Queries", 9.5, 0.9),
            ],
        );

        let resolved = resolver.resolve(&input);
        assert_eq!(
            resolved.resolution_strategy,
            Some(ResolutionStrategy::ImpactWeighted)
        );
        let winner = resolved.resolved_suggestion.unwrap();
        assert_eq!(winner.impact_score, 9.5);
        assert!(resolved.resolution_rationale.unwrap().contains("9.5"));
    }

    #[test]
    fn test_impact_tie_broken_by_hierarchy_rank() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let input = conflict(
            ConflictType::Contradictory,
            vec![
                suggestion(agent_names::CLEAN_CODE, "Naming", 7.0, 0.8),
                suggestion(agent_names::SECURITY, "Validation", 7.0, 0.8),
            ],
        );

        let resolved = resolver.resolve(&input);
        let winner = resolved.resolved_suggestion.unwrap();
        assert_eq!(winner.agent_name, agent_names::SECURITY);
    }

    #[test]
    fn test_context_driven_prefers_priority_agent() {
        let resolver = ConflictResolver::new(context_with(ProjectPriority::Performance));
        let input = conflict(
            ConflictType::Philosophical,
            vec![
                suggestion(agent_names::CLEAN_CODE, "Extract Function", 9.0, 0.9),
                suggestion(agent_names::PERFORMANCE, "Inline Loop", 6.0, 0.7),
            ],
        );

        let resolved = resolver.resolve(&input);
        assert_eq!(
            resolved.resolution_strategy,
            Some(ResolutionStrategy::ContextDriven)
        );
        // The performance agent wins despite the lower impact score.
        let winner = resolved.resolved_suggestion.unwrap();
        assert_eq!(winner.agent_name, agent_names::PERFORMANCE);
        assert!(resolved
            .resolution_rationale
            .unwrap()
            .contains("performance"));
    }

    #[test]
    fn test_context_driven_falls_back_to_impact() {
        let resolver = ConflictResolver::new(context_with(ProjectPriority::Maintainability));
        // Neither agent appears in the maintainability preference list.
        let input = conflict(
            ConflictType::Philosophical,
            vec![
                suggestion("Style Agent", "Formatting", 4.0, 0.6),
                suggestion("Docs Agent", "Documentation", 6.5, 0.7),
            ],
        );

        let resolved = resolver.resolve(&input);
        let winner = resolved.resolved_suggestion.unwrap();
        assert_eq!(winner.agent_name, "Docs Agent");
        assert!(resolved
            .resolution_rationale
            .unwrap()
            .contains("highest impact"));
    }

    #[test]
    fn test_hierarchy_resolution_and_unknown_agents() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let input = conflict(
            ConflictType::Priority,
            vec![
                suggestion("Docs Agent", "Documentation", 9.0, 0.9),
                suggestion(agent_names::TESTABILITY, "Coverage", 4.0, 0.6),
            ],
        );

        let resolved = resolver.resolve(&input);
        let winner = resolved.resolved_suggestion.unwrap();
        // Unknown agent ranks 0 and loses even with a higher impact score.
        assert_eq!(winner.agent_name, agent_names::TESTABILITY);
        assert!(resolved.resolution_rationale.unwrap().contains("40"));
    }

    #[test]
    fn test_synthesis_merges_constituents() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let first = suggestion(agent_names::CLEAN_CODE, "Guard Clauses", 9.5, 0.9)
            .with_suggested_code("return early;");
        let second = suggestion(agent_names::TESTABILITY, "Early Return", 5.0, 0.6);
        let input = conflict(ConflictType::Overlapping, vec![first, second]);

        let resolved = resolver.resolve(&input);
        let merged = resolved.resolved_suggestion.unwrap();

        assert!(merged.id.starts_with("synthesized_"));
        assert_eq!(merged.agent_name, "Collaboration Engine");
        assert!(merged.principle.contains("Guard Clauses"));
        assert!(merged.principle.contains("Early Return"));
        assert_eq!(merged.impact_score, 7.25);
        assert_eq!(merged.confidence, 0.6);
        // Most severe constituent wins, not the severity of the mean impact.
        assert_eq!(merged.severity, Severity::Critical);
        assert_eq!(merged.suggested_code.as_deref(), Some("return early;"));
        assert_eq!(merged.category, "synthesis");
    }

    #[test]
    fn test_synthesis_dedups_repeated_principles() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let input = conflict(
            ConflictType::Overlapping,
            vec![
                suggestion(agent_names::CLEAN_CODE, "Guard Clauses", 5.0, 0.8)
                    .with_suggested_code("x"),
                suggestion(agent_names::TESTABILITY, "Guard Clauses", 5.0, 0.8)
                    .with_suggested_code("x"),
            ],
        );

        let resolved = resolver.resolve(&input);
        let merged = resolved.resolved_suggestion.unwrap();
        assert_eq!(merged.principle, "Combined approach: Guard Clauses");
    }

    #[test]
    fn test_user_choice_leaves_suggestion_absent() {
        let resolver = ConflictResolver::new(context_with(ProjectPriority::Balanced));
        let input = conflict(
            ConflictType::Philosophical,
            vec![
                suggestion(agent_names::PERFORMANCE, "Inline Loop", 8.0, 0.8),
                suggestion(agent_names::CLEAN_CODE, "Extract Function", 6.0, 0.8),
            ],
        );

        let resolved = resolver.resolve(&input);
        assert_eq!(
            resolved.resolution_strategy,
            Some(ResolutionStrategy::UserChoice)
        );
        assert!(resolved.resolved_suggestion.is_none());
        assert!(resolved.resolution_rationale.is_some());
    }

    #[test]
    fn test_resolution_is_idempotent_modulo_synthesis_id() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let input = conflict(
            ConflictType::Overlapping,
            vec![
                suggestion(agent_names::CLEAN_CODE, "Guard Clauses", 6.0, 0.9)
                    .with_suggested_code("x"),
                suggestion(agent_names::TESTABILITY, "Early Return", 4.0, 0.7)
                    .with_suggested_code("x"),
            ],
        );

        let first = resolver.resolve(&input);
        let second = resolver.resolve(&input);

        let mut a = first.resolved_suggestion.unwrap();
        let mut b = second.resolved_suggestion.unwrap();
        assert_ne!(a.id, b.id);
        a.id = String::new();
        b.id = String::new();
        assert_eq!(a, b);
        assert_eq!(first.resolution_rationale, second.resolution_rationale);
    }

    #[test]
    fn test_resolution_does_not_mutate_input() {
        let resolver = ConflictResolver::new(ProjectContext::default());
        let input = conflict(
            ConflictType::Contradictory,
            vec![
                suggestion(agent_names::SECURITY, "Validation", 9.0, 0.9),
                suggestion(agent_names::PERFORMANCE, "Batching", 6.0, 0.8),
            ],
        );
        let before = input.clone();
        let _ = resolver.resolve(&input);
        assert_eq!(input, before);
    }
}
