use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::config::ProjectContext;
use crate::review::AgentRunResult;

use super::detector::{ConflictDetector, SynergyDetector};
use super::patterns::{AgentHierarchy, Classifier, ConflictPattern, SynergyRule};
use super::resolver::ConflictResolver;
use super::types::{CollaborationReport, Conflict, Synergy};

/// Orchestrates conflict detection, synergy detection, priority scoring and
/// report assembly over a completed batch of agent results.
///
/// Detection and resolution are separate calls: `analyze_collaboration`
/// returns the report with conflicts unresolved so callers can inspect them
/// before deciding to run `resolve_conflicts`.
pub struct CollaborationEngine {
    context: ProjectContext,
    conflict_detector: ConflictDetector,
    synergy_detector: SynergyDetector,
    resolver: ConflictResolver,
}

impl CollaborationEngine {
    pub fn new(context: ProjectContext) -> Self {
        Self {
            resolver: ConflictResolver::new(context.clone()),
            conflict_detector: ConflictDetector::default(),
            synergy_detector: SynergyDetector::default(),
            context,
        }
    }

    pub fn with_hierarchy(mut self, hierarchy: AgentHierarchy) -> Self {
        self.resolver = ConflictResolver::new(self.context.clone()).with_hierarchy(hierarchy);
        self
    }

    pub fn with_patterns(mut self, patterns: Vec<ConflictPattern>) -> Self {
        self.conflict_detector = ConflictDetector::new(patterns);
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.conflict_detector = self.conflict_detector.with_classifier(classifier);
        self
    }

    pub fn with_synergy_rules(mut self, rules: Vec<SynergyRule>) -> Self {
        self.synergy_detector = SynergyDetector::new(rules);
        self
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    /// Analyze how the agents' suggestions interact: conflicts, synergies,
    /// priority matrix, focus areas and the overall collaboration score.
    /// Conflicts and synergies come back unresolved.
    pub fn analyze_collaboration(&self, agent_results: &[AgentRunResult]) -> CollaborationReport {
        let total_suggestions: usize = agent_results.iter().map(|r| r.suggestions.len()).sum();

        let conflicts = self.conflict_detector.detect(agent_results);
        let synergies = self.synergy_detector.detect(agent_results);
        let priority_matrix = Self::establish_priority_matrix(agent_results);
        let recommended_focus_areas =
            Self::recommend_focus_areas(agent_results, &conflicts, &synergies);
        let overall_collaboration_score =
            Self::collaboration_score(&conflicts, &synergies, total_suggestions);

        info!(
            agents = agent_results.len(),
            total_suggestions,
            conflicts = conflicts.len(),
            synergies = synergies.len(),
            score = overall_collaboration_score,
            "Collaboration analysis complete"
        );

        CollaborationReport {
            total_suggestions,
            conflicts,
            synergies,
            priority_matrix,
            recommended_focus_areas,
            overall_collaboration_score,
        }
    }

    /// Resolve every conflict, returning resolved copies in input order.
    pub fn resolve_conflicts(&self, conflicts: &[Conflict]) -> Vec<Conflict> {
        conflicts.iter().map(|c| self.resolver.resolve(c)).collect()
    }

    /// Severity-weighted issue density per agent. An agent emitting few but
    /// severe findings ranks above one emitting many low-severity findings.
    fn establish_priority_matrix(agent_results: &[AgentRunResult]) -> BTreeMap<String, f64> {
        let mut matrix = BTreeMap::new();
        for result in agent_results {
            let breakdown = &result.severity_breakdown;
            let weighted =
                (breakdown.critical * 10 + breakdown.high * 5 + breakdown.medium * 2) as f64;
            let score = weighted / result.total_issues.max(1) as f64;
            matrix.insert(result.agent_name.clone(), score);
        }
        matrix
    }

    fn recommend_focus_areas(
        agent_results: &[AgentRunResult],
        conflicts: &[Conflict],
        synergies: &[Synergy],
    ) -> Vec<String> {
        let mut focus_areas = Vec::new();

        for result in agent_results {
            let critical = result.severity_breakdown.critical;
            let high = result.severity_breakdown.high;

            if critical > 0 {
                focus_areas.push(format!(
                    "{}: {} critical issues require immediate attention",
                    result.agent_name, critical
                ));
            } else if high > 2 {
                focus_areas.push(format!(
                    "{}: Multiple high-impact improvements available",
                    result.agent_name
                ));
            }
        }

        for synergy in synergies {
            focus_areas.push(format!(
                "Synergy opportunity: {}",
                synergy.synthesis_description
            ));
        }

        let major_conflicts = conflicts.iter().filter(|c| c.is_high_impact()).count();
        if major_conflicts > 0 {
            focus_areas.push(format!(
                "Resolve {major_conflicts} high-impact conflicts between agents"
            ));
        }

        focus_areas
    }

    /// Overall collaboration effectiveness in [0, 100]: synergies reward,
    /// conflicts penalize, high-impact conflicts penalize again.
    fn collaboration_score(
        conflicts: &[Conflict],
        synergies: &[Synergy],
        total_suggestions: usize,
    ) -> f64 {
        if total_suggestions == 0 {
            return 100.0;
        }

        let conflict_penalty = conflicts.len() as f64 * 5.0;
        let major_conflict_penalty =
            conflicts.iter().filter(|c| c.is_high_impact()).count() as f64 * 10.0;
        let synergy_bonus = synergies.len() as f64 * 10.0;

        (100.0 - conflict_penalty - major_conflict_penalty + synergy_bonus).clamp(0.0, 100.0)
    }
}
