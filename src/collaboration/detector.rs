use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::review::{AgentRunResult, Suggestion};

use super::patterns::{
    default_conflict_patterns, default_synergy_rules, Classifier, ConflictPattern,
    KeywordClassifier, SynergyRule,
};
use super::types::{stable_hash, Conflict, ConflictType, Synergy};

/// Detects line-level and philosophical conflicts across agent batches.
///
/// Detection is read-only over its input and deterministic: lines are visited
/// in ascending order, patterns in registration order, and ids are derived
/// from stable hashes of the participants.
pub struct ConflictDetector {
    patterns: Vec<ConflictPattern>,
    classifier: Arc<dyn Classifier>,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new(default_conflict_patterns())
    }
}

impl ConflictDetector {
    pub fn new(patterns: Vec<ConflictPattern>) -> Self {
        let classifier = Arc::new(KeywordClassifier::new(patterns.clone()));
        Self {
            patterns,
            classifier,
        }
    }

    /// Swap the text classifier while keeping the pattern registry.
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn detect(&self, agent_results: &[AgentRunResult]) -> Vec<Conflict> {
        let all_suggestions: Vec<(&Suggestion, &str)> = agent_results
            .iter()
            .flat_map(|result| {
                result
                    .suggestions
                    .iter()
                    .map(move |s| (s, result.agent_name.as_str()))
            })
            .collect();

        let mut conflicts = self.detect_line_conflicts(&all_suggestions);
        conflicts.extend(self.detect_philosophical_conflicts(&all_suggestions));

        debug!(
            suggestions = all_suggestions.len(),
            conflicts = conflicts.len(),
            "Conflict detection complete"
        );

        conflicts
    }

    fn detect_line_conflicts(&self, all_suggestions: &[(&Suggestion, &str)]) -> Vec<Conflict> {
        let mut by_line: BTreeMap<u32, Vec<(&Suggestion, &str)>> = BTreeMap::new();
        for &(suggestion, agent_name) in all_suggestions {
            if let Some(line) = suggestion.line_number {
                by_line
                    .entry(line)
                    .or_default()
                    .push((suggestion, agent_name));
            }
        }

        by_line
            .into_iter()
            .filter(|(_, group)| group.len() > 1)
            .filter_map(|(line, group)| Self::analyze_line_conflict(line, &group))
            .collect()
    }

    fn analyze_line_conflict(line: u32, group: &[(&Suggestion, &str)]) -> Option<Conflict> {
        let suggested_codes: Vec<&str> = group
            .iter()
            .filter_map(|(s, _)| s.suggested_code.as_deref())
            .filter(|code| !code.is_empty())
            .collect();

        let mut distinct_codes = suggested_codes.clone();
        distinct_codes.sort_unstable();
        distinct_codes.dedup();

        let (conflict_type, description) = if distinct_codes.len() > 1 {
            (
                ConflictType::Contradictory,
                format!("Multiple agents suggest different code changes for line {line}"),
            )
        } else if suggested_codes.len() > 1 {
            (
                ConflictType::Overlapping,
                format!("Multiple agents target the same issue on line {line}"),
            )
        } else {
            // Zero or one concrete edits on this line: nothing to reconcile.
            return None;
        };

        let agents = dedup_preserving_order(group.iter().map(|(_, a)| *a));
        let impact_assessment = group
            .iter()
            .map(|(s, _)| s.impact_score)
            .fold(f64::MIN, f64::max);

        Some(Conflict {
            conflict_id: format!("line_{}_{:04}", line, stable_hash(&agents_as_refs(&agents)) % 10000),
            conflict_type,
            involved_agents: agents,
            conflicting_suggestions: group.iter().map(|(s, _)| (*s).clone()).collect(),
            line_number: Some(line),
            description,
            impact_assessment,
            resolution_strategy: None,
            resolved_suggestion: None,
            resolution_rationale: None,
        })
    }

    fn detect_philosophical_conflicts(
        &self,
        all_suggestions: &[(&Suggestion, &str)],
    ) -> Vec<Conflict> {
        // Classify each suggestion once; patterns are then checked against
        // the precomputed matches.
        let matched_names: Vec<Vec<String>> = all_suggestions
            .iter()
            .map(|(s, _)| self.classifier.matched_patterns(&s.classification_text()))
            .collect();

        self.patterns
            .iter()
            .filter_map(|pattern| {
                self.check_philosophical_pattern(pattern, all_suggestions, &matched_names)
            })
            .collect()
    }

    fn check_philosophical_pattern(
        &self,
        pattern: &ConflictPattern,
        all_suggestions: &[(&Suggestion, &str)],
        matched_names: &[Vec<String>],
    ) -> Option<Conflict> {
        let mut involved_suggestions = Vec::new();
        let mut involved_agents = Vec::new();

        for (index, (suggestion, agent_name)) in all_suggestions.iter().enumerate() {
            if pattern.involves(agent_name) && matched_names[index].contains(&pattern.name) {
                involved_suggestions.push((*suggestion).clone());
                involved_agents.push(*agent_name);
            }
        }

        let distinct_agents = dedup_preserving_order(involved_agents.iter().copied());
        if distinct_agents.len() < 2 {
            return None;
        }

        let impact_assessment = involved_suggestions
            .iter()
            .map(|s| s.impact_score)
            .sum::<f64>()
            / involved_suggestions.len() as f64;

        let slug = pattern.name.replace(' ', "_");
        Some(Conflict {
            conflict_id: format!(
                "philosophical_{}_{:04}",
                slug,
                stable_hash(&agents_as_refs(&distinct_agents)) % 10000
            ),
            conflict_type: ConflictType::Philosophical,
            involved_agents: distinct_agents,
            conflicting_suggestions: involved_suggestions,
            line_number: None,
            description: format!("Philosophical conflict: {}", pattern.name),
            impact_assessment,
            resolution_strategy: None,
            resolved_suggestion: None,
            resolution_rationale: None,
        })
    }
}

/// Detects complementary suggestion pairings across agents using the fixed
/// synergy rule registry. Rules are independent; several synergies may be
/// emitted from one review.
pub struct SynergyDetector {
    rules: Vec<SynergyRule>,
}

impl Default for SynergyDetector {
    fn default() -> Self {
        Self::new(default_synergy_rules())
    }
}

impl SynergyDetector {
    pub fn new(rules: Vec<SynergyRule>) -> Self {
        Self { rules }
    }

    pub fn detect(&self, agent_results: &[AgentRunResult]) -> Vec<Synergy> {
        self.rules
            .iter()
            .filter_map(|rule| Self::check_rule(rule, agent_results))
            .collect()
    }

    fn check_rule(rule: &SynergyRule, agent_results: &[AgentRunResult]) -> Option<Synergy> {
        let first: Vec<&Suggestion> = suggestions_of(agent_results, &rule.first_agent)
            .filter(|s| rule.first_filter.matches(s))
            .collect();
        let second: Vec<&Suggestion> = suggestions_of(agent_results, &rule.second_agent)
            .filter(|s| rule.second_filter.matches(s))
            .collect();

        if first.is_empty() || second.is_empty() {
            return None;
        }

        let combined: Vec<Suggestion> = first
            .iter()
            .chain(second.iter())
            .map(|s| (*s).clone())
            .collect();
        let combined_impact =
            combined.iter().map(|s| s.impact_score).sum::<f64>() * rule.impact_bonus;

        let ids: Vec<&str> = combined.iter().map(|s| s.id.as_str()).collect();
        debug!(
            rule = %rule.name,
            suggestions = combined.len(),
            combined_impact,
            "Synergy detected"
        );

        Some(Synergy {
            synergy_id: format!("{}_{:04}", rule.name, stable_hash(&ids) % 10000),
            involved_agents: vec![rule.first_agent.clone(), rule.second_agent.clone()],
            synergistic_suggestions: combined,
            combined_impact,
            synthesis_description: rule.synthesis_description.clone(),
            implementation_order: rule.implementation_order.clone(),
        })
    }
}

fn suggestions_of<'a>(
    agent_results: &'a [AgentRunResult],
    agent_name: &'a str,
) -> impl Iterator<Item = &'a Suggestion> {
    agent_results
        .iter()
        .filter(move |r| r.agent_name == agent_name)
        .flat_map(|r| r.suggestions.iter())
}

fn dedup_preserving_order<'a>(agents: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for agent in agents {
        if !seen.iter().any(|s: &String| s == agent) {
            seen.push(agent.to_string());
        }
    }
    seen
}

fn agents_as_refs(agents: &[String]) -> Vec<&str> {
    agents.iter().map(String::as_str).collect()
}
