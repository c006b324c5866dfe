use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::review::Suggestion;

/// Kind of disagreement detected between agent suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Different approaches to the same problem, not tied to one line.
    Philosophical,
    /// Multiple agents redundantly target the same issue.
    Overlapping,
    /// Mutually exclusive edits to the same line.
    Contradictory,
    /// Different priority assessments of the same finding.
    Priority,
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Philosophical => write!(f, "philosophical"),
            Self::Overlapping => write!(f, "overlapping"),
            Self::Contradictory => write!(f, "contradictory"),
            Self::Priority => write!(f, "priority"),
        }
    }
}

/// How a conflict gets turned into a single actionable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Project priorities decide between the involved agents.
    ContextDriven,
    /// Highest impact suggestion wins.
    ImpactWeighted,
    /// Fixed agent ranking decides.
    AgentHierarchy,
    /// Genuinely ambiguous trade-off; a human decides.
    UserChoice,
    /// Redundant suggestions are merged into one.
    Synthesis,
}

impl std::fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContextDriven => write!(f, "context_driven"),
            Self::ImpactWeighted => write!(f, "impact_weighted"),
            Self::AgentHierarchy => write!(f, "agent_hierarchy"),
            Self::UserChoice => write!(f, "user_choice"),
            Self::Synthesis => write!(f, "synthesis"),
        }
    }
}

/// A detected disagreement between two or more agents.
///
/// Created by detection with the resolution fields absent; resolution fills
/// `resolution_strategy`, `resolution_rationale` and (unless deferred to a
/// human) `resolved_suggestion`, after which the record is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub conflict_id: String,
    pub conflict_type: ConflictType,
    pub involved_agents: Vec<String>,
    pub conflicting_suggestions: Vec<Suggestion>,
    /// Absent for philosophical conflicts, which are not line-anchored.
    pub line_number: Option<u32>,
    pub description: String,
    pub impact_assessment: f64,
    pub resolution_strategy: Option<ResolutionStrategy>,
    pub resolved_suggestion: Option<Suggestion>,
    pub resolution_rationale: Option<String>,
}

impl Conflict {
    /// Whether resolution has run for this conflict. A conflict deferred to
    /// the user counts as resolved: its rationale is set even though no
    /// suggestion was chosen.
    pub fn is_resolved(&self) -> bool {
        self.resolution_strategy.is_some()
    }

    pub fn is_high_impact(&self) -> bool {
        self.impact_assessment > 7.0
    }
}

/// A detected complementary pairing whose combination is worth more than the
/// parts applied separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub synergy_id: String,
    pub involved_agents: Vec<String>,
    pub synergistic_suggestions: Vec<Suggestion>,
    pub combined_impact: f64,
    pub synthesis_description: String,
    pub implementation_order: Vec<String>,
}

/// Final output of one collaboration analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborationReport {
    pub total_suggestions: usize,
    pub conflicts: Vec<Conflict>,
    pub synergies: Vec<Synergy>,
    pub priority_matrix: BTreeMap<String, f64>,
    pub recommended_focus_areas: Vec<String>,
    pub overall_collaboration_score: f64,
}

/// Stable FNV-1a hash used to derive conflict and synergy ids.
///
/// Python's builtin `hash` is seed-dependent across processes; repeated runs
/// on identical input must produce identical ids.
pub(crate) fn stable_hash(parts: &[&str]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x1000_0000_01b3;

    let mut hash = FNV_OFFSET;
    for part in parts {
        for byte in part.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash ^= 0x1f;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_hash_is_deterministic() {
        let a = stable_hash(&["Security Agent", "Performance Agent"]);
        let b = stable_hash(&["Security Agent", "Performance Agent"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_stable_hash_respects_part_boundaries() {
        assert_ne!(stable_hash(&["ab", "c"]), stable_hash(&["a", "bc"]));
    }

    #[test]
    fn test_high_impact_threshold_is_exclusive() {
        let conflict = Conflict {
            conflict_id: "c".to_string(),
            conflict_type: ConflictType::Contradictory,
            involved_agents: vec![],
            conflicting_suggestions: vec![],
            line_number: Some(1),
            description: String::new(),
            impact_assessment: 7.0,
            resolution_strategy: None,
            resolved_suggestion: None,
            resolution_rationale: None,
        };
        assert!(!conflict.is_high_impact());
    }
}
