//! Fixed collaboration tables, represented as data rather than branching:
//! the agent hierarchy, the philosophical conflict patterns, and the synergy
//! rules. New patterns and rules can be registered without touching the
//! detection logic that evaluates them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::review::Suggestion;

/// Display names of the built-in review agents.
pub mod agent_names {
    pub const SECURITY: &str = "Security Agent";
    pub const PERFORMANCE: &str = "Performance Agent";
    pub const CLEAN_CODE: &str = "Clean Code Agent";
    pub const DESIGN_PATTERNS: &str = "Design Patterns Agent";
    pub const TESTABILITY: &str = "Testability Agent";
}

/// Immutable agent-name → rank mapping used for hierarchy resolution.
///
/// Unknown agents rank 0: an unfamiliar agent loses tie-breaks but never
/// breaks the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHierarchy {
    ranks: BTreeMap<String, u32>,
}

impl Default for AgentHierarchy {
    fn default() -> Self {
        let mut ranks = BTreeMap::new();
        ranks.insert(agent_names::SECURITY.to_string(), 100);
        ranks.insert(agent_names::PERFORMANCE.to_string(), 80);
        ranks.insert(agent_names::CLEAN_CODE.to_string(), 60);
        ranks.insert(agent_names::DESIGN_PATTERNS.to_string(), 50);
        ranks.insert(agent_names::TESTABILITY.to_string(), 40);
        Self { ranks }
    }
}

impl AgentHierarchy {
    pub fn rank(&self, agent_name: &str) -> u32 {
        self.ranks.get(agent_name).copied().unwrap_or(0)
    }

    pub fn with_rank(mut self, agent_name: impl Into<String>, rank: u32) -> Self {
        self.ranks.insert(agent_name.into(), rank);
        self
    }
}

/// One named philosophical disagreement pattern between two agents.
///
/// A suggestion participates when its text contains any keyword from either
/// stance of the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPattern {
    pub name: String,
    pub agents: [String; 2],
    pub keyword_groups: Vec<KeywordGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub stance: String,
    pub keywords: Vec<String>,
}

impl ConflictPattern {
    pub fn involves(&self, agent_name: &str) -> bool {
        self.agents.iter().any(|a| a == agent_name)
    }

    /// Whether lowercased suggestion text matches any keyword of any stance.
    pub fn matches_text(&self, text: &str) -> bool {
        self.keyword_groups
            .iter()
            .any(|group| group.keywords.iter().any(|k| text.contains(k.as_str())))
    }
}

fn pattern(
    name: &str,
    agents: [&str; 2],
    groups: &[(&str, &[&str])],
) -> ConflictPattern {
    ConflictPattern {
        name: name.to_string(),
        agents: [agents[0].to_string(), agents[1].to_string()],
        keyword_groups: groups
            .iter()
            .map(|(stance, keywords)| KeywordGroup {
                stance: stance.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect(),
    }
}

/// The built-in philosophical conflict patterns.
pub fn default_conflict_patterns() -> Vec<ConflictPattern> {
    vec![
        pattern(
            "Performance vs Readability",
            [agent_names::PERFORMANCE, agent_names::CLEAN_CODE],
            &[
                (
                    "performance",
                    &["optimization", "efficiency", "speed", "inline", "loop"],
                ),
                (
                    "readability",
                    &["readable", "maintainable", "extract", "clear", "naming"],
                ),
            ],
        ),
        pattern(
            "Security vs Usability",
            [agent_names::SECURITY, agent_names::CLEAN_CODE],
            &[
                (
                    "security",
                    &["validation", "sanitization", "encryption", "secure"],
                ),
                ("usability", &["simple", "user-friendly", "convenient"]),
            ],
        ),
        pattern(
            "Abstraction vs Simplicity",
            [agent_names::DESIGN_PATTERNS, agent_names::CLEAN_CODE],
            &[
                (
                    "abstraction",
                    &["pattern", "interface", "abstract", "polymorphism"],
                ),
                ("simplicity", &["simple", "straightforward", "direct"]),
            ],
        ),
    ]
}

/// Text → matched pattern names. The keyword matcher is a wording-sensitive
/// heuristic; this seam lets a more principled classifier replace it without
/// touching the detector's control flow.
pub trait Classifier: Send + Sync {
    fn matched_patterns(&self, text: &str) -> Vec<String>;
}

/// Default classifier: lowercased substring matching against the pattern
/// registry's keyword groups.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    patterns: Vec<ConflictPattern>,
}

impl KeywordClassifier {
    pub fn new(patterns: Vec<ConflictPattern>) -> Self {
        Self { patterns }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(default_conflict_patterns())
    }
}

impl Classifier for KeywordClassifier {
    fn matched_patterns(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| p.matches_text(text))
            .map(|p| p.name.clone())
            .collect()
    }
}

/// Which suggestion field a synergy filter inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Principle,
    Reasoning,
}

/// Selects candidate suggestions for one side of a synergy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionFilter {
    pub field: MatchField,
    pub keyword: String,
}

impl SuggestionFilter {
    pub fn matches(&self, suggestion: &Suggestion) -> bool {
        let text = match self.field {
            MatchField::Principle => &suggestion.principle,
            MatchField::Reasoning => &suggestion.reasoning,
        };
        text.to_lowercase().contains(&self.keyword)
    }
}

/// One named complementary pairing between two agents' suggestion kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyRule {
    pub name: String,
    pub first_agent: String,
    pub first_filter: SuggestionFilter,
    pub second_agent: String,
    pub second_filter: SuggestionFilter,
    /// Multiplier applied to the summed impacts; > 1 because the combination
    /// is claimed to be worth more than either side alone.
    pub impact_bonus: f64,
    pub synthesis_description: String,
    pub implementation_order: Vec<String>,
}

/// The built-in synergy rules.
pub fn default_synergy_rules() -> Vec<SynergyRule> {
    vec![
        SynergyRule {
            name: "secure_caching".to_string(),
            first_agent: agent_names::SECURITY.to_string(),
            first_filter: SuggestionFilter {
                field: MatchField::Principle,
                keyword: "validation".to_string(),
            },
            second_agent: agent_names::PERFORMANCE.to_string(),
            second_filter: SuggestionFilter {
                field: MatchField::Reasoning,
                keyword: "caching".to_string(),
            },
            impact_bonus: 1.2,
            synthesis_description: "Implement secure caching: validate inputs before caching \
                 to prevent cache poisoning while improving performance"
                .to_string(),
            implementation_order: vec![
                "Implement input validation".to_string(),
                "Add caching layer".to_string(),
                "Combine for secure caching".to_string(),
            ],
        },
        SynergyRule {
            name: "responsibility_extraction".to_string(),
            first_agent: agent_names::CLEAN_CODE.to_string(),
            first_filter: SuggestionFilter {
                field: MatchField::Principle,
                keyword: "responsibility".to_string(),
            },
            second_agent: agent_names::DESIGN_PATTERNS.to_string(),
            second_filter: SuggestionFilter {
                field: MatchField::Principle,
                keyword: "strategy".to_string(),
            },
            impact_bonus: 1.15,
            synthesis_description: "Extract responsibilities into Strategy pattern: separate \
                 concerns while providing clean extensibility"
                .to_string(),
            implementation_order: vec![
                "Identify responsibilities".to_string(),
                "Extract strategies".to_string(),
                "Implement pattern".to_string(),
            ],
        },
    ]
}
