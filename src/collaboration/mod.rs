//! Cross-agent collaboration engine.
//!
//! Takes the completed, immutable batch of [`AgentRunResult`]s produced by
//! independent review agents and turns it into one coherent picture:
//! - `ConflictDetector` / `SynergyDetector`: find disagreements and
//!   complementary findings between agents
//! - `ConflictResolver`: apply a resolution strategy per conflict
//! - `CollaborationEngine`: assemble the final [`CollaborationReport`]
//!
//! The engine is synchronous and stateless between invocations; the fixed
//! tables (agent hierarchy, conflict patterns, synergy rules) are immutable
//! configuration owned at construction.
//!
//! [`AgentRunResult`]: crate::review::AgentRunResult

mod detector;
mod engine;
mod patterns;
mod resolver;
mod types;

pub use detector::{ConflictDetector, SynergyDetector};
pub use engine::CollaborationEngine;
pub use patterns::{
    agent_names, default_conflict_patterns, default_synergy_rules, AgentHierarchy, Classifier,
    ConflictPattern, KeywordClassifier, KeywordGroup, MatchField, SuggestionFilter, SynergyRule,
};
pub use resolver::ConflictResolver;
pub use types::{
    CollaborationReport, Conflict, ConflictType, ResolutionStrategy, Synergy,
};
