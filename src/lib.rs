pub mod agents;
pub mod cli;
pub mod collaboration;
pub mod config;
pub mod error;
pub mod output;
pub mod review;

pub use agents::{
    AgentCoordinator, CleanCodeAgent, DesignPatternsAgent, PerformanceAgent, ReviewAgent,
    ReviewOutcome, ReviewSummary, SecurityAgent, TestabilityAgent,
};
pub use collaboration::{
    AgentHierarchy, Classifier, CollaborationEngine, CollaborationReport, Conflict,
    ConflictDetector, ConflictResolver, ConflictType, KeywordClassifier, ResolutionStrategy,
    Synergy, SynergyDetector,
};
pub use config::{CouncilConfig, ProjectContext, ProjectPriority};
pub use error::{CouncilError, Result};
pub use review::{AgentRunResult, Severity, SeverityBreakdown, Suggestion};
