use serde::{Deserialize, Serialize};

/// Declared optimization bias of the project under review.
///
/// Anything other than `Balanced` lets the engine auto-resolve philosophical
/// conflicts in favor of the declared priority; `Balanced` defers them to a
/// human.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    Performance,
    Security,
    Maintainability,
    #[default]
    Balanced,
}

impl std::fmt::Display for ProjectPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Performance => write!(f, "performance"),
            Self::Security => write!(f, "security"),
            Self::Maintainability => write!(f, "maintainability"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentPhase {
    Prototype,
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalDebtLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Context about the project used to guide conflict resolution.
///
/// Constructed once per review session from caller-supplied configuration and
/// read-only for the engine's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectContext {
    pub priority: ProjectPriority,
    pub development_phase: DevelopmentPhase,
    pub team_size: u32,
    pub performance_critical: bool,
    pub security_sensitive: bool,
    pub legacy_system: bool,
    pub test_coverage: f64,
    pub technical_debt_level: TechnicalDebtLevel,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            priority: ProjectPriority::Balanced,
            development_phase: DevelopmentPhase::Development,
            team_size: 5,
            performance_critical: false,
            security_sensitive: false,
            legacy_system: false,
            test_coverage: 0.7,
            technical_debt_level: TechnicalDebtLevel::Medium,
        }
    }
}
