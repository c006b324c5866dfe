use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{CouncilError, Result};

use super::ProjectContext;

pub const CONFIG_FILE_NAME: &str = "review-council.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouncilConfig {
    pub project: ProjectContext,
    pub agents: AgentsConfig,
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Agents to run, by display name. Empty means the full default roster.
    pub enabled: Vec<String>,
    /// Per-agent wall-clock budget.
    pub timeout_secs: u64,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Cap on suggestions listed per agent in text output.
    pub max_suggestions_shown: usize,
    /// Suggestions below this confidence are dropped before analysis.
    pub min_confidence: f64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_suggestions_shown: 10,
            min_confidence: 0.0,
        }
    }
}

impl CouncilConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = fs::read_to_string(path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| CouncilError::Config(e.to_string()))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Validate configuration values for consistency.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.project.team_size == 0 {
            errors.push("project.team_size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.project.test_coverage) {
            errors.push("project.test_coverage must be between 0.0 and 1.0");
        }
        if self.agents.timeout_secs == 0 {
            errors.push("agents.timeout_secs must be greater than 0");
        }
        if self.review.max_suggestions_shown == 0 {
            errors.push("review.max_suggestions_shown must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.review.min_confidence) {
            errors.push("review.min_confidence must be between 0.0 and 1.0");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CouncilError::Config(errors.join("; ")))
        }
    }
}
