//! Configuration types and loading.
//!
//! - `CouncilConfig`: top-level TOML configuration with validation
//! - `ProjectContext`: project traits that steer conflict resolution

mod project;
mod settings;

pub use project::{DevelopmentPhase, ProjectContext, ProjectPriority, TechnicalDebtLevel};
pub use settings::{AgentsConfig, CouncilConfig, ReviewConfig, CONFIG_FILE_NAME};
