//! Review data model shared by agents and the collaboration engine.
//!
//! - `Suggestion`: a single finding anchored to an optional source line
//! - `AgentRunResult`: one agent's complete batch with severity statistics

mod agent_result;
mod suggestion;

pub use agent_result::{AgentRunResult, SeverityBreakdown};
pub use suggestion::{Severity, Suggestion};
