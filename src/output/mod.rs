//! Output formatting for review results.

mod writer;

pub use writer::{AgentInfo, OutputWriter};
