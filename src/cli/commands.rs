use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ProjectPriority;

#[derive(Parser)]
#[command(name = "review-council")]
#[command(author, version, about = "Multi-agent code review with conflict resolution", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Path to review-council.toml (default: current directory)
    #[arg(long, global = true, env = "REVIEW_COUNCIL_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review a source file with the full agent roster
    Review {
        /// File to review
        path: PathBuf,

        /// Override the language inferred from the file extension
        #[arg(long)]
        language: Option<String>,

        /// Override the configured project priority
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
    },

    /// List the available review agents
    Agents,

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default review-council.toml to the current directory
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PriorityArg {
    Performance,
    Security,
    Maintainability,
    Balanced,
}

impl From<PriorityArg> for ProjectPriority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Performance => ProjectPriority::Performance,
            PriorityArg::Security => ProjectPriority::Security,
            PriorityArg::Maintainability => ProjectPriority::Maintainability,
            PriorityArg::Balanced => ProjectPriority::Balanced,
        }
    }
}

/// Infer the review language from a file extension.
pub fn infer_language(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("rs") => "rust",
        Some("py") => "python",
        Some("js") | Some("mjs") => "javascript",
        Some("ts") | Some("tsx") => "typescript",
        Some("go") => "go",
        Some("java") => "java",
        Some("rb") => "ruby",
        Some("c") | Some("h") => "c",
        Some("cc") | Some("cpp") | Some("hpp") => "cpp",
        Some("cs") => "csharp",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_inference() {
        assert_eq!(infer_language(Path::new("src/main.rs")), "rust");
        assert_eq!(infer_language(Path::new("app.py")), "python");
        assert_eq!(infer_language(Path::new("notes.txt")), "text");
        assert_eq!(infer_language(Path::new("Makefile")), "text");
    }
}
