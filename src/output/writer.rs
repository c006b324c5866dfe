use serde::Serialize;

use crate::agents::{ReviewAgent, ReviewOutcome};
use crate::cli::OutputFormat;
use crate::collaboration::Conflict;

/// Writes review results in the configured output format.
///
/// - Text: human-readable sections (default)
/// - Json: one JSON object on stdout
pub struct OutputWriter {
    format: OutputFormat,
    max_suggestions_shown: usize,
}

/// Serializable roster entry for the `agents` command.
#[derive(Debug, Clone, Serialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub specializations: Vec<String>,
}

impl AgentInfo {
    pub fn from_agent(agent: &dyn ReviewAgent) -> Self {
        Self {
            name: agent.name().to_string(),
            description: agent.description().to_string(),
            specializations: agent
                .specializations()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            max_suggestions_shown: 10,
        }
    }

    pub fn with_max_suggestions(mut self, max_suggestions_shown: usize) -> Self {
        self.max_suggestions_shown = max_suggestions_shown;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn emit_outcome(&self, outcome: &ReviewOutcome) {
        match self.format {
            OutputFormat::Text => self.print_text_outcome(outcome),
            OutputFormat::Json => Self::write_json(outcome),
        }
    }

    pub fn emit_roster(&self, agents: &[AgentInfo]) {
        match self.format {
            OutputFormat::Text => {
                for agent in agents {
                    println!("{}", agent.name);
                    println!("    {}", agent.description);
                    println!("    Specializations: {}", agent.specializations.join(", "));
                    println!();
                }
            }
            OutputFormat::Json => Self::write_json(&agents),
        }
    }

    pub fn emit_message(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{message}"),
            OutputFormat::Json => Self::write_json(&MessageOutput {
                message: message.to_string(),
            }),
        }
    }

    fn write_json<T: Serialize>(value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize output: {e}"),
        }
    }

    fn print_text_outcome(&self, outcome: &ReviewOutcome) {
        let summary = &outcome.summary;

        println!("Review Summary");
        println!("==============");
        println!("Agents:               {}", summary.total_agents);
        println!("Suggestions:          {}", summary.total_suggestions);
        println!("Average impact:       {:.1}", summary.average_impact_score);
        println!(
            "Conflicts:            {} detected, {} auto-resolved",
            summary.conflicts_detected, summary.conflicts_auto_resolved
        );
        println!("Synergies:            {}", summary.synergies_found);
        println!(
            "Collaboration score:  {:.1}/100",
            summary.collaboration_score
        );

        if !outcome.collaboration.recommended_focus_areas.is_empty() {
            println!();
            println!("Focus Areas");
            println!("-----------");
            for area in &outcome.collaboration.recommended_focus_areas {
                println!("  - {area}");
            }
        }

        if !outcome.collaboration.priority_matrix.is_empty() {
            println!();
            println!("Priority Matrix");
            println!("---------------");
            for (agent, score) in &outcome.collaboration.priority_matrix {
                println!("  {agent:<24} {score:.2}");
            }
        }

        if !outcome.resolved_conflicts.is_empty() {
            println!();
            println!("Conflicts");
            println!("---------");
            for conflict in &outcome.resolved_conflicts {
                Self::print_conflict(conflict);
            }
        }

        if !outcome.collaboration.synergies.is_empty() {
            println!();
            println!("Synergies");
            println!("---------");
            for synergy in &outcome.collaboration.synergies {
                println!("  {}", synergy.synthesis_description);
                println!(
                    "    Agents: {}  Combined impact: {:.1}",
                    synergy.involved_agents.join(" + "),
                    synergy.combined_impact
                );
                for (step, description) in synergy.implementation_order.iter().enumerate() {
                    println!("    {}. {description}", step + 1);
                }
            }
        }

        for result in &outcome.agent_results {
            if result.suggestions.is_empty() {
                continue;
            }
            println!();
            println!("{} ({} findings)", result.agent_name, result.total_issues);
            println!("{}", "-".repeat(result.agent_name.len() + 12));
            for suggestion in result.suggestions.iter().take(self.max_suggestions_shown) {
                let location = match suggestion.line_number {
                    Some(line) => format!("line {line}"),
                    None => "file".to_string(),
                };
                println!(
                    "  [{}] {location}: {} - {}",
                    suggestion.severity, suggestion.principle, suggestion.reasoning
                );
            }
            if result.suggestions.len() > self.max_suggestions_shown {
                println!(
                    "  ... and {} more",
                    result.suggestions.len() - self.max_suggestions_shown
                );
            }
        }
    }

    fn print_conflict(conflict: &Conflict) {
        println!(
            "  [{}] {}",
            conflict.conflict_type, conflict.description
        );
        if let Some(strategy) = conflict.resolution_strategy {
            println!("    Strategy: {strategy}");
        }
        match &conflict.resolved_suggestion {
            Some(suggestion) => {
                println!(
                    "    Resolved: {} ({}, impact {:.1})",
                    suggestion.principle, suggestion.agent_name, suggestion.impact_score
                );
            }
            None => println!("    Awaiting user decision"),
        }
        if let Some(rationale) = &conflict.resolution_rationale {
            println!("    Rationale: {rationale}");
        }
    }
}

#[derive(Serialize)]
struct MessageOutput {
    message: String,
}
