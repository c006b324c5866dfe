use async_trait::async_trait;

use crate::error::Result;
use crate::review::Suggestion;

use super::{scan_lines, LineRule, ReviewAgent};

/// Flags coupling that prevents isolated, deterministic tests: global state,
/// ambient time, direct file and network access, hard-wired dependencies.
pub struct TestabilityAgent {
    rules: Vec<LineRule>,
}

impl TestabilityAgent {
    pub fn new() -> Self {
        let rules = vec![
            LineRule::new(
                r"(?i)\bglobal\s+\w+|\bstatic\s+mut\b",
                "Avoid Global State for Test Isolation",
                "Global variables create hidden dependencies between tests and make \
                 test isolation impossible",
                "When functions mutate shared globals, test order matters, parallel runs \
                 race, and failures cascade. Pass state explicitly or inject it so each \
                 test owns its world.",
                None,
                8.0,
                0.9,
                "test_isolation",
            ),
            LineRule::new(
                r"(?i)(datetime\.now|time\.time|Instant::now|SystemTime::now|Date\.now)",
                "Testable Time Dependencies",
                "Reading the ambient clock makes behavior non-deterministic and \
                 time-dependent in tests",
                "Code that reads the current time cannot be tested for expiry, \
                 scheduling or timezone behavior without waiting. Accept the timestamp \
                 as a parameter or inject a clock that tests control.",
                Some("accept the current time as a parameter with a sensible default"),
                6.0,
                0.9,
                "pure_functions",
            ),
            LineRule::new(
                r"=\s*\w+(Service|Client|Repository|Database|Connection)\s*(::new)?\s*\(",
                "Dependency Injection for Testability",
                "Hard-coded construction makes it impossible to substitute test \
                 doubles during testing",
                "Constructing collaborators inline couples the unit to databases, APIs \
                 and file systems. Inject the dependency through the constructor so a \
                 fake can stand in and the unit tests fast and alone.",
                Some("inject the collaborator through the constructor"),
                7.0,
                0.8,
                "dependency_injection",
            ),
            LineRule::new(
                r"(?i)\bopen\s*\(|File::open|File::create|\.read_to_string\s*\(",
                "Abstract File Operations for Testing",
                "Direct file operations make tests dependent on the file system and \
                 hard to isolate",
                "File-touching tests are slow, leave artifacts, and fail on permissions \
                 or missing paths. Put the operation behind a small interface with an \
                 in-memory implementation for tests.",
                None,
                6.0,
                0.8,
                "mocking_strategies",
            ),
            LineRule::new(
                r"(?i)(requests\.|urllib|http\.get|reqwest::|\bfetch\s*\()",
                "Isolate Network Dependencies",
                "Direct network calls make tests slow, flaky and environment-dependent",
                "A test that talks to a live endpoint fails with the network, not with \
                 the code. Wrap the call behind an interface and verify against a \
                 recorded or fake response.",
                None,
                6.5,
                0.8,
                "mocking_strategies",
            ),
        ];
        Self { rules }
    }
}

impl Default for TestabilityAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewAgent for TestabilityAgent {
    fn name(&self) -> &str {
        crate::collaboration::agent_names::TESTABILITY
    }

    fn description(&self) -> &str {
        "Identifies opportunities to improve code testability, including dependency \
         injection, mocking seams and test isolation"
    }

    fn specializations(&self) -> &[&str] {
        &[
            "dependency injection",
            "test isolation",
            "mocking strategies",
            "pure functions",
        ]
    }

    async fn analyze(&self, code: &str, _language: &str) -> Result<Vec<Suggestion>> {
        scan_lines(self.name(), &self.rules, code, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Severity;

    #[tokio::test]
    async fn test_flags_global_state() {
        let agent = TestabilityAgent::new();
        let code = "global counter\n";
        let suggestions = agent.analyze(code, "python").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].principle,
            "Avoid Global State for Test Isolation"
        );
        assert_eq!(suggestions[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn test_flags_ambient_clock() {
        let agent = TestabilityAgent::new();
        let code = "let started = Instant::now();\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(suggestions[0].principle, "Testable Time Dependencies");
    }

    #[tokio::test]
    async fn test_flags_hardwired_dependency() {
        let agent = TestabilityAgent::new();
        let code = "let store = OrderRepository::new(dsn);\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(
            suggestions[0].principle,
            "Dependency Injection for Testability"
        );
    }
}
