use async_trait::async_trait;

use crate::error::Result;
use crate::review::Suggestion;

use super::{scan_lines, LineRule, ReviewAgent};

/// Spots opportunities for SOLID refactorings and Gang of Four patterns.
pub struct DesignPatternsAgent {
    rules: Vec<LineRule>,
}

impl DesignPatternsAgent {
    pub fn new() -> Self {
        let rules = vec![
            LineRule::new(
                r"(?i)\b(class|struct)\s+\w*(manager|processor|handler|helper|util)",
                "Single Responsibility Principle",
                "Catch-all type names often mark classes that accumulate multiple \
                 responsibilities",
                "A type should have one reason to change. Names like Manager or Helper \
                 usually cover several concerns at once; splitting them into focused \
                 types keeps each one understandable and independently testable.",
                None,
                7.0,
                0.75,
                "solid_principles",
            ),
            LineRule::new(
                r"(?i)\bif\b.*==.*(&&|\band\b).*==",
                "Strategy Pattern",
                "Complex conditional logic can be replaced with a strategy for better \
                 extensibility",
                "Branching on type or category in one large conditional grows with every \
                 new case. A strategy per behavior keeps existing code closed to \
                 modification while staying open to extension.",
                Some("dispatch through a strategy selected by the discriminating value"),
                6.5,
                0.8,
                "behavioral_patterns",
            ),
            LineRule::new(
                r"(?i)isinstance\s*\(|typeof\s|type\s*\(.*\)\s*==|downcast",
                "Polymorphism over Type Checking",
                "Type checking often indicates missing polymorphism; objects should \
                 carry their own behavior",
                "Checking concrete types and branching reimplements dispatch by hand. \
                 Define a common interface and let each implementation behave for \
                 itself; new types then need no changes to existing call sites.",
                None,
                6.0,
                0.85,
                "structural_patterns",
            ),
            LineRule::new(
                r"=\s*[A-Z][A-Za-z0-9_]*(::new|\()",
                "Dependency Inversion Principle",
                "Hard-coded object construction creates tight coupling to a concrete \
                 implementation",
                "Depending on abstractions rather than concrete constructors lets \
                 implementations be swapped at the boundary, which is what makes the \
                 surrounding code flexible and testable.",
                None,
                6.0,
                0.7,
                "dependency_injection",
            ),
            LineRule::new(
                r"\.\w+\([^)]*\)\.\w+\([^)]*\)\.\w+\([^)]*\)\.",
                "Builder Pattern",
                "Long call chains for object construction can be simplified with a \
                 builder",
                "When configuration requires many chained steps, a builder gives the \
                 construction a name, enforces ordering, and can validate the result \
                 before handing it out.",
                None,
                5.0,
                0.7,
                "creational_patterns",
            ),
        ];
        Self { rules }
    }
}

impl Default for DesignPatternsAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewAgent for DesignPatternsAgent {
    fn name(&self) -> &str {
        crate::collaboration::agent_names::DESIGN_PATTERNS
    }

    fn description(&self) -> &str {
        "Identifies opportunities for design patterns and architectural improvements \
         based on Gang of Four patterns and SOLID principles"
    }

    fn specializations(&self) -> &[&str] {
        &[
            "SOLID principles",
            "behavioral patterns",
            "structural patterns",
            "creational patterns",
        ]
    }

    async fn analyze(&self, code: &str, _language: &str) -> Result<Vec<Suggestion>> {
        scan_lines(self.name(), &self.rules, code, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flags_catch_all_type_name() {
        let agent = DesignPatternsAgent::new();
        let code = "struct UserManager {\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].principle, "Single Responsibility Principle");
    }

    #[tokio::test]
    async fn test_flags_conditional_dispatch() {
        let agent = DesignPatternsAgent::new();
        let code = "if kind == \"card\" && region == \"eu\" {\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(suggestions[0].principle, "Strategy Pattern");
    }

    #[tokio::test]
    async fn test_flags_type_checking() {
        let agent = DesignPatternsAgent::new();
        let code = "if isinstance(shape, Circle):\n";
        let suggestions = agent.analyze(code, "python").await.unwrap();
        assert_eq!(
            suggestions[0].principle,
            "Polymorphism over Type Checking"
        );
    }
}
