use async_trait::async_trait;

use crate::error::Result;
use crate::review::Suggestion;

use super::{scan_lines, LineRule, ReviewAgent};

/// Applies Clean Code heuristics: naming, parameter counts, debt comments.
///
/// Comment lines are scanned too, so the debt-comment rule can fire; it sits
/// first in the table to take precedence on those lines.
pub struct CleanCodeAgent {
    rules: Vec<LineRule>,
}

impl CleanCodeAgent {
    pub fn new() -> Self {
        let rules = vec![
            LineRule::new(
                r"(?i)(//|#).*(todo|fixme|hack)",
                "Code Debt Comments",
                "TODO and FIXME comments indicate incomplete or problematic code",
                "Debt comments accumulate silently. Either do the work now, track it in \
                 an issue, or delete the comment if it no longer applies.",
                None,
                6.0,
                0.8,
                "structure",
            ),
            LineRule::new(
                r"\b(fn|def|function)\s+[A-Za-z_][A-Za-z0-9_]{24,}",
                "Meaningful Names - Function Length",
                "The function name is very long, which may indicate it is doing too much",
                "Names should be concise yet descriptive. A name that needs this many \
                 words usually describes several responsibilities; split them into \
                 smaller, single-purpose functions with clear names.",
                None,
                6.0,
                0.8,
                "naming",
            ),
            LineRule::new(
                r"\b(fn|def|function)\s+\w+\s*\([^)]*,[^)]*,[^)]*,[^)]*,",
                "Function Parameters",
                "The function takes five or more parameters, making it hard to \
                 understand and test",
                "Long parameter lists hide which arguments belong together. Group \
                 related parameters into a struct, or split the function along the \
                 groupings.",
                None,
                7.0,
                0.9,
                "structure",
            ),
            LineRule::new(
                r"(?i)\b(temp|tmp|data|info|obj)\b\s*[:=]",
                "Meaningful Names - Generic Names",
                "Generic names do not reveal intention; choose a clear, descriptive name",
                "Names like temp or data force readers to reconstruct meaning from \
                 surrounding context. Say what the value contains or represents.",
                None,
                5.0,
                0.7,
                "naming",
            ),
            LineRule::new(
                r"\b(let|var)\s+[a-z]\s*=",
                "Meaningful Names - Single Letter Variables",
                "Single letter variable names do not convey meaning outside short loop \
                 counters",
                "Searchable, descriptive names make the code readable without a mental \
                 symbol table. Single letters are only acceptable for tight loop indices.",
                None,
                4.0,
                0.6,
                "naming",
            ),
        ];
        Self { rules }
    }
}

impl Default for CleanCodeAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewAgent for CleanCodeAgent {
    fn name(&self) -> &str {
        crate::collaboration::agent_names::CLEAN_CODE
    }

    fn description(&self) -> &str {
        "Applies Clean Code principles focusing on meaningful names, small functions, \
         single responsibility and readability"
    }

    fn specializations(&self) -> &[&str] {
        &["naming", "function size", "code structure", "readability"]
    }

    async fn analyze(&self, code: &str, _language: &str) -> Result<Vec<Suggestion>> {
        scan_lines(self.name(), &self.rules, code, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flags_debt_comment() {
        let agent = CleanCodeAgent::new();
        let code = "// TODO: handle the error path\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].principle, "Code Debt Comments");
    }

    #[tokio::test]
    async fn test_flags_parameter_overload() {
        let agent = CleanCodeAgent::new();
        let code = "fn render(a: u8, b: u8, c: u8, d: u8, e: u8) {}\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(suggestions[0].principle, "Function Parameters");
    }

    #[tokio::test]
    async fn test_flags_generic_name() {
        let agent = CleanCodeAgent::new();
        let code = "let data = fetch();\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(
            suggestions[0].principle,
            "Meaningful Names - Generic Names"
        );
    }

    #[tokio::test]
    async fn test_descriptive_code_passes() {
        let agent = CleanCodeAgent::new();
        let code = "let elapsed_days = 5;\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert!(suggestions.is_empty());
    }
}
