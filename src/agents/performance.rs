use async_trait::async_trait;

use crate::error::Result;
use crate::review::Suggestion;

use super::{scan_lines, LineRule, ReviewAgent};

/// Flags algorithmic inefficiencies: nested iteration, quadratic string
/// building, linear membership scans, repeated sorting and recomputation.
pub struct PerformanceAgent {
    rules: Vec<LineRule>,
}

impl PerformanceAgent {
    pub fn new() -> Self {
        let rules = vec![
            LineRule::new(
                r"(?i)for\s.*\bin\b.*for\s.*\bin\b|while.*while",
                "Algorithmic Complexity - Nested Loops",
                "Nested loops often indicate quadratic time complexity which becomes \
                 problematic with larger datasets",
                "Quadratic scans quadruple in cost when the data doubles. A hash map \
                 lookup, a set for membership, or sorting plus a single pass usually \
                 removes the inner loop entirely.",
                Some("build a lookup table once, then scan the outer collection"),
                8.0,
                0.8,
                "algorithmic_complexity",
            ),
            LineRule::new(
                r"(?i)(\+\s*=.*str)|(\+.*str.*for)",
                "String Optimization - Concatenation",
                "String concatenation in loops creates many temporary buffers, causing \
                 quadratic time and memory",
                "Each concatenation copies every character accumulated so far. Collect \
                 the parts and join once at the end to bring the cost back to linear.",
                Some("collect parts into a list and join once after the loop"),
                7.0,
                0.9,
                "string_optimization",
            ),
            LineRule::new(
                r"(?i)\.sort\(\).*for|sorted\(.*for",
                "Algorithm Optimization - Repeated Sorting",
                "Sorting inside a loop repeats an expensive operation unnecessarily",
                "Sorting costs n log n each time it runs. Sort once before the loop, or \
                 keep the data in an order-maintaining structure if insertions interleave \
                 with reads.",
                Some("sort once outside the loop"),
                7.5,
                0.9,
                "algorithmic_complexity",
            ),
            LineRule::new(
                r"(?i)\bin\s+\[|\.contains\(",
                "Data Structure Efficiency - Membership Testing",
                "Membership testing in a sequential collection is linear; hashed \
                 collections answer the same question in constant time",
                "A linear scan checks half the elements on average. Converting the \
                 collection to a hash set once makes every subsequent lookup effectively \
                 free, regardless of size.",
                Some("use a hash set for membership checks"),
                6.0,
                0.85,
                "data_structures",
            ),
            LineRule::new(
                r"(?i)\b(for|while)\b.*\b(len|count|size)\s*\(|\b(len|count|size)\s*\(.*\b(for|while)\b",
                "Repeated Recomputation in Loop Conditions",
                "The loop condition recomputes a value that does not change; caching it \
                 before the loop avoids the overhead",
                "Re-evaluating an invariant expression on every iteration buys nothing. \
                 Hoist it into a local before the loop; the win grows with anything more \
                 expensive than a length call.",
                Some("hoist the invariant value into a local before the loop"),
                3.0,
                0.7,
                "function_overhead",
            ),
        ];
        Self { rules }
    }
}

impl Default for PerformanceAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewAgent for PerformanceAgent {
    fn name(&self) -> &str {
        crate::collaboration::agent_names::PERFORMANCE
    }

    fn description(&self) -> &str {
        "Identifies performance bottlenecks and algorithmic inefficiencies and \
         recommends optimizations for speed, memory and scalability"
    }

    fn specializations(&self) -> &[&str] {
        &[
            "algorithmic complexity",
            "data structures",
            "memory allocation",
            "caching",
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
    async fn test_flags_nested_loops() {
        let agent = PerformanceAgent::new();
        let code = "for a in xs: for b in ys: check(a, b)\n";
        let suggestions = agent.analyze(code, "python").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].principle,
            "Algorithmic Complexity - Nested Loops"
        );
        assert_eq!(suggestions[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn test_flags_linear_membership_scan() {
        let agent = PerformanceAgent::new();
        let code = "if names.contains(&name) {\n";
        let suggestions = agent.analyze(code, "rust").await.unwrap();
        assert_eq!(
            suggestions[0].principle,
            "Data Structure Efficiency - Membership Testing"
        );
    }

    #[tokio::test]
    async fn test_recomputation_reasoning_mentions_caching() {
        // The caching wording is what pairs this rule with the security
        // agent's validation findings in synergy detection.
        let agent = PerformanceAgent::new();
        let code = "while i < len(items): i += 1\n";
        let suggestions = agent.analyze(code, "python").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].reasoning.contains("caching"));
    }
}
