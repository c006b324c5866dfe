use async_trait::async_trait;

use crate::error::Result;
use crate::review::Suggestion;

use super::{scan_lines, LineRule, ReviewAgent};

/// Flags security-sensitive constructs: hardcoded credentials, injection
/// vectors, dynamic code execution, weak randomness, unvalidated input.
pub struct SecurityAgent {
    rules: Vec<LineRule>,
}

impl SecurityAgent {
    pub fn new() -> Self {
        let rules = vec![
            LineRule::new(
                r#"(?i)(password|passwd|secret|api_key|token)\s*=\s*["'][^"']+["']"#,
                "Secure Secret Management",
                "Hardcoded secrets in source code can be exposed through version control, \
                 logs, or code sharing",
                "Hardcoded credentials are discoverable by anyone with access to the code, \
                 including version control history; attackers scan public repositories for \
                 them. Load secrets from the environment or a secure vault instead.",
                Some("password = env(\"DB_PASSWORD\")"),
                9.0,
                0.95,
                "secrets",
            ),
            LineRule::new(
                r"(?i)(query|execute|cursor).*(\+|%s|format)",
                "SQL Injection Prevention",
                "String concatenation or formatting in SQL queries enables SQL injection \
                 attacks",
                "SQL injection occurs when untrusted input is concatenated into query text. \
                 Parameterized queries separate SQL logic from user data, making injection \
                 impossible.",
                Some("execute(\"SELECT * FROM users WHERE id = ?\", [user_id])"),
                9.5,
                0.85,
                "injection",
            ),
            LineRule::new(
                r"\b(eval|exec)\s*\(",
                "Code Injection Prevention",
                "eval and exec run arbitrary code and can lead to code injection \
                 vulnerabilities",
                "If user input reaches dynamic code execution, attackers can run any code \
                 on the host. Parse data with a safe deserializer, or validate and sandbox \
                 when dynamic execution is unavoidable.",
                None,
                9.0,
                0.9,
                "injection",
            ),
            LineRule::new(
                r"(?i)\brand(om)?(\.|::)(random|choice|randint|gen|thread_rng)",
                "Cryptographically Secure Random Numbers",
                "General-purpose random generators are predictable and unsuitable for \
                 secure tokens or keys",
                "Standard PRNGs are seeded predictably; an attacker who recovers the seed \
                 can reproduce every value. Use the platform's cryptographically secure \
                 generator for anything security-relevant.",
                None,
                7.0,
                0.8,
                "cryptography",
            ),
            LineRule::new(
                r"(?i)(request\.|\binput\s*\(|params\[|form\[|args\.)",
                "Input Validation",
                "Untrusted input is used without visible validation or sanitization",
                "Every externally supplied value crosses a trust boundary. Validate type, \
                 range and format at the boundary and reject anything unexpected before it \
                 reaches business logic or storage.",
                None,
                7.5,
                0.75,
                "validation",
            ),
        ];
        Self { rules }
    }
}

impl Default for SecurityAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewAgent for SecurityAgent {
    fn name(&self) -> &str {
        crate::collaboration::agent_names::SECURITY
    }

    fn description(&self) -> &str {
        "Identifies security vulnerabilities and recommends secure coding practices \
         based on OWASP Top 10"
    }

    fn specializations(&self) -> &[&str] {
        &[
            "injection",
            "secrets management",
            "input validation",
            "cryptography",
        ]
    }

    async fn analyze(&self, code: &str, _language: &str) -> Result<Vec<Suggestion>> {
        scan_lines(self.name(), &self.rules, code, true)
    }
}
