//! Guardrail engine: question validation, sanitisation, safe-prompt
//! construction, and response validation.
//!
//! # Question validation
//!
//! [`validate_question`] runs five checks and returns every violation found:
//!
//! | Step | Check | Severity |
//! |------|-------|----------|
//! | 1 | length within `[min_length, max_length]` | error |
//! | 2 | configured blocked phrases (first match only) | error |
//! | 3 | structural prompt-injection rules | error |
//! | 4 | document focus (when required) | warning, error in strict mode |
//! | 5 | suspicious patterns | warning |
//!
//! Callers treat any error-severity violation as a hard reject and log
//! warnings without blocking.
//!
//! # Response validation
//!
//! [`validate_response`] is advisory only: its warnings are logged, never
//! used to alter or block an answer.

mod prompt;
pub mod rules;
mod sanitize;

pub use prompt::create_safe_prompt;
pub use sanitize::sanitize_question;

use serde::{Deserialize, Serialize};

use rules::{
    CONTEXT_TERMS, COMPILED_INJECTION_RULES, COMPILED_SUSPICIOUS_RULES, DEFAULT_BLOCKED_PHRASES,
    DOCUMENT_TERMS, QUESTION_WORDS, SCOPE_OVERREACH_MARKERS,
};

/// Responses longer than this many characters are flagged as a possible
/// hallucination.
pub const MAX_RESPONSE_CHARS: usize = 4000;

/// Declarative guardrail policy, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct GuardrailConfig {
    /// Bounds on the raw question length in characters, surrounding
    /// whitespace included. A blank question is always too short.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_blocked_phrases")]
    pub blocked_phrases: Vec<String>,
    #[serde(default = "default_true")]
    pub require_document_focus: bool,
    /// Promote the document-focus warning to a rejection.
    #[serde(default)]
    pub strict_mode: bool,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            blocked_phrases: default_blocked_phrases(),
            require_document_focus: true,
            strict_mode: false,
        }
    }
}

fn default_min_length() -> usize {
    5
}
fn default_max_length() -> usize {
    1000
}
fn default_true() -> bool {
    true
}
fn default_blocked_phrases() -> Vec<String> {
    DEFAULT_BLOCKED_PHRASES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Length,
    ContentPolicy,
    InjectionAttempt,
    OffTopic,
    SuspiciousPattern,
    ScopeOverreach,
    ResponseLength,
}

/// A single guardrail finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    fn new(
        kind: ViolationKind,
        severity: Severity,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
            suggestion: suggestion.map(str::to_string),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Whether any violation must block the request.
pub fn has_errors(violations: &[Violation]) -> bool {
    violations.iter().any(Violation::is_error)
}

/// The first error-severity violation, if any.
pub fn first_error(violations: &[Violation]) -> Option<&Violation> {
    violations.iter().find(|v| v.is_error())
}

/// Messages of all warning-severity violations.
pub fn warnings(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .map(|v| v.message.clone())
        .collect()
}

/// Validate a user question against `config`.
pub fn validate_question(text: &str, config: &GuardrailConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let lower = text.to_lowercase();

    let len = text.chars().count();
    if len < config.min_length || text.trim().is_empty() {
        violations.push(Violation::new(
            ViolationKind::Length,
            Severity::Error,
            format!(
                "Question is too short ({} characters, minimum {})",
                len, config.min_length
            ),
            Some("Ask a complete question about your documents."),
        ));
    } else if len > config.max_length {
        violations.push(Violation::new(
            ViolationKind::Length,
            Severity::Error,
            format!(
                "Question is too long ({} characters, maximum {})",
                len, config.max_length
            ),
            Some("Shorten your question and focus on one topic."),
        ));
    }

    if let Some(phrase) = config
        .blocked_phrases
        .iter()
        .find(|p| !p.is_empty() && lower.contains(&p.to_lowercase()))
    {
        violations.push(Violation::new(
            ViolationKind::ContentPolicy,
            Severity::Error,
            format!("Question contains blocked content: '{}'", phrase),
            Some("Ask questions about the information in your uploaded documents."),
        ));
    }

    for compiled in COMPILED_INJECTION_RULES.iter() {
        if compiled.regex.is_match(text) {
            let r = compiled.rule;
            violations.push(Violation::new(r.kind, r.severity, r.message, r.suggestion));
        }
    }

    if config.require_document_focus && !is_document_focused(&lower) {
        let severity = if config.strict_mode {
            Severity::Error
        } else {
            Severity::Warning
        };
        violations.push(Violation::new(
            ViolationKind::OffTopic,
            severity,
            "Question does not appear to be about the documents",
            Some("Mention the policy, document, or topic you are asking about."),
        ));
    }

    for compiled in COMPILED_SUSPICIOUS_RULES.iter() {
        if compiled.regex.is_match(text) {
            let r = compiled.rule;
            violations.push(Violation::new(r.kind, r.severity, r.message, r.suggestion));
        }
    }

    violations
}

/// A question is document-focused if it names the corpus explicitly, or
/// combines a question word with a document-context term. Either signal
/// alone is too weak.
fn is_document_focused(lower: &str) -> bool {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let has = |terms: &[&str]| words.iter().any(|w| terms.contains(w));

    has(DOCUMENT_TERMS) || (has(QUESTION_WORDS) && has(CONTEXT_TERMS))
}

/// Validate a model response. All findings are warnings.
pub fn validate_response(text: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    let lower = text.to_lowercase();

    if let Some(marker) = SCOPE_OVERREACH_MARKERS.iter().find(|m| lower.contains(*m)) {
        violations.push(Violation::new(
            ViolationKind::ScopeOverreach,
            Severity::Warning,
            format!(
                "Response may go beyond the provided documents ('{}')",
                marker.trim_end_matches(',')
            ),
            None,
        ));
    }

    let len = text.chars().count();
    if len > MAX_RESPONSE_CHARS {
        violations.push(Violation::new(
            ViolationKind::ResponseLength,
            Severity::Warning,
            format!(
                "Response is unusually long ({} characters); it may contain hallucinated content",
                len
            ),
            None,
        ));
    }

    violations
}
