use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub text: String,
    pub size_bytes: usize,
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCandidate {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    #[default]
    Heuristic,
    Lopdf,
}

#[derive(Debug, Clone)]
pub struct IngestionOptions {
    pub accepted_content_type: String,
    pub prefix_bytes: usize,
    pub min_run_chars: usize,
    pub max_runs: usize,
    pub min_text_chars: usize,
    pub max_text_chars: usize,
    pub strategy: ExtractionStrategy,
}

impl IngestionOptions {
    pub fn readable_run_regex(&self) -> String {
        format!(r#"[A-Za-z0-9\s.,!?;:'"()\-]{{{},}}"#, self.min_run_chars)
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            accepted_content_type: "application/pdf".to_string(),
            prefix_bytes: 50_000,
            min_run_chars: 20,
            max_runs: 100,
            min_text_chars: 50,
            max_text_chars: 3_000,
            strategy: ExtractionStrategy::Heuristic,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestionReceipt {
    pub filename: String,
    pub size: usize,
    pub replaced: bool,
    pub degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_lowercase_wire_names() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(message.role, Role::Assistant);

        let encoded = serde_json::to_string(&ChatMessage::user("hello")).unwrap();
        assert_eq!(encoded, r#"{"role":"user","content":"hello"}"#);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_str::<ChatMessage>(r#"{"role":"tool","content":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn readable_run_regex_tracks_min_run_chars() {
        let options = IngestionOptions {
            min_run_chars: 7,
            ..IngestionOptions::default()
        };
        let pattern = regex::Regex::new(&options.readable_run_regex()).unwrap();
        assert!(pattern.is_match("abcdefg"));
        assert!(!pattern.is_match("abcdef"));
    }
}
