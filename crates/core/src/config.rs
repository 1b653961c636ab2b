use std::time::Duration;

pub const PLACEHOLDER_API_KEY: &str = "dummy-key";

#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub endpoint: String,
    pub result_limit: usize,
    pub timeout: Duration,
    pub user_agent: String,
    pub paragraph_selector: String,
    pub paragraph_count: usize,
    pub min_paragraph_chars: usize,
    pub excerpt_chars: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            result_limit: 3,
            timeout: Duration::from_secs(5),
            user_agent: "Mozilla/5.0 (compatible; AIChat/1.0)".to_string(),
            paragraph_selector: ".mw-parser-output > p".to_string(),
            paragraph_count: 5,
            min_paragraph_chars: 50,
            excerpt_chars: 2_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub fallback_excerpt_chars: usize,
}

impl CompletionOptions {
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout: Duration::from_secs(60),
            fallback_excerpt_chars: 800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_blank_keys_are_not_credentials() {
        for key in [None, Some(""), Some("   "), Some("dummy-key")] {
            let options = CompletionOptions {
                api_key: key.map(str::to_string),
                ..CompletionOptions::default()
            };
            assert_eq!(options.credential(), None, "key {key:?}");
        }
    }

    #[test]
    fn real_key_is_trimmed() {
        let options = CompletionOptions {
            api_key: Some(" sk-test \n".to_string()),
            ..CompletionOptions::default()
        };
        assert_eq!(options.credential(), Some("sk-test"));
    }
}
