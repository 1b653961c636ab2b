use crate::config::CompletionOptions;
use crate::context::ContextSections;
use crate::models::ChatMessage;
use crate::text::truncate_chars;
use crate::traits::CompletionBackend;
use crate::CompletionError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const NO_RESPONSE_TEXT: &str = "No response generated.";

pub const CREDENTIAL_NOTICE: &str = "I'm here to help! Note: For full AI capabilities, configure the OPENAI_API_KEY environment variable.";

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionChoice {
    message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

pub struct OpenAiCompatibleBackend {
    client: Client,
    options: CompletionOptions,
}

impl OpenAiCompatibleBackend {
    pub fn new(options: CompletionOptions) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { client, options })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompatibleBackend {
    fn is_configured(&self) -> bool {
        self.options.credential().is_some()
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, CompletionError> {
        let api_key = self
            .options
            .credential()
            .ok_or(CompletionError::NotConfigured)?;

        let payload = ChatCompletionRequest {
            model: &self.options.model,
            messages,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.options.base_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(CompletionError::BackendResponse {
                status: status.as_u16(),
                details,
            });
        }

        let body: ChatCompletionResponse = response.json().await?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty()))
    }
}

pub fn fallback_response(query: &str, sections: &ContextSections, excerpt_chars: usize) -> String {
    let mut response = String::new();

    if let Some(search) = &sections.search {
        response.push_str(&format!(
            "Based on the internet search results:\n\n{}\n\n",
            truncate_chars(search, excerpt_chars)
        ));
    }

    if sections.documents.is_some() {
        response.push_str("I also have access to the uploaded PDF document(s). ");
    }

    if sections.is_empty() {
        response = format!("I received your message: \"{query}\"\n\n");
    }

    response.push_str(CREDENTIAL_NOTICE);
    response.push_str("\n\n");

    if sections.search.is_some() {
        response.push_str(
            "I found relevant information from Wikipedia that should help answer your question. ",
        );
    }

    response.push_str("Feel free to ask follow-up questions or upload PDF documents for analysis!");
    response
}
