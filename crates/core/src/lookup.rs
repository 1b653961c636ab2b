use crate::config::LookupOptions;
use crate::models::SearchCandidate;
use crate::text::{char_len, truncate_chars};
use crate::traits::WebLookup;
use crate::LookupError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub const NO_RESULTS_TEXT: &str = "No relevant results found.";
pub const UNAVAILABLE_TEXT: &str = "Unable to search the internet at this time.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Results {
        candidates: Vec<SearchCandidate>,
        text: String,
    },
    NoResults,
    Unavailable,
}

impl LookupOutcome {
    pub fn context_text(&self) -> &str {
        match self {
            LookupOutcome::Results { text, .. } => text,
            LookupOutcome::NoResults => NO_RESULTS_TEXT,
            LookupOutcome::Unavailable => UNAVAILABLE_TEXT,
        }
    }
}

pub struct WikipediaLookup {
    client: Client,
    options: LookupOptions,
}

impl WikipediaLookup {
    pub fn new(options: LookupOptions) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;

        Ok(Self { client, options })
    }

    async fn search_candidates(&self, query: &str) -> Result<Vec<SearchCandidate>, LookupError> {
        let limit = self.options.result_limit.to_string();
        let url = Url::parse_with_params(
            &self.options.endpoint,
            &[
                ("action", "opensearch"),
                ("search", query),
                ("limit", limit.as_str()),
                ("format", "json"),
            ],
        )?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::BackendResponse {
                backend: "opensearch".to_string(),
                details: response.status().to_string(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(parse_opensearch(&payload))
    }

    async fn fetch_excerpt(&self, url: &str) -> Result<Option<String>, LookupError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_excerpt(&body, &self.options)
    }
}

#[async_trait]
impl WebLookup for WikipediaLookup {
    async fn lookup(&self, query: &str) -> LookupOutcome {
        let candidates = match self.search_candidates(query).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(%error, "web search failed");
                return LookupOutcome::Unavailable;
            }
        };

        if candidates.is_empty() {
            return LookupOutcome::NoResults;
        }

        let mut text = format_candidates(&candidates);
        let top = &candidates[0];
        if !top.url.is_empty() {
            match self.fetch_excerpt(&top.url).await {
                Ok(Some(excerpt)) => {
                    text.push_str(&format!("\nDetailed content from {}:\n{excerpt}", top.title));
                }
                Ok(None) => debug!(url = %top.url, "top result had no usable paragraphs"),
                Err(error) => warn!(url = %top.url, %error, "fetching top result failed"),
            }
        }

        LookupOutcome::Results { candidates, text }
    }
}

pub fn parse_opensearch(payload: &Value) -> Vec<SearchCandidate> {
    let column = |index: usize| payload.get(index).and_then(Value::as_array);
    let cell = |index: usize, row: usize| {
        column(index)
            .and_then(|values| values.get(row))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let Some(titles) = column(1) else {
        return Vec::new();
    };

    titles
        .iter()
        .enumerate()
        .map(|(row, title)| SearchCandidate {
            title: title.as_str().unwrap_or_default().to_string(),
            description: cell(2, row),
            url: cell(3, row),
        })
        .collect()
}

pub fn format_candidates(candidates: &[SearchCandidate]) -> String {
    let mut text = String::from("Search results from Wikipedia:\n\n");
    for (index, candidate) in candidates.iter().enumerate() {
        text.push_str(&format!(
            "{}. {}\n{}\nURL: {}\n\n",
            index + 1,
            candidate.title,
            candidate.description,
            candidate.url
        ));
    }
    text
}

pub fn extract_excerpt(html: &str, options: &LookupOptions) -> Result<Option<String>, LookupError> {
    let selector = Selector::parse(&options.paragraph_selector)
        .map_err(|error| LookupError::Parse(error.to_string()))?;
    let document = Html::parse_document(html);

    let paragraphs = document
        .select(&selector)
        .take(options.paragraph_count)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| char_len(text) >= options.min_paragraph_chars)
        .collect::<Vec<_>>();

    if paragraphs.is_empty() {
        return Ok(None);
    }

    let joined = paragraphs.join("\n\n");
    Ok(Some(truncate_chars(&joined, options.excerpt_chars).to_string()))
}
