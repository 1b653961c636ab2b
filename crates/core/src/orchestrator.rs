use crate::completion::{fallback_response, NO_RESPONSE_TEXT};
use crate::context::{build_system_prompt, ContextSections};
use crate::lookup::LookupOutcome;
use crate::models::ChatMessage;
use crate::store::DocumentStore;
use crate::traits::{CompletionBackend, WebLookup};
use crate::trigger::needs_web_search;
use crate::ChatError;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPath {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub path: CompletionPath,
    pub searched: bool,
}

pub struct ChatCoordinator<L, C>
where
    L: WebLookup,
    C: CompletionBackend,
{
    lookup: L,
    backend: C,
    store: DocumentStore,
    fallback_excerpt_chars: usize,
}

impl<L, C> ChatCoordinator<L, C>
where
    L: WebLookup,
    C: CompletionBackend,
{
    pub fn new(lookup: L, backend: C, store: DocumentStore, fallback_excerpt_chars: usize) -> Self {
        Self {
            lookup,
            backend,
            store,
            fallback_excerpt_chars,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub async fn respond(&self, conversation: &[ChatMessage]) -> Result<ChatReply, ChatError> {
        let last = conversation.last().ok_or(ChatError::EmptyConversation)?;

        let lookup = if needs_web_search(&last.content) {
            let outcome = self.lookup.lookup(&last.content).await;
            if let LookupOutcome::Results { candidates, .. } = &outcome {
                info!(results = candidates.len(), "web lookup succeeded");
            }
            Some(outcome)
        } else {
            None
        };

        let sections = ContextSections::gather(
            lookup.as_ref().map(LookupOutcome::context_text),
            &self.store,
        );

        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(build_system_prompt(&sections)));
        messages.extend_from_slice(conversation);

        let fallback = || fallback_response(&last.content, &sections, self.fallback_excerpt_chars);
        let (message, path) = if self.backend.is_configured() {
            match self.backend.complete(&messages).await {
                Ok(reply) => (
                    reply.unwrap_or_else(|| NO_RESPONSE_TEXT.to_string()),
                    CompletionPath::Live,
                ),
                Err(error) => {
                    warn!(%error, "completion backend failed, using fallback reply");
                    (fallback(), CompletionPath::Fallback)
                }
            }
        } else {
            (fallback(), CompletionPath::Fallback)
        };

        info!(
            turns = conversation.len(),
            searched = lookup.is_some(),
            documents = self.store.len(),
            path = ?path,
            "chat turn answered"
        );

        Ok(ChatReply {
            message,
            path,
            searched: lookup.is_some(),
        })
    }
}
