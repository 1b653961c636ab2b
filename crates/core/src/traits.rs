use crate::lookup::LookupOutcome;
use crate::models::ChatMessage;
use crate::CompletionError;
use async_trait::async_trait;

#[async_trait]
pub trait WebLookup: Send + Sync {
    async fn lookup(&self, query: &str) -> LookupOutcome;
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Whether a usable credential is present. Unconfigured backends are never called.
    fn is_configured(&self) -> bool;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, CompletionError>;
}

#[async_trait]
impl<T: WebLookup + ?Sized> WebLookup for Box<T> {
    async fn lookup(&self, query: &str) -> LookupOutcome {
        (**self).lookup(query).await
    }
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Box<T> {
    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, CompletionError> {
        (**self).complete(messages).await
    }
}
