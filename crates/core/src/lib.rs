pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod lookup;
pub mod models;
pub mod orchestrator;
pub mod store;
pub mod text;
pub mod traits;
pub mod trigger;

pub use completion::{fallback_response, OpenAiCompatibleBackend, CREDENTIAL_NOTICE};
pub use config::{CompletionOptions, LookupOptions};
pub use context::{build_system_prompt, document_section, ContextSections};
pub use error::{ChatError, CompletionError, IngestError, LookupError};
pub use extractor::{
    extractor_for, ExtractionOutcome, HeuristicExtractor, LopdfExtractor, TextExtractor,
};
pub use ingest::{digest_bytes, DocumentIngestor, Upload};
pub use lookup::{LookupOutcome, WikipediaLookup};
pub use models::{
    ChatMessage, DocumentRecord, ExtractionStrategy, IngestionOptions, IngestionReceipt, Role,
    SearchCandidate,
};
pub use orchestrator::{ChatCoordinator, ChatReply, CompletionPath};
pub use store::DocumentStore;
pub use traits::{CompletionBackend, WebLookup};
pub use trigger::needs_web_search;
