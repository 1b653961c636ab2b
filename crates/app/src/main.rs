mod error;
mod server;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use docchat_core::{
    ChatCoordinator, ChatMessage, CompletionBackend, CompletionOptions, DocumentIngestor,
    DocumentStore, ExtractionStrategy, IngestionOptions, LookupOptions, OpenAiCompatibleBackend,
    Upload, WebLookup, WikipediaLookup,
};
use server::{AppState, Coordinator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docchat", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Language-model API key; leave unset to answer with templated replies.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    openai_base_url: String,

    /// Chat model name
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    model: String,

    /// MediaWiki API endpoint used for web lookups.
    #[arg(long, default_value = "https://en.wikipedia.org/w/api.php")]
    search_endpoint: String,

    /// Timeout in seconds for the search request and the article fetch.
    #[arg(long, default_value = "5")]
    lookup_timeout_secs: u64,

    /// How uploaded PDFs are turned into text.
    #[arg(long, value_enum, default_value_t = Extractor::Heuristic)]
    extractor: Extractor,
}

#[derive(Clone, Copy, ValueEnum)]
enum Extractor {
    /// Scan raw bytes for readable runs.
    Heuristic,
    /// Parse page text operators.
    Lopdf,
}

impl From<Extractor> for ExtractionStrategy {
    fn from(value: Extractor) -> Self {
        match value {
            Extractor::Heuristic => ExtractionStrategy::Heuristic,
            Extractor::Lopdf => ExtractionStrategy::Lopdf,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the chat and upload endpoints.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "DOCCHAT_BIND", default_value = "127.0.0.1:3000")]
        bind: String,
        /// Largest accepted request body in bytes.
        #[arg(long, default_value = "20971520")]
        max_upload_bytes: usize,
    },
    /// Answer one message locally, optionally with PDFs as context.
    Ask {
        /// Message text
        #[arg(long)]
        message: String,
        /// PDF files to load before answering.
        #[arg(long = "document")]
        documents: Vec<PathBuf>,
    },
    /// Run ingestion on a local PDF and print the stored text.
    Extract {
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            model: self.model.clone(),
            ..CompletionOptions::default()
        }
    }

    fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            endpoint: self.search_endpoint.clone(),
            timeout: Duration::from_secs(self.lookup_timeout_secs),
            ..LookupOptions::default()
        }
    }

    fn ingestion_options(&self) -> IngestionOptions {
        IngestionOptions {
            strategy: self.extractor.into(),
            ..IngestionOptions::default()
        }
    }

    fn build_state(&self) -> anyhow::Result<AppState> {
        let store = DocumentStore::new();
        let completion = self.completion_options();
        let fallback_excerpt_chars = completion.fallback_excerpt_chars;

        let backend = OpenAiCompatibleBackend::new(completion)?;
        if !backend.is_configured() {
            warn!("no language-model credential configured; replies will be templated");
        }
        let lookup = WikipediaLookup::new(self.lookup_options())?;

        let chat: Coordinator = ChatCoordinator::new(
            Box::new(lookup) as Box<dyn WebLookup>,
            Box::new(backend) as Box<dyn CompletionBackend>,
            store.clone(),
            fallback_excerpt_chars,
        );
        let ingestor = DocumentIngestor::new(store, self.ingestion_options())?;

        Ok(AppState {
            chat: Arc::new(chat),
            ingestor: Arc::new(ingestor),
        })
    }
}

async fn read_pdf_upload(path: &Path) -> anyhow::Result<Upload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("path has no file name: {}", path.display()))?
        .to_string();

    Ok(Upload {
        filename,
        content_type: "application/pdf".to_string(),
        bytes,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let state = cli.build_state()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        "docchat boot"
    );

    match cli.command {
        Command::Serve {
            ref bind,
            max_upload_bytes,
        } => {
            let app = server::router(state, max_upload_bytes);
            server::serve(bind, app).await?;
        }
        Command::Ask {
            ref message,
            ref documents,
        } => {
            for path in documents {
                let upload = read_pdf_upload(path).await?;
                let receipt = state.ingestor.ingest(Some(upload))?;
                info!(filename = %receipt.filename, degraded = receipt.degraded, "document loaded");
            }

            let reply = state
                .chat
                .respond(&[ChatMessage::user(message.clone())])
                .await?;
            println!("{}", reply.message);
        }
        Command::Extract { ref file } => {
            let upload = read_pdf_upload(file).await?;
            let receipt = state.ingestor.ingest(Some(upload))?;
            if let Some(record) = state.ingestor.store().get(&receipt.filename) {
                println!(
                    "filename={} size={} checksum={} degraded={}",
                    record.filename, record.size_bytes, record.checksum, receipt.degraded
                );
                println!("{}", record.text);
            }
        }
    }

    Ok(())
}
