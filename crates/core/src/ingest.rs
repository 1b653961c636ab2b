use crate::extractor::{extractor_for, run_extraction, ExtractionOutcome, TextExtractor};
use crate::models::{DocumentRecord, IngestionOptions, IngestionReceipt};
use crate::store::DocumentStore;
use crate::text::truncate_chars;
use crate::IngestError;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct DocumentIngestor {
    store: DocumentStore,
    extractor: Box<dyn TextExtractor>,
    options: IngestionOptions,
}

impl DocumentIngestor {
    pub fn new(store: DocumentStore, options: IngestionOptions) -> Result<Self, IngestError> {
        let extractor = extractor_for(&options)?;
        Ok(Self::with_extractor(store, extractor, options))
    }

    pub fn with_extractor(
        store: DocumentStore,
        extractor: Box<dyn TextExtractor>,
        options: IngestionOptions,
    ) -> Self {
        Self {
            store,
            extractor,
            options,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn ingest(&self, upload: Option<Upload>) -> Result<IngestionReceipt, IngestError> {
        let upload = upload.ok_or(IngestError::MissingFile)?;

        if upload.content_type != self.options.accepted_content_type {
            return Err(IngestError::UnsupportedMediaType {
                filename: upload.filename,
                content_type: upload.content_type,
            });
        }

        let outcome = run_extraction(
            self.extractor.as_ref(),
            &upload.bytes,
            self.options.min_text_chars,
        );
        let degraded = !matches!(outcome, ExtractionOutcome::Extracted(_));
        if let ExtractionOutcome::Failed(reason) = &outcome {
            warn!(filename = %upload.filename, %reason, "text extraction failed");
        }

        let text = document_text(&upload.filename, upload.bytes.len(), outcome, &self.options);
        let record = DocumentRecord {
            filename: upload.filename.clone(),
            text,
            size_bytes: upload.bytes.len(),
            checksum: digest_bytes(&upload.bytes),
            ingested_at: Utc::now(),
        };

        let replaced = self.store.insert(record).is_some();
        info!(
            filename = %upload.filename,
            size = upload.bytes.len(),
            replaced,
            degraded,
            "document stored"
        );

        Ok(IngestionReceipt {
            filename: upload.filename,
            size: upload.bytes.len(),
            replaced,
            degraded,
        })
    }
}

pub fn document_text(
    filename: &str,
    size_bytes: usize,
    outcome: ExtractionOutcome,
    options: &IngestionOptions,
) -> String {
    let size_kb = size_bytes as f64 / 1024.0;
    match outcome {
        ExtractionOutcome::Extracted(text) => format!(
            "Content extracted from \"{filename}\":\n\n{}\n\n[Content truncated for brevity...]",
            truncate_chars(&text, options.max_text_chars)
        ),
        ExtractionOutcome::Limited => format!(
            "PDF file \"{filename}\" uploaded. Size: {size_kb:.2} KB.\n\n\
             Note: This PDF may contain images or complex formatting. \
             For production use, consider using a dedicated PDF parsing library like pdf-parse or pdfjs-dist.\n\n\
             The system acknowledges this PDF and can reference it in conversations. \
             You can ask questions about general PDF topics."
        ),
        ExtractionOutcome::Failed(_) => format!(
            "PDF file \"{filename}\" uploaded successfully. Size: {size_kb:.2} KB.\n\n\
             Note: Text extraction is limited in this demo. \
             The AI can still reference this PDF in conversations."
        ),
    }
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
