use crate::error::IngestError;
use crate::models::{ExtractionStrategy, IngestionOptions};
use crate::text::{char_len, normalize_whitespace};
use lopdf::Document;
use regex::Regex;

pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError>;
}

#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    readable_run: Regex,
    prefix_bytes: usize,
    max_runs: usize,
}

impl HeuristicExtractor {
    pub fn new(options: &IngestionOptions) -> Result<Self, IngestError> {
        if options.min_run_chars == 0 {
            return Err(IngestError::InvalidArgument(
                "min_run_chars must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            readable_run: Regex::new(&options.readable_run_regex())?,
            prefix_bytes: options.prefix_bytes,
            max_runs: options.max_runs,
        })
    }
}

impl TextExtractor for HeuristicExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let prefix = &bytes[..bytes.len().min(self.prefix_bytes)];
        let decoded = String::from_utf8_lossy(prefix);

        Ok(self
            .readable_run
            .find_iter(&decoded)
            .take(self.max_runs)
            .map(|run| run.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let document =
            Document::load_mem(bytes).map_err(|error| IngestError::PdfParse(error.to_string()))?;

        let mut pages = Vec::new();
        for page_no in document.get_pages().into_keys() {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| IngestError::PdfParse(error.to_string()))?;

            if !text.trim().is_empty() {
                pages.push(text);
            }
        }

        if pages.is_empty() {
            return Err(IngestError::PdfParse(
                "pdf had no readable page text".to_string(),
            ));
        }

        Ok(pages.join("\n\n"))
    }
}

pub fn extractor_for(
    options: &IngestionOptions,
) -> Result<Box<dyn TextExtractor>, IngestError> {
    match options.strategy {
        ExtractionStrategy::Heuristic => Ok(Box::new(HeuristicExtractor::new(options)?)),
        ExtractionStrategy::Lopdf => Ok(Box::new(LopdfExtractor)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted(String),
    Limited,
    Failed(String),
}

pub fn run_extraction(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    min_text_chars: usize,
) -> ExtractionOutcome {
    match extractor.extract_text(bytes) {
        Ok(raw) => {
            let normalized = normalize_whitespace(&raw);
            if normalized.is_empty() || char_len(&normalized) < min_text_chars {
                ExtractionOutcome::Limited
            } else {
                ExtractionOutcome::Extracted(normalized)
            }
        }
        Err(error) => ExtractionOutcome::Failed(error.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::one_page_pdf;
    use super::*;

    const PAGE_TEXT: &str = "Hydraulic pumps must be inspected for pressure loss every six months.";

    fn heuristic() -> HeuristicExtractor {
        HeuristicExtractor::new(&IngestionOptions::default()).unwrap()
    }

    #[test]
    fn heuristic_keeps_only_long_readable_runs() {
        let mut bytes = b"%PDF-1.4\n\x00\x01obj<<".to_vec();
        bytes.extend_from_slice(b"This sentence is long enough to count as readable text.");
        bytes.extend_from_slice(&[0xff, 0xfe, 0x00]);
        bytes.extend_from_slice(b"short run");

        let text = heuristic().extract_text(&bytes).unwrap();

        assert!(text.contains("This sentence is long enough to count as readable text."));
        assert!(!text.contains("short run"));
    }

    #[test]
    fn heuristic_reads_only_the_configured_prefix() {
        let options = IngestionOptions {
            prefix_bytes: 30,
            ..IngestionOptions::default()
        };
        let extractor = HeuristicExtractor::new(&options).unwrap();
        let mut bytes = b"Leading readable text in prefix".to_vec();
        bytes.push(0);
        bytes.extend_from_slice(b"Trailing readable text past the prefix");

        let text = extractor.extract_text(&bytes).unwrap();

        assert!(!text.contains("Trailing"));
        assert!(text.starts_with("Leading readable text"));
    }

    #[test]
    fn heuristic_caps_run_count() {
        let options = IngestionOptions {
            max_runs: 2,
            ..IngestionOptions::default()
        };
        let extractor = HeuristicExtractor::new(&options).unwrap();
        let bytes = b"first readable run of text\x00second readable run of text\x00third readable run of text";

        let text = extractor.extract_text(bytes).unwrap();

        assert_eq!(text, "first readable run of text second readable run of text");
    }

    #[test]
    fn zero_run_length_is_rejected() {
        let options = IngestionOptions {
            min_run_chars: 0,
            ..IngestionOptions::default()
        };
        assert!(matches!(
            HeuristicExtractor::new(&options),
            Err(IngestError::InvalidArgument(_))
        ));
    }

    #[test]
    fn short_text_is_limited() {
        let outcome = run_extraction(&heuristic(), b"just twenty-one chars", 50);
        assert_eq!(outcome, ExtractionOutcome::Limited);
    }

    #[test]
    fn extracted_text_is_whitespace_normalized() {
        let bytes = b"Readable   text\n\nspanning several\tlines of the uploaded document body.";
        match run_extraction(&heuristic(), bytes, 50) {
            ExtractionOutcome::Extracted(text) => assert_eq!(
                text,
                "Readable text spanning several lines of the uploaded document body."
            ),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn lopdf_reads_page_text() {
        let bytes = one_page_pdf(Some(PAGE_TEXT));

        let text = LopdfExtractor.extract_text(&bytes).unwrap();

        assert!(text.contains(PAGE_TEXT), "extracted: {text:?}");
    }

    #[test]
    fn lopdf_strategy_is_selected_from_options() {
        let options = IngestionOptions {
            strategy: ExtractionStrategy::Lopdf,
            ..IngestionOptions::default()
        };
        let extractor = extractor_for(&options).unwrap();

        match run_extraction(extractor.as_ref(), &one_page_pdf(Some(PAGE_TEXT)), 50) {
            ExtractionOutcome::Extracted(text) => assert!(text.contains(PAGE_TEXT)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn lopdf_page_without_text_is_an_error() {
        let bytes = one_page_pdf(None);

        let result = LopdfExtractor.extract_text(&bytes);

        assert!(matches!(
            result,
            Err(IngestError::PdfParse(ref reason)) if reason.contains("no readable page text")
        ));
    }

    #[test]
    fn lopdf_failure_is_reported_not_raised() {
        let outcome = run_extraction(&LopdfExtractor, b"%PDF-1.4\n%broken", 50);
        assert!(matches!(outcome, ExtractionOutcome::Failed(_)));
    }
}
