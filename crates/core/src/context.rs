use crate::store::DocumentStore;

pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

const SYSTEM_GUIDELINES: &str = "You are a helpful AI assistant with access to internet search results and PDF document analysis.

When answering questions:
1. If internet search results are provided, use them to give accurate, current information
2. If PDF content is available, reference it when relevant
3. Be concise but informative
4. Cite sources when using search results
";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSections {
    pub search: Option<String>,
    pub documents: Option<String>,
}

impl ContextSections {
    pub fn gather(search: Option<&str>, store: &DocumentStore) -> Self {
        Self {
            search: search.filter(|text| !text.is_empty()).map(str::to_string),
            documents: document_section(store),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.documents.is_none()
    }
}

pub fn document_section(store: &DocumentStore) -> Option<String> {
    let texts = store.texts();
    if texts.is_empty() {
        return None;
    }

    Some(format!(
        "\n\nPDF Content Available:\n{}",
        texts.join(DOCUMENT_SEPARATOR)
    ))
}

pub fn build_system_prompt(sections: &ContextSections) -> String {
    let search = sections
        .search
        .as_deref()
        .map(|text| format!("\n\nInternet Search Results:\n{text}"))
        .unwrap_or_default();
    let documents = sections
        .documents
        .as_deref()
        .map(|text| format!("\n\n{text}"))
        .unwrap_or_default();

    format!("{SYSTEM_GUIDELINES}\n{search}\n{documents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentRecord;
    use chrono::Utc;

    fn store_with(texts: &[(&str, &str)]) -> DocumentStore {
        let store = DocumentStore::new();
        for (filename, text) in texts {
            store.insert(DocumentRecord {
                filename: filename.to_string(),
                text: text.to_string(),
                size_bytes: text.len(),
                checksum: String::new(),
                ingested_at: Utc::now(),
            });
        }
        store
    }

    #[test]
    fn empty_inputs_produce_no_sections() {
        let sections = ContextSections::gather(None, &DocumentStore::new());
        assert!(sections.is_empty());

        let prompt = build_system_prompt(&sections);
        assert!(prompt.starts_with("You are a helpful AI assistant"));
        assert!(!prompt.contains("Internet Search Results"));
        assert!(!prompt.contains("PDF Content Available"));
    }

    #[test]
    fn empty_search_text_counts_as_absent() {
        let sections = ContextSections::gather(Some(""), &DocumentStore::new());
        assert!(sections.search.is_none());
    }

    #[test]
    fn documents_are_listed_once_with_separator() {
        let store = store_with(&[("a.pdf", "alpha text"), ("b.pdf", "beta text")]);

        let prompt = build_system_prompt(&ContextSections::gather(None, &store));

        assert_eq!(prompt.matches("PDF Content Available:").count(), 1);
        assert!(prompt.contains("alpha text\n\n---\n\nbeta text"));
        assert!(!prompt.contains("Internet Search Results"));
    }

    #[test]
    fn search_section_precedes_documents() {
        let store = store_with(&[("a.pdf", "alpha text")]);

        let prompt = build_system_prompt(&ContextSections::gather(Some("1. Gravity"), &store));

        let search_at = prompt.find("Internet Search Results:\n1. Gravity").unwrap();
        let documents_at = prompt.find("PDF Content Available:").unwrap();
        assert!(search_at < documents_at);
        assert!(prompt.contains("4. Cite sources when using search results"));
    }
}
