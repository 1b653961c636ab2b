use crate::models::DocumentRecord;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloning shares the underlying records. Listing order is first-upload order;
/// re-uploading a filename replaces its record in place.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    records: Arc<RwLock<Vec<DocumentRecord>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: DocumentRecord) -> Option<DocumentRecord> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records
            .iter_mut()
            .find(|existing| existing.filename == record.filename)
        {
            Some(existing) => Some(std::mem::replace(existing, record)),
            None => {
                records.push(record);
                None
            }
        }
    }

    pub fn get(&self, filename: &str) -> Option<DocumentRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|record| record.filename == filename)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn texts(&self) -> Vec<String> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|record| record.text.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentStore;
    use crate::models::DocumentRecord;
    use chrono::Utc;

    fn record(filename: &str, text: &str) -> DocumentRecord {
        DocumentRecord {
            filename: filename.to_string(),
            text: text.to_string(),
            size_bytes: text.len(),
            checksum: String::new(),
            ingested_at: Utc::now(),
        }
    }

    #[test]
    fn store_starts_empty() {
        let store = DocumentStore::new();
        assert!(store.is_empty());
        assert!(store.texts().is_empty());
        assert!(store.get("a.pdf").is_none());
    }

    #[test]
    fn same_filename_overwrites_in_place() {
        let store = DocumentStore::new();
        assert!(store.insert(record("a.pdf", "first")).is_none());
        store.insert(record("b.pdf", "other"));

        let replaced = store.insert(record("a.pdf", "second"));

        assert_eq!(replaced.map(|previous| previous.text), Some("first".to_string()));
        assert_eq!(store.len(), 2);
        assert_eq!(store.texts(), vec!["second".to_string(), "other".to_string()]);
    }

    #[test]
    fn clones_share_records() {
        let store = DocumentStore::new();
        let handle = store.clone();
        handle.insert(record("shared.pdf", "text"));
        assert_eq!(store.get("shared.pdf").map(|found| found.text), Some("text".to_string()));
    }

    #[test]
    fn concurrent_uploads_of_one_filename_keep_a_single_record() {
        let store = DocumentStore::new();
        let workers = (0..8)
            .map(|index| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.insert(record("race.pdf", &format!("upload {index}")));
                })
            })
            .collect::<Vec<_>>();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(store.len(), 1);
        let text = store.get("race.pdf").map(|found| found.text).unwrap_or_default();
        assert!(text.starts_with("upload "));
    }
}
