use std::sync::RwLock;

use vantage_core::errors::{RetrievalError, VantageResult};
use vantage_core::models::Document;
use vantage_core::traits::IDocumentStore;

/// Documents held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    pub fn insert(&self, document: Document) -> VantageResult<()> {
        self.documents
            .write()
            .map_err(|e| RetrievalError::DocumentStoreFailed {
                reason: e.to_string(),
            })?
            .push(document);
        Ok(())
    }
}

impl IDocumentStore for InMemoryDocumentStore {
    fn documents(&self) -> VantageResult<Vec<Document>> {
        let docs = self
            .documents
            .read()
            .map_err(|e| RetrievalError::DocumentStoreFailed {
                reason: e.to_string(),
            })?;
        Ok(docs.clone())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_list() {
        let store = InMemoryDocumentStore::new(vec![Document::new("a", "A", "alpha")]);
        store.insert(Document::new("b", "B", "beta")).unwrap();
        let ids: Vec<_> = store
            .documents()
            .unwrap()
            .into_iter()
            .filter_map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
