//! DocumentStore - session corpus and search entry point
//!
//! Owns the in-memory corpus of processed document pairs for one viewer
//! session. Search runs over a snapshot: the Arc list is cloned under the
//! read lock and scanned lock-free, so a concurrent replace never
//! interleaves partially-updated text into a single scan.
//!
//! Async Cancellation Architecture:
//! A superseding query typically drops the previous search future. We
//! intercept this via a DropGuard that triggers a CancellationToken checked
//! between documents, so the blocking scan can abort mid-flight.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::interface::{
    DocumentMetadata, DocumentStoreApi, SearchResult, SearchScope, ViewerError,
};
use crate::models::DocumentPair;
use crate::search;

/// Global fallback Tokio runtime for when async functions are called outside
/// any runtime context. Shared across all DocumentStore instances and never
/// dropped.
static FALLBACK_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create fallback tokio runtime")
});

/// RAII guard that cancels a token when dropped. Dropping the search future
/// (a newer query superseded it) drops this guard, which cancels the scan.
struct DropGuard {
    token: CancellationToken,
}

impl DropGuard {
    fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Default)]
struct CorpusInner {
    documents: Vec<Arc<DocumentPair>>,
    positions: HashMap<String, usize>,
}

/// Thread-safe session corpus with snapshot-stable search.
///
/// Concurrency Model:
/// - Corpus mutations take the write lock briefly; reads clone Arcs
/// - Search is async with cancellation support via CancellationToken
/// - The blocking scan runs on tokio::spawn_blocking threads
/// - Uses the global FALLBACK_RUNTIME when called outside any runtime
pub struct DocumentStore {
    corpus: RwLock<CorpusInner>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            corpus: RwLock::new(CorpusInner::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.corpus.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.read().documents.is_empty()
    }

    /// Get a tokio runtime handle - the current runtime if available,
    /// otherwise the global fallback
    fn runtime_handle(&self) -> tokio::runtime::Handle {
        tokio::runtime::Handle::try_current()
            .unwrap_or_else(|_| FALLBACK_RUNTIME.handle().clone())
    }

    /// Clone the Arc list under the read lock; the scan itself runs
    /// lock-free on the snapshot.
    fn snapshot(&self) -> Vec<Arc<DocumentPair>> {
        self.corpus.read().documents.clone()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DocumentStoreApi for DocumentStore {
    async fn search(
        &self,
        query: String,
        scope: SearchScope,
    ) -> Result<Vec<SearchResult>, ViewerError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let token = CancellationToken::new();
        let _guard = DropGuard::new(token.clone());
        let documents = self.snapshot();
        let handle = self.runtime_handle();

        tracing::debug!(query = %query, corpus = documents.len(), "corpus search started");

        let results = handle
            .spawn_blocking(move || {
                search::search_corpus_interruptible(&documents, &query, scope, &token)
            })
            .await
            .map_err(|_| ViewerError::Cancelled)??;

        Ok(results)
    }

    fn document(&self, id: &str) -> Option<Arc<DocumentPair>> {
        let corpus = self.corpus.read();
        let pos = *corpus.positions.get(id)?;
        corpus.documents.get(pos).cloned()
    }

    fn list_documents(&self) -> Vec<DocumentMetadata> {
        self.corpus
            .read()
            .documents
            .iter()
            .map(|doc| doc.to_metadata())
            .collect()
    }

    fn add_document(&self, document: DocumentPair) {
        let mut corpus = self.corpus.write();
        let document = Arc::new(document);
        match corpus.positions.get(&document.id).copied() {
            Some(pos) => {
                // A re-translation replaces the whole record in place,
                // keeping its corpus position.
                tracing::debug!(id = %document.id, "document replaced");
                corpus.documents[pos] = document;
            }
            None => {
                tracing::debug!(id = %document.id, "document added");
                let pos = corpus.documents.len();
                corpus.positions.insert(document.id.clone(), pos);
                corpus.documents.push(document);
            }
        }
    }

    fn remove_document(&self, id: &str) -> Result<(), ViewerError> {
        let mut corpus = self.corpus.write();
        let pos = corpus
            .positions
            .remove(id)
            .ok_or_else(|| ViewerError::DocumentNotFound(id.to_string()))?;
        corpus.documents.remove(pos);

        // Re-point positions past the removed slot.
        let CorpusInner {
            documents,
            positions,
        } = &mut *corpus;
        for (i, doc) in documents.iter().enumerate().skip(pos) {
            positions.insert(doc.id.clone(), i);
        }
        Ok(())
    }

    fn clear(&self) {
        let mut corpus = self.corpus.write();
        corpus.documents.clear();
        corpus.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, original: &str, translated: &str) -> DocumentPair {
        DocumentPair::new(
            id.into(),
            format!("{id}.pdf"),
            original.into(),
            translated.into(),
            "fr".into(),
        )
    }

    #[test]
    fn test_add_and_fetch() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "bonjour", "hello"));
        assert_eq!(store.len(), 1);
        let fetched = store.document("a").expect("document present");
        assert_eq!(fetched.original_text(), "bonjour");
        assert!(store.document("missing").is_none());
    }

    #[test]
    fn test_replace_keeps_position() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "v1", "v1"));
        store.add_document(doc("b", "other", "other"));
        store.add_document(doc("a", "v2", "v2"));

        assert_eq!(store.len(), 2);
        let ids: Vec<String> = store.list_documents().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.document("a").expect("present").original_text(), "v2");
    }

    #[test]
    fn test_remove_reindexes_positions() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "x", "x"));
        store.add_document(doc("b", "y", "y"));
        store.add_document(doc("c", "z", "z"));

        store.remove_document("b").expect("present");
        assert_eq!(store.len(), 2);
        assert_eq!(store.document("c").expect("present").id, "c");

        let err = store.remove_document("b").expect_err("already removed");
        assert!(matches!(err, ViewerError::DocumentNotFound(_)));
    }

    #[test]
    fn test_clear() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "x", "x"));
        store.clear();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_is_empty() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "anything", "anything"));
        let results = store.search(String::new(), SearchScope::Both).await.expect("search");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_finds_documents() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "le chat noir", "the black cat"));
        store.add_document(doc("b", "rien ici", "nothing here"));

        let results = store.search("cat".into(), SearchScope::Both).await.expect("search");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document_id, "a");
        assert_eq!(results[0].original_matches.len(), 1);
        assert_eq!(results[0].translated_matches.len(), 1);
    }

    #[tokio::test]
    async fn test_search_sees_replacement() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "old wording", "old wording"));
        store.add_document(doc("a", "new wording", "new wording"));

        let results = store.search("old".into(), SearchScope::Both).await.expect("search");
        assert!(results.is_empty());
        let results = store.search("new".into(), SearchScope::Both).await.expect("search");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_outside_runtime_uses_fallback() {
        let store = DocumentStore::new();
        store.add_document(doc("a", "terme", "term"));
        let handle = store.runtime_handle();
        let results = handle
            .block_on(store.search("term".into(), SearchScope::Both))
            .expect("search");
        assert_eq!(results.len(), 1);
    }
}
