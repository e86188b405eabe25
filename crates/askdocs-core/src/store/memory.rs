//! In-memory [`Store`] implementation for tests and embedded use.
//!
//! Documents and chunks live in `Vec`s behind a single `std::sync::RwLock`,
//! so a save is validated and committed under one write guard. Vector
//! search is brute-force cosine distance over every stored chunk.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{RagError, Result};
use crate::models::{Document, DocumentChunk, RetrievedChunk};

use super::{rank_by_distance, validate_chunks, Store};

#[derive(Default)]
struct Inner {
    documents: Vec<Document>,
    /// Insertion order doubles as the similarity tie-break order.
    chunks: Vec<DocumentChunk>,
}

/// In-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_count(&self) -> usize {
        self.inner.read().map(|g| g.chunks.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> RagError {
    RagError::Persistence("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl Store for InMemoryStore {
    async fn save_document(&self, document: &Document, chunks: &[DocumentChunk]) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;

        if inner.documents.iter().any(|d| d.id == document.id) {
            return Err(RagError::Persistence(format!(
                "document {} already exists",
                document.id
            )));
        }
        validate_chunks(document, chunks)?;

        inner.documents.push(document.clone());
        inner.chunks.extend_from_slice(chunks);
        Ok(())
    }

    async fn similarity_search(&self, query: &[f32], limit: i64) -> Result<Vec<RetrievedChunk>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(rank_by_distance(query, inner.chunks.clone(), limit))
    }

    async fn get_chunks_by_document_id(&self, document_id: &str) -> Result<Vec<DocumentChunk>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut chunks: Vec<DocumentChunk> = inner
            .chunks
            .iter()
            .filter(|c| c.document_id == document_id)
            .cloned()
            .collect();
        chunks.sort_by_key(|c| c.chunk_index);
        Ok(chunks)
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut docs = inner.documents.clone();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn delete_document(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let before = inner.documents.len();
        inner.documents.retain(|d| d.id != id);
        if inner.documents.len() == before {
            return Ok(false);
        }
        inner.chunks.retain(|c| c.document_id != id);
        Ok(true)
    }
}
