//! Storage abstraction for askdocs.
//!
//! The [`Store`] trait covers everything the RAG pipeline needs from the
//! document store: atomic document + chunk persistence and nearest-neighbour
//! retrieval. Backends (SQLite in the app crate, [`memory::InMemoryStore`]
//! here) must be `Send + Sync`.
//!
//! # Operations
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`save_document`](Store::save_document) | Persist a document and all its chunks atomically |
//! | [`similarity_search`](Store::similarity_search) | Nearest chunks to a query vector |
//! | [`get_chunks_by_document_id`](Store::get_chunks_by_document_id) | A document's chunks in index order |
//! | [`get_document`](Store::get_document) | Document metadata by id |
//! | [`list_documents`](Store::list_documents) | All documents, newest first |
//! | [`delete_document`](Store::delete_document) | Delete a document and, by cascade, its chunks |

pub mod memory;

use async_trait::async_trait;

use crate::error::{RagError, Result};
use crate::models::{Document, DocumentChunk, RetrievedChunk};

#[async_trait]
pub trait Store: Send + Sync {
    /// Persist `document` and `chunks` in one transaction.
    ///
    /// Chunks are checked with [`validate_chunks`] inside the transaction;
    /// on any failure nothing is written, including the document row.
    async fn save_document(&self, document: &Document, chunks: &[DocumentChunk]) -> Result<()>;

    /// Return at most `limit` chunks ordered by ascending cosine distance to
    /// `query`. Equal distances keep insertion order. `limit <= 0` yields an
    /// empty result.
    async fn similarity_search(&self, query: &[f32], limit: i64) -> Result<Vec<RetrievedChunk>>;

    async fn get_chunks_by_document_id(&self, document_id: &str) -> Result<Vec<DocumentChunk>>;

    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Returns `false` if no such document existed.
    async fn delete_document(&self, id: &str) -> Result<bool>;
}

/// Check the invariants a chunk set must satisfy before it is persisted:
/// every chunk belongs to `document`, indices run `0..n` in order, and
/// no chunk has empty content or an empty embedding.
pub fn validate_chunks(document: &Document, chunks: &[DocumentChunk]) -> Result<()> {
    if chunks.is_empty() {
        return Err(RagError::Persistence(format!(
            "document {} has no chunks",
            document.id
        )));
    }

    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.document_id != document.id {
            return Err(RagError::Persistence(format!(
                "chunk {} belongs to document {}, expected {}",
                chunk.id, chunk.document_id, document.id
            )));
        }
        if chunk.chunk_index != i as i64 {
            return Err(RagError::Persistence(format!(
                "chunk index {} out of sequence (expected {})",
                chunk.chunk_index, i
            )));
        }
        if chunk.content.trim().is_empty() {
            return Err(RagError::Persistence(format!(
                "chunk {} has empty content",
                chunk.chunk_index
            )));
        }
        if chunk.embedding.is_empty() {
            return Err(RagError::Persistence(format!(
                "chunk {} has no embedding",
                chunk.chunk_index
            )));
        }
    }

    Ok(())
}

/// Rank `candidates` (already in insertion order) by cosine distance to
/// `query` and keep the best `limit`.
///
/// `sort_by` is stable, so ties keep insertion order.
pub fn rank_by_distance(
    query: &[f32],
    candidates: Vec<DocumentChunk>,
    limit: i64,
) -> Vec<RetrievedChunk> {
    if limit <= 0 {
        return Vec::new();
    }

    let mut hits: Vec<RetrievedChunk> = candidates
        .into_iter()
        .map(|chunk| RetrievedChunk {
            distance: crate::vector::cosine_distance(query, &chunk.embedding),
            chunk,
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(limit as usize);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewDocument;

    fn doc() -> Document {
        Document::new(NewDocument::default(), "text")
    }

    #[test]
    fn test_validate_chunks_ok() {
        let d = doc();
        let chunks = vec![
            DocumentChunk::new(&d, 0, "a".into(), vec![0.1]),
            DocumentChunk::new(&d, 1, "b".into(), vec![0.2]),
        ];
        assert!(validate_chunks(&d, &chunks).is_ok());
    }

    #[test]
    fn test_validate_chunks_rejects_gaps_and_empties() {
        let d = doc();
        let gap = vec![DocumentChunk::new(&d, 1, "a".into(), vec![0.1])];
        assert!(matches!(
            validate_chunks(&d, &gap),
            Err(RagError::Persistence(_))
        ));

        let no_vec = vec![DocumentChunk::new(&d, 0, "a".into(), vec![])];
        assert!(validate_chunks(&d, &no_vec).is_err());

        let other = Document::new(NewDocument::default(), "other");
        let foreign = vec![DocumentChunk::new(&other, 0, "a".into(), vec![0.1])];
        assert!(validate_chunks(&d, &foreign).is_err());

        assert!(validate_chunks(&d, &[]).is_err());
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let d = doc();
        let chunks: Vec<DocumentChunk> = (0..4)
            .map(|i| DocumentChunk::new(&d, i, format!("c{}", i), vec![1.0, 0.0]))
            .collect();
        let ids: Vec<String> = chunks.iter().map(|c| c.id.clone()).collect();

        let hits = rank_by_distance(&[1.0, 0.0], chunks, 3);
        let hit_ids: Vec<String> = hits.iter().map(|h| h.chunk.id.clone()).collect();
        assert_eq!(hit_ids, ids[..3].to_vec());
    }

    #[test]
    fn test_rank_non_positive_limit() {
        let d = doc();
        let chunks = vec![DocumentChunk::new(&d, 0, "a".into(), vec![1.0])];
        assert!(rank_by_distance(&[1.0], chunks.clone(), 0).is_empty());
        assert!(rank_by_distance(&[1.0], chunks, -3).is_empty());
    }
}
