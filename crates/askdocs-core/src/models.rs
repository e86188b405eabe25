//! Core data models that flow through ingestion and retrieval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// An embedding: an ordered sequence of 32-bit floats.
///
/// Normalized embedding models keep every component in `[-1.0, 1.0]`.
/// Vectors read back from storage may be shorter than the provider's
/// dimensionality after corruption repair (see [`crate::vector`]).
pub type Vector = Vec<f32>;

/// Metadata supplied by the caller when ingesting a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDocument {
    pub title: Option<String>,
    pub source: Option<String>,
    pub content_type: Option<String>,
}

/// A stored document. Its text lives in the chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: Option<String>,
    pub source: Option<String>,
    pub content_type: String,
    pub byte_size: i64,
    /// SHA-256 of the full extracted text.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Build a new document row for `text` with a fresh UUID.
    pub fn new(meta: NewDocument, text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        Self {
            id: Uuid::new_v4().to_string(),
            title: meta.title,
            source: meta.source,
            content_type: meta
                .content_type
                .unwrap_or_else(|| "text/plain".to_string()),
            byte_size: text.len() as i64,
            content_hash: format!("{:x}", hasher.finalize()),
            created_at: Utc::now(),
        }
    }
}

/// A contiguous slice of a document's text plus its embedding.
///
/// Chunks are created during ingestion, never mutated, and removed only
/// when their parent document is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    pub document_id: String,
    /// Zero-based position within the parent document.
    pub chunk_index: i64,
    pub content: String,
    pub byte_size: i64,
    pub content_type: String,
    #[serde(skip_serializing, default)]
    pub embedding: Vector,
}

impl DocumentChunk {
    pub fn new(document: &Document, chunk_index: i64, content: String, embedding: Vector) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            document_id: document.id.clone(),
            chunk_index,
            byte_size: content.len() as i64,
            content,
            content_type: document.content_type.clone(),
            embedding,
        }
    }
}

/// A similarity-search hit.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedChunk {
    #[serde(flatten)]
    pub chunk: DocumentChunk,
    /// Cosine distance to the query vector (`0.0` = identical direction).
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_defaults() {
        let doc = Document::new(NewDocument::default(), "hello");
        assert_eq!(doc.content_type, "text/plain");
        assert_eq!(doc.byte_size, 5);
        assert_eq!(
            doc.content_hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_chunk_inherits_document_fields() {
        let doc = Document::new(
            NewDocument {
                content_type: Some("text/markdown".into()),
                ..Default::default()
            },
            "body",
        );
        let chunk = DocumentChunk::new(&doc, 2, "héllo".into(), vec![0.1]);
        assert_eq!(chunk.document_id, doc.id);
        assert_eq!(chunk.content_type, "text/markdown");
        assert_eq!(chunk.byte_size, 6);
        assert_eq!(chunk.chunk_index, 2);
    }

    #[test]
    fn test_retrieved_chunk_serialises_flat_without_embedding() {
        let doc = Document::new(NewDocument::default(), "body");
        let hit = RetrievedChunk {
            chunk: DocumentChunk::new(&doc, 0, "body".into(), vec![0.5, 0.5]),
            distance: 0.25,
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["content"], "body");
        assert_eq!(json["distance"], 0.25);
        assert!(json.get("embedding").is_none());
    }
}
