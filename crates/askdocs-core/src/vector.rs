//! Vector wire codec and similarity helpers.
//!
//! Chunk embeddings are stored as bracketed, comma-separated decimal text:
//!
//! ```text
//! [0.12,-0.5,0.33]
//! ```
//!
//! An empty vector encodes to `None`, stored as SQL `NULL`.
//!
//! # Corruption repair
//!
//! Stored vectors occasionally come back far longer than the model's
//! dimensionality because unrelated data (timestamps, ids) was appended to
//! the column. When a decoded vector has more than `2 × expected_dims`
//! elements, [`decode_with_dims`] switches to [`repair`]:
//!
//! 1. Walk the elements in order.
//! 2. Keep an element unchanged if it parses and lies in `[-1.0, 1.0]`.
//! 3. Otherwise pull the longest leading signed decimal out of its text
//!    and keep that if it lies in `[-1.0, 1.0]`.
//! 4. Stop after `expected_dims` kept values or at the end of the input.
//!
//! Elements that cannot be salvaged are dropped, so a repaired vector may be
//! shorter than `expected_dims`. This is best-effort salvage, not a
//! correctness guarantee: callers must cope with short vectors.
//!
//! # Example
//!
//! ```rust
//! use askdocs_core::vector::{decode, encode};
//!
//! let wire = encode(&[0.25, -0.5]).unwrap();
//! assert_eq!(wire, "[0.25,-0.5]");
//! assert_eq!(decode(&wire).unwrap(), vec![0.25, -0.5]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RagError, Result};
use crate::models::Vector;

static LEADING_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)").expect("valid decimal pattern"));

/// Encode a vector into its wire form. Empty vectors encode to `None`.
pub fn encode(vec: &[f32]) -> Option<String> {
    if vec.is_empty() {
        return None;
    }
    let body = vec
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("[{}]", body))
}

/// Decode a wire string strictly: every element must parse.
pub fn decode(raw: &str) -> Result<Vector> {
    let tokens = split_tokens(raw)?;
    tokens
        .iter()
        .map(|t| {
            t.parse::<f32>()
                .map_err(|_| RagError::CorruptedData(format!("invalid vector element '{}'", t)))
        })
        .collect()
}

/// Decode a wire string, repairing it when it is implausibly long for a
/// provider whose vectors have `expected_dims` components.
pub fn decode_with_dims(raw: &str, expected_dims: usize) -> Result<Vector> {
    let tokens = split_tokens(raw)?;
    if expected_dims > 0 && tokens.len() > expected_dims * 2 {
        let repaired = repair(&tokens, expected_dims);
        tracing::warn!(
            original_len = tokens.len(),
            repaired_len = repaired.len(),
            expected_dims,
            "repaired corrupted vector"
        );
        if repaired.is_empty() {
            return Err(RagError::CorruptedData(format!(
                "vector of {} elements could not be repaired",
                tokens.len()
            )));
        }
        return Ok(repaired);
    }
    decode(raw)
}

/// Salvage up to `expected_dims` in-range values from textual elements.
pub fn repair<S: AsRef<str>>(tokens: &[S], expected_dims: usize) -> Vector {
    let mut cleaned = Vec::with_capacity(expected_dims.min(tokens.len()));

    for token in tokens {
        if cleaned.len() >= expected_dims {
            break;
        }
        let token = token.as_ref().trim();

        if let Ok(v) = token.parse::<f32>() {
            if in_range(v) {
                cleaned.push(v);
                continue;
            }
        }

        if let Some(m) = LEADING_DECIMAL.find(token) {
            if let Ok(v) = m.as_str().parse::<f32>() {
                if in_range(v) {
                    cleaned.push(v);
                }
            }
        }
    }

    cleaned
}

/// [`repair`] applied to in-memory values via their textual form.
pub fn repair_values(values: &[f32], expected_dims: usize) -> Vector {
    let tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    repair(&tokens, expected_dims)
}

fn in_range(v: f32) -> bool {
    v.is_finite() && (-1.0..=1.0).contains(&v)
}

fn split_tokens(raw: &str) -> Result<Vec<&str>> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| {
            RagError::CorruptedData("vector is not enclosed in brackets".to_string())
        })?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(str::trim).collect())
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns `0.0` for empty vectors or vectors of different lengths, so a
/// short repaired vector ranks last instead of failing the search.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Cosine distance: `1 - cosine_similarity`, in `[0.0, 2.0]`.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_valid_range() {
        let v = vec![0.12f32, -0.5, 0.33, 1.0, -1.0, 0.0, 1e-7, -0.987_654_3];
        let wire = encode(&v).unwrap();
        assert_eq!(decode(&wire).unwrap(), v);
    }

    #[test]
    fn test_encode_format() {
        assert_eq!(encode(&[0.12, -0.5, 0.33]).unwrap(), "[0.12,-0.5,0.33]");
    }

    #[test]
    fn test_empty_vector_encodes_to_none() {
        assert_eq!(encode(&[]), None);
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_requires_brackets() {
        assert!(matches!(decode("0.1,0.2"), Err(RagError::CorruptedData(_))));
        assert!(matches!(decode("[0.1,0.2"), Err(RagError::CorruptedData(_))));
        assert!(matches!(decode(""), Err(RagError::CorruptedData(_))));
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(decode(" [0.5, -0.25 ] ").unwrap(), vec![0.5, -0.25]);
    }

    #[test]
    fn test_decode_rejects_garbage_element() {
        assert!(matches!(
            decode("[0.1,abc,0.2]"),
            Err(RagError::CorruptedData(_))
        ));
    }

    #[test]
    fn test_repair_keeps_valid_prefix_of_corrupted_vector() {
        // 3500 declared values: 0..=1000 valid, the rest out-of-range sentinels.
        let values: Vec<f32> = (0..3500)
            .map(|i| {
                if i <= 1000 {
                    (i as f32 / 1000.0) - 0.5
                } else {
                    1_700_000_000.0 + i as f32
                }
            })
            .collect();
        let wire = encode(&values).unwrap();

        let repaired = decode_with_dims(&wire, 1536).unwrap();
        assert_eq!(repaired.len(), 1001);
        assert_eq!(&repaired[..], &values[..=1000]);
    }

    #[test]
    fn test_repair_extracts_leading_decimal() {
        let tokens = ["0.25", "-0.5garbage", "12.5", "+0.75x", "nope", ".5"];
        let repaired = repair(&tokens, 10);
        assert_eq!(repaired, vec![0.25, -0.5, 0.75, 0.5]);
    }

    #[test]
    fn test_repair_stops_at_expected_dims() {
        let tokens = ["0.1", "0.2", "0.3", "0.4"];
        assert_eq!(repair(&tokens, 2), vec![0.1, 0.2]);
    }

    #[test]
    fn test_repair_values_drops_out_of_range() {
        let repaired = repair_values(&[0.5, 3.0, -0.25, f32::NAN], 8);
        assert_eq!(repaired, vec![0.5, -0.25]);
    }

    #[test]
    fn test_decode_with_dims_below_threshold_is_strict() {
        // 5 elements with expected 3 is under 2×, so no repair happens.
        let v = decode_with_dims("[0.1,0.2,5.0,0.4,0.5]", 3).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v[2], 5.0);
    }

    #[test]
    fn test_decode_with_dims_unrepairable() {
        let wire = format!("[{}]", vec!["9999"; 10].join(","));
        assert!(matches!(
            decode_with_dims(&wire, 2),
            Err(RagError::CorruptedData(_))
        ));
    }

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
        assert!(cosine_distance(&v, &v).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_different_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_distance(&[1.0, 2.0], &[1.0]), 1.0);
    }
}
