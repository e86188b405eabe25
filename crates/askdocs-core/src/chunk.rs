//! Word-boundary text chunker.
//!
//! Splits extracted document text into pieces of at most `chunk_size`
//! characters without ever cutting a word in half.
//!
//! # Algorithm
//!
//! 1. Split the text on whitespace.
//! 2. Greedily append words (joined by a single space) to the current
//!    buffer while the result stays within `chunk_size` characters.
//! 3. When the next word would overflow, flush the buffer and start a new
//!    chunk with that word.
//! 4. A word longer than `chunk_size` on its own becomes a chunk by itself.
//!
//! Sizes are measured in characters, not bytes, so multi-byte text gets the
//! same budget as ASCII.
//!
//! # Example
//!
//! ```rust
//! use askdocs_core::chunk::split_words;
//!
//! let chunks = split_words("alpha beta gamma delta", 11);
//! assert_eq!(chunks, vec!["alpha beta", "gamma delta"]);
//! ```

/// Split `text` into word-aligned chunks of at most `chunk_size` characters.
///
/// Returns an empty vector for blank text or a zero `chunk_size`.
pub fn split_words(text: &str, chunk_size: usize) -> Vec<String> {
    if chunk_size == 0 {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        let would_be = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };

        if would_be > chunk_size && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
