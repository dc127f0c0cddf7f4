//! Recursive character splitter.
//!
//! Splits on the coarsest separator present (paragraph, line, word) and only
//! falls back to a hard character cut for runs with no separator at all.
//! Pieces are merged greedily up to `chunk_size` characters, and each new
//! chunk starts with up to `chunk_overlap` characters carried over from the
//! tail of the previous one.
//!
//! Lengths are counted in `char`s, never bytes.

use std::collections::VecDeque;

use crate::errors::AppError;

const SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, AppError> {
        if chunk_size == 0 {
            return Err(AppError::Validation(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::Validation(format!(
                "chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits `text` into ordered chunks of at most `chunk_size` characters.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let position = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).copied().unwrap_or("");
        let finer = separators.get(position + 1..).unwrap_or(&[]);

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) <= self.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge(&fitting));
                fitting.clear();
            }

            // The carried separator alone can push a word of exactly `chunk_size` over.
            let body = piece.strip_prefix(separator).unwrap_or(piece.as_str());
            if char_len(body) <= self.chunk_size {
                let trimmed = body.trim();
                if !trimmed.is_empty() {
                    chunks.push(trimmed.to_string());
                }
            } else if finer.is_empty() {
                chunks.push(body.to_string());
            } else {
                chunks.extend(self.split_with(body, finer));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting));
        }

        chunks
    }

    fn merge(&self, pieces: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !window.is_empty() {
                push_chunk(&mut chunks, &window);

                // Keep at most `chunk_overlap` chars of tail, and make room for `piece`.
                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    match window.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }

            window.push_back((piece.as_str(), len));
            total += len;
        }

        push_chunk(&mut chunks, &window);
        chunks
    }
}

fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<(&str, usize)>) {
    let joined: String = window.iter().map(|(piece, _)| *piece).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Splits on `separator`, attaching it to the start of the following piece.
/// The empty separator splits into single characters.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut pieces = Vec::new();
    for (i, part) in text.split(separator).enumerate() {
        let piece = if i == 0 {
            part.to_string()
        } else {
            format!("{separator}{part}")
        };
        if !piece.is_empty() {
            pieces.push(piece);
        }
    }
    pieces
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
