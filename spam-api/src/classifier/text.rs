//! Text normalization and bag-of-words vectorization

use regex::Regex;

use super::artifact::ModelArtifact;
use super::types::FeatureVector;
use crate::error::{ClassifierError, Result};

/// Tokens of this many characters or fewer are dropped
pub const MIN_TOKEN_CHARS: usize = 3;

/// Letters, numbers, underscore and separators survive; everything else
/// (punctuation, symbols, combining marks) is removed. U+001C..U+001F are
/// information separators and split words like other whitespace.
const NON_WORD_PATTERN: &str = r"[^\p{L}\p{N}_\s\x1c-\x1f]";

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Turns raw message text into cleaned tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    non_word: Regex,
}

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Result<Self> {
        let non_word = Regex::new(NON_WORD_PATTERN)
            .map_err(|e| ClassifierError::Internal(format!("tokenizer pattern: {}", e)))?;
        Ok(Self { non_word })
    }

    /// Lower-case, strip punctuation, split on whitespace, then drop stop
    /// words and short tokens. Order and duplicates are kept.
    pub fn normalize(&self, text: &str, artifact: &ModelArtifact) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.non_word.replace_all(&lowered, "");

        stripped
            .split(is_separator)
            .filter(|w| !w.is_empty())
            .filter(|w| !artifact.is_stop_word(w) && w.chars().count() > MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }
}

/// Count vocabulary hits; out-of-vocabulary tokens are ignored
pub fn vectorize<S: AsRef<str>>(tokens: &[S], artifact: &ModelArtifact) -> FeatureVector {
    let mut vector = FeatureVector::zeros(artifact.vocabulary().len());
    for token in tokens {
        if let Some(idx) = artifact.index_of(token.as_ref()) {
            vector.increment(idx);
        }
    }
    vector
}
