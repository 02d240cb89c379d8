use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MarkovChain;

/// Granularity of the tokens a [`MarkovTextModel`] chains together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenLevel {
    /// Every `char`, whitespace included.
    Character,
    /// Runs of alphanumerics and apostrophes; any other non-space
    /// character stands alone.
    Word,
}

/// Text generator over a [`MarkovChain`] of string tokens.
///
/// # Examples
/// ```
/// use u_probspace::markov::{MarkovTextModel, TokenLevel};
/// use u_probspace::random::create_rng;
///
/// let mut model = MarkovTextModel::new(TokenLevel::Character);
/// model.train_from_text("ababa");
/// let text = model.generate_text(4, &mut create_rng(321), "a");
/// assert_eq!(text, "abab");
/// ```
#[derive(Debug, Clone)]
pub struct MarkovTextModel {
    level: TokenLevel,
    chain: MarkovChain<String>,
}

impl MarkovTextModel {
    pub fn new(level: TokenLevel) -> Self {
        Self {
            level,
            chain: MarkovChain::new(),
        }
    }

    pub fn level(&self) -> TokenLevel {
        self.level
    }

    pub fn chain(&self) -> &MarkovChain<String> {
        &self.chain
    }

    /// Tokenizes `text` and feeds the tokens to the chain as one sequence.
    pub fn train_from_text(&mut self, text: &str) {
        let tokens = self.tokenize(text);
        self.chain.train(&tokens);
    }

    /// Generates up to `num_tokens` tokens starting from `start` and joins
    /// them back into text.
    ///
    /// An empty or unknown `start` falls back to the first token the model
    /// ever saw. Returns an empty string for an untrained model or when
    /// `num_tokens == 0`.
    pub fn generate_text<R: Rng + ?Sized>(&self, num_tokens: usize, rng: &mut R, start: &str) -> String {
        if num_tokens == 0 {
            return String::new();
        }
        let Some(first) = self.chain.states().first() else {
            return String::new();
        };
        let start = if !start.is_empty() && self.chain.contains_state(&start.to_owned()) {
            start.to_owned()
        } else {
            debug!(start, fallback = %first, "start token not in model");
            first.clone()
        };
        let tokens = self.chain.generate(start, num_tokens, rng);
        self.detokenize(&tokens)
    }

    /// Splits text into tokens at this model's level.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self.level {
            TokenLevel::Character => text.chars().map(String::from).collect(),
            TokenLevel::Word => {
                let mut tokens = Vec::new();
                let mut word = String::new();
                for c in text.chars() {
                    if is_word_char(c) {
                        word.push(c);
                        continue;
                    }
                    if !word.is_empty() {
                        tokens.push(std::mem::take(&mut word));
                    }
                    if !c.is_whitespace() {
                        tokens.push(c.to_string());
                    }
                }
                if !word.is_empty() {
                    tokens.push(word);
                }
                tokens
            }
        }
    }

    /// Joins tokens back into text. Word tokens are separated by a single
    /// space; punctuation attaches to the preceding token.
    pub fn detokenize(&self, tokens: &[String]) -> String {
        match self.level {
            TokenLevel::Character => tokens.concat(),
            TokenLevel::Word => {
                let mut text = String::new();
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 && !is_punctuation(token) {
                        text.push(' ');
                    }
                    text.push_str(token);
                }
                text
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !is_word_char(c))
}
