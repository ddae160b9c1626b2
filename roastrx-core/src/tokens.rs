//! Token counting and cost estimation.
//!
//! None of this is a real tokenizer. The BPE variant fakes subword
//! splitting with fixed-size chunks so prompt sizes and costs can be
//! compared between strategies without shipping a vocabulary.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b|[^\w\s]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    Whitespace,
    Word,
    BpeApprox,
    Character,
}

/// Approximate USD cost per 1K input tokens, 2024 public pricing.
const MODEL_COSTS: &[(&str, f64)] = &[
    ("gpt-3.5-turbo", 0.0015),
    ("gpt-4", 0.03),
    ("claude-3-sonnet", 0.003),
    ("gemini-1.5-flash", 0.00025),
];

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

fn cost_per_1k(model: &str) -> f64 {
    MODEL_COSTS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, cost)| *cost)
        .unwrap_or(0.00025)
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenAnalysis {
    pub token_count: usize,
    pub tokens: Vec<String>,
    pub tokenizer: TokenizerKind,
    /// Characters per token; higher means denser text.
    pub efficiency: f64,
    pub cost_estimate: f64,
}

fn word_split(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn bpe_approx_split(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in word_split(text) {
        if word.chars().count() <= 6 {
            tokens.push(word);
        } else {
            // fixed 4-char chunks stand in for learned merges
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(4) {
                tokens.push(chunk.iter().collect());
            }
        }
    }
    tokens
}

/// Tokenizes with the requested scheme and attaches the derived metrics.
/// Cost is estimated against the default model's input pricing.
pub fn tokenize(text: &str, tokenizer: TokenizerKind) -> TokenAnalysis {
    tokenize_for_model(text, tokenizer, DEFAULT_MODEL)
}

pub fn tokenize_for_model(text: &str, tokenizer: TokenizerKind, model: &str) -> TokenAnalysis {
    let tokens = match tokenizer {
        TokenizerKind::Whitespace => text.split_whitespace().map(str::to_string).collect(),
        TokenizerKind::Word => word_split(text),
        TokenizerKind::BpeApprox => bpe_approx_split(text),
        TokenizerKind::Character => text.chars().map(|c| c.to_string()).collect(),
    };
    let token_count = tokens.len();
    let efficiency = if token_count == 0 {
        0.0
    } else {
        text.chars().count() as f64 / token_count as f64
    };

    TokenAnalysis {
        token_count,
        tokens,
        tokenizer,
        efficiency,
        cost_estimate: token_count as f64 / 1000.0 * cost_per_1k(model),
    }
}

/// Convenience for prompt-size metadata: BPE-approximate count only.
pub fn estimate_tokens(text: &str) -> usize {
    bpe_approx_split(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_counts_space_separated_runs() {
        let analysis = tokenize("I have a headache", TokenizerKind::Whitespace);
        assert_eq!(analysis.token_count, 4);
    }

    #[test]
    fn word_tokenizer_separates_punctuation() {
        let analysis = tokenize("headache, again!", TokenizerKind::Word);
        assert_eq!(analysis.tokens, vec!["headache", ",", "again", "!"]);
    }

    #[test]
    fn bpe_chunks_long_words_in_fours() {
        let analysis = tokenize("extraordinary", TokenizerKind::BpeApprox);
        assert_eq!(analysis.tokens, vec!["extr", "aord", "inar", "y"]);
    }

    #[test]
    fn bpe_keeps_short_words_whole() {
        let analysis = tokenize("doctor said rest", TokenizerKind::BpeApprox);
        assert_eq!(analysis.tokens, vec!["doctor", "said", "rest"]);
    }

    #[test]
    fn character_tokenizer_counts_chars() {
        let analysis = tokenize("abc", TokenizerKind::Character);
        assert_eq!(analysis.token_count, 3);
        assert!((analysis.efficiency - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_has_zero_efficiency() {
        let analysis = tokenize("", TokenizerKind::BpeApprox);
        assert_eq!(analysis.token_count, 0);
        assert_eq!(analysis.efficiency, 0.0);
        assert_eq!(analysis.cost_estimate, 0.0);
    }

    #[test]
    fn cost_scales_with_token_count() {
        let analysis =
            tokenize_for_model("one two three four", TokenizerKind::Whitespace, "gpt-4");
        assert!((analysis.cost_estimate - 4.0 / 1000.0 * 0.03).abs() < 1e-12);
    }

    #[test]
    fn unknown_model_gets_the_default_pricing() {
        let known = tokenize("hello there", TokenizerKind::Whitespace);
        let unknown =
            tokenize_for_model("hello there", TokenizerKind::Whitespace, "abacus-9000");
        assert_eq!(known.cost_estimate, unknown.cost_estimate);
    }
}
