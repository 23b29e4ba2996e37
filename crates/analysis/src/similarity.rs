//! Lexical paper similarity
//!
//! Scores pairwise textual similarity as the Jaccard index over token sets
//! built from title, abstract and keywords. Purely lexical: no embeddings,
//! no external calls.

use literatus_common::model::Paper;
use regex_lite::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Tokens shorter than this are discarded (strictly greater-than filter)
const MIN_TOKEN_CHARS: usize = 3;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+").expect("static word pattern"))
}

/// Lowercase a text and split it into word tokens, keeping only tokens
/// longer than three characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|token| token.len() > MIN_TOKEN_CHARS)
        .collect()
}

/// Term set for one paper: title tokens, abstract tokens and keywords.
///
/// Keywords enter verbatim - not re-tokenized and not length-filtered.
fn term_set(paper: &Paper) -> HashSet<String> {
    let mut terms: HashSet<String> = tokenize(&paper.title).into_iter().collect();
    terms.extend(tokenize(&paper.abstract_text));
    terms.extend(paper.keywords.iter().cloned());
    terms
}

/// Jaccard similarity between two papers, in [0, 1].
///
/// Symmetric and total: an empty union yields 0.0, never NaN.
pub fn similarity(a: &Paper, b: &Paper) -> f64 {
    let terms_a = term_set(a);
    let terms_b = term_set(b);

    let intersection = terms_a.intersection(&terms_b).count();
    let union = terms_a.union(&terms_b).count();

    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
