//! Tokenization and Jaccard similarity

use crate::config::ComparatorConfig;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Maximal runs of letters or digits over the lowercased text, so
    // "2L" tokenizes as "2", "l" and punctuation/currency marks vanish.
    RE.get_or_init(|| Regex::new(r"[a-z]+|\d+").expect("static pattern compiles"))
}

/// Convert text to its canonicalized token set: lowercase, split into
/// letter/digit runs, map synonyms, drop stop words
pub(crate) fn tokenize(text: &str, config: &ComparatorConfig) -> HashSet<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| {
            let token = m.as_str();
            config
                .synonyms
                .get(token)
                .cloned()
                .unwrap_or_else(|| token.to_string())
        })
        .filter(|token| !config.stop_words.contains(token))
        .collect()
}

/// Jaccard similarity between two texts' token sets
///
/// Two empty texts are identical (1.0); an empty text against a
/// non-empty one shares nothing (0.0).
pub(crate) fn jaccard_similarity(text1: &str, text2: &str, config: &ComparatorConfig) -> f64 {
    if text1.is_empty() && text2.is_empty() {
        return 1.0;
    }
    if text1.is_empty() || text2.is_empty() {
        return 0.0;
    }

    let tokens1 = tokenize(text1, config);
    let tokens2 = tokenize(text2, config);

    if tokens1.is_empty() && tokens2.is_empty() {
        return 1.0;
    }

    let intersection = tokens1.intersection(&tokens2).count();
    let union = tokens1.union(&tokens2).count();

    intersection as f64 / union as f64
}
