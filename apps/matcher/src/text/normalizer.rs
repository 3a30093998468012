//! Text normalizer: produces the token stream every lexical scorer consumes.

use crate::text::stemmer::stem;
use crate::text::stopwords::is_stopword;

/// Lowercases `text` and replaces everything outside `[a-z0-9]` and whitespace
/// with a space, so punctuated terms ("node.js", "ci/cd") split apart.
fn fold_to_ascii_words(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Normalizes raw text into a stemmed, stopword-free token stream.
///
/// Pure and deterministic. Tokens keep their order and duplicates, which the
/// frequency-based scorers rely on. Empty input yields an empty stream.
pub fn normalize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    fold_to_ascii_words(text)
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(stem)
        .filter(|token| token.len() > 1)
        .collect()
}

/// `normalize` for optional input; absent text is treated as empty.
pub fn normalize_opt(text: Option<&str>) -> Vec<String> {
    text.map(normalize).unwrap_or_default()
}

/// Display form of `text`: lowercase, punctuation removed, whitespace collapsed.
/// No stopword removal or stemming.
pub fn clean_text(text: &str) -> String {
    fold_to_ascii_words(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t").is_empty());
        assert!(normalize_opt(None).is_empty());
    }

    #[test]
    fn test_punctuation_splits_terms() {
        assert_eq!(
            normalize("Hello, World! Node.js & C++ -- e-mail"),
            vec!["hello", "world", "node", "js", "mail"]
        );
    }

    #[test]
    fn test_stopwords_removed_and_tokens_stemmed() {
        assert_eq!(
            normalize("We need a backend engineer experienced in Node.js and PostgreSQL, building REST APIs"),
            vec![
                "need",
                "backend",
                "engin",
                "experienc",
                "node",
                "js",
                "postgresql",
                "build",
                "rest",
                "api"
            ]
        );
    }

    #[test]
    fn test_single_character_tokens_dropped() {
        assert_eq!(
            normalize("5 years building REST APIs"),
            vec!["year", "build", "rest", "api"]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(normalize("running runs ran"), vec!["run", "run", "ran"]);
    }

    #[test]
    fn test_non_ascii_letters_become_separators() {
        assert_eq!(normalize("naïve résumé"), vec!["na", "sum"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Senior engineer building distributed systems with Rust and Tokio";
        assert_eq!(normalize(text), normalize(text));
    }

    #[test]
    fn test_renormalizing_stabilizes() {
        let text = "The engineers were developing scalable distributed systems, \
                    managing Kubernetes clusters and mentoring junior developers.";
        let once = normalize(text);
        let twice = normalize(&once.join(" "));
        let thrice = normalize(&twice.join(" "));
        assert_eq!(once, twice);
        assert_eq!(twice, thrice);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Node.js,\n\nREST   APIs!  "), "node js rest apis");
        assert_eq!(clean_text(""), "");
    }
}
