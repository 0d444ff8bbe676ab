// ============================================================
// Layer 4 - Text Preprocessor
// ============================================================
// Normalises tweet text before vectorization.
//
// Cleaning steps (applied in this order, per record):
//   1. Null-fill       → a missing cell becomes ""
//   2. Lowercase
//   3. URL removal     → https?://… and www.… tokens deleted
//   4. Punctuation     → every char of PUNCTUATION becomes a
//                        space, whitespace runs collapse, trim
//   5. Digit removal   → runs of digits deleted
//   6. Stopwords       → whitespace tokens in the English list
//                        are dropped
//   7. Lemmatization   → each token reduced to its base form
//
// Punctuation and digits go before stopwords and lemmas so
// both of those see clean tokens ("day!!" is already "day").
//
// Reference: regex crate documentation
//            Rust Book §8 (Strings in Rust)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::lemmatizer::Lemmatizer;
use crate::data::stopwords::is_stopword;

/// ASCII punctuation plus the Arabic comma and question mark
pub const PUNCTUATION: &str = "!\"#$%&'()*+,،-./:;<=>؟?@[\\]^_`{|}~";

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("URL pattern is valid"));

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

pub struct Preprocessor {
    lemmatizer: Lemmatizer,
}

impl Preprocessor {
    /// Preprocessor with the built-in, lexicon-free lemmatizer
    pub fn new() -> Self {
        Self::with_lemmatizer(Lemmatizer::new())
    }

    pub fn with_lemmatizer(lemmatizer: Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    /// Run the full cleaning pipeline on one (possibly missing) cell
    pub fn clean(&self, text: Option<&str>) -> String {
        let text = fill_missing(text);
        let text = lowercase_text(text);
        let text = remove_urls(&text);
        let text = remove_punctuation(&text);
        let text = remove_numbers(&text);
        let text = remove_stopwords(&text);
        self.lemmatize_text(&text)
    }

    /// Lemmatize every whitespace token. A lemma that lands on a
    /// stopword would undo step 6, so such tokens stay as they are.
    pub fn lemmatize_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| {
                let lemma = self.lemmatizer.lemmatize(word);
                if is_stopword(&lemma) {
                    word.to_string()
                } else {
                    lemma
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn fill_missing(text: Option<&str>) -> &str {
    text.unwrap_or("")
}

pub fn lowercase_text(text: &str) -> String {
    text.to_lowercase()
}

pub fn remove_urls(text: &str) -> String {
    URL_RE.replace_all(text, "").into_owned()
}

pub fn remove_punctuation(text: &str) -> String {
    let spaced: String = text
        .chars()
        .map(|c| if PUNCTUATION.contains(c) { ' ' } else { c })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn remove_numbers(text: &str) -> String {
    DIGITS_RE.replace_all(text, "").into_owned()
}

pub fn remove_stopwords(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| !is_stopword(w))
        .collect::<Vec<_>>()
        .join(" ")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_tweet_end_to_end() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(Some("I am SO happy!! http://x.co #1")), "happy");
    }

    #[test]
    fn test_missing_cell_becomes_empty() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(None), "");
        assert_eq!(p.clean(Some("")), "");
    }

    #[test]
    fn test_removes_urls() {
        assert_eq!(remove_urls("see https://a.b/c?d=1 and www.site.org now"), "see  and  now");
    }

    #[test]
    fn test_punctuation_becomes_single_spaces() {
        assert_eq!(remove_punctuation("  wow...great,day!!  "), "wow great day");
        assert_eq!(remove_punctuation("what؟ yes، no"), "what yes no");
    }

    #[test]
    fn test_removes_digits() {
        assert_eq!(remove_numbers("day 2 of 365days"), "day  of days");
    }

    #[test]
    fn test_removes_stopwords() {
        assert_eq!(remove_stopwords("i miss my cats so much"), "miss cats much");
    }

    #[test]
    fn test_lemmatizes_tokens() {
        let p = Preprocessor::new();
        assert_eq!(p.lemmatize_text("missing friends parties"), "missing friend party");
    }

    #[test]
    fn test_output_has_no_forbidden_content() {
        let p = Preprocessor::new();
        let inputs = [
            "@user I'm sooo sad :( www.sad.com 24/7",
            "Going to the beach!!! http://t.co/xyz #summer2009",
            "can't wait... it's 5 o'clock somewhere",
            "   ",
        ];
        for input in inputs {
            let out = p.clean(Some(input));
            assert!(!out.contains("http"), "{out}");
            assert!(!out.contains("www."), "{out}");
            assert!(!out.chars().any(|c| PUNCTUATION.contains(c)), "{out}");
            assert!(!out.chars().any(|c| c.is_ascii_digit()), "{out}");
            assert!(out.split_whitespace().all(|w| !is_stopword(w)), "{out}");
            assert_eq!(out, out.to_lowercase());
        }
    }
}
