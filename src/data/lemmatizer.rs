// ============================================================
// Layer 4 - Lemmatizer
// ============================================================
// Reduces a single lowercase token to its dictionary (noun)
// base form: "cats" → "cat", "parties" → "party",
// "children" → "child".
//
// Lookup order:
//   1. irregular-form exception table
//   2. words that only look plural ("news", "always") stay put
//   3. a word already in the lexicon is its own lemma
//   4. WordNet-style detachment rules, tried in order, the
//      first result found in the lexicon wins:
//        s → ""    ses → s    ves → f    xes → x    zes → z
//        ches → ch    shes → sh    men → man    ies → y
//   5. anything else is returned unchanged
//
// The lexicon is the bundled base-noun list
// (resources/base_nouns.txt), optionally extended with a
// user file of one word per line.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

/// Bundled base forms, one per line
const BASE_NOUNS_TXT: &str = include_str!("../../resources/base_nouns.txt");

static BASE_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    BASE_NOUNS_TXT
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
});

/// Irregular plural → base form
static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("oxen", "ox"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("lives", "life"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("selves", "self"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("loaves", "loaf"),
        ("calves", "calf"),
        ("data", "datum"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in "s" that are already base forms
static INVARIANT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "always", "sometimes", "perhaps", "news", "series", "species", "physics",
        "mathematics", "politics", "economics", "thanks", "yes", "plus", "bus", "gas",
        "christmas", "whereas", "besides", "towards", "afterwards", "nowadays", "lens",
        "pants", "jeans", "glasses", "scissors", "clothes", "means", "headquarters",
    ]
    .into_iter()
    .collect()
});

/// WordNet noun detachment rules, tried in this order
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    /// Base forms added on top of the bundled list
    extra: HashSet<String>,
}

impl Lemmatizer {
    /// Lemmatizer backed by the bundled base-noun list
    pub fn new() -> Self {
        Self { extra: HashSet::new() }
    }

    /// Bundled list plus the given base forms
    pub fn with_lexicon(extra: HashSet<String>) -> Self {
        Self { extra }
    }

    /// Load a one-word-per-line lexicon file
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read lexicon '{}'", path.display()))?;
        let words: HashSet<String> = text
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        tracing::info!("Loaded lemma lexicon with {} extra entries", words.len());
        Ok(Self::with_lexicon(words))
    }

    fn is_known(&self, word: &str) -> bool {
        BASE_NOUNS.contains(word) || self.extra.contains(word)
    }

    /// Return the base form of one lowercase token
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = EXCEPTIONS.get(word) {
            return (*base).to_string();
        }
        if INVARIANT.contains(word) || self.is_known(word) {
            return word.to_string();
        }
        NOUN_RULES
            .iter()
            .filter_map(|(suffix, repl)| {
                word.strip_suffix(suffix).map(|stem| format!("{stem}{repl}"))
            })
            .find(|candidate| !candidate.is_empty() && self.is_known(candidate))
            .unwrap_or_else(|| word.to_string())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("cats"), "cat");
        assert_eq!(l.lemmatize("parties"), "party");
        assert_eq!(l.lemmatize("boxes"), "box");
        assert_eq!(l.lemmatize("churches"), "church");
        assert_eq!(l.lemmatize("classes"), "class");
        assert_eq!(l.lemmatize("firemen"), "fireman");
    }

    #[test]
    fn test_irregular_forms() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("children"), "child");
        assert_eq!(l.lemmatize("feet"), "foot");
        assert_eq!(l.lemmatize("wolves"), "wolf");
    }

    #[test]
    fn test_plain_s_is_tried_before_ies() {
        let l = Lemmatizer::new();
        assert_eq!(l.lemmatize("movies"), "movie");
        assert_eq!(l.lemmatize("cookies"), "cookie");
        assert_eq!(l.lemmatize("zombies"), "zombie");
        assert_eq!(l.lemmatize("selfies"), "selfie");
        assert_eq!(l.lemmatize("puppies"), "puppy");
        assert_eq!(l.lemmatize("buses"), "bus");
    }

    #[test]
    fn test_unknown_words_are_not_stripped() {
        let l = Lemmatizer::new();
        for w in ["goes", "diabetes", "texas", "canvas", "wes", "famous"] {
            assert_eq!(l.lemmatize(w), w, "{w} should not change");
        }
    }

    #[test]
    fn test_bundled_list_has_no_plurals() {
        assert!(BASE_NOUNS.len() > 500);
        for w in BASE_NOUNS.iter() {
            assert_eq!(Lemmatizer::new().lemmatize(w), *w);
        }
    }

    #[test]
    fn test_base_forms_untouched() {
        let l = Lemmatizer::new();
        for w in ["happy", "happiness", "day", "news", "always", "virus", "sad", "bus"] {
            assert_eq!(l.lemmatize(w), w, "{w} should not change");
        }
    }

    #[test]
    fn test_lexicon_validates_rules() {
        let lexicon: HashSet<String> =
            ["hashtag", "emoji"].iter().map(|s| s.to_string()).collect();
        let l = Lemmatizer::with_lexicon(lexicon);
        assert_eq!(l.lemmatize("hashtags"), "hashtag");
        assert_eq!(l.lemmatize("emojis"), "emoji");
        assert_eq!(Lemmatizer::new().lemmatize("hashtags"), "hashtags");
        // No rule result is in the lexicon, so the word is kept
        assert_eq!(l.lemmatize("wes"), "wes");
    }

    #[test]
    fn test_lexicon_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.txt");
        fs::write(&path, "Meme\n\nvibe\n").unwrap();
        let l = Lemmatizer::from_lexicon_file(&path).unwrap();
        assert_eq!(l.lemmatize("memes"), "meme");
        assert_eq!(l.lemmatize("vibes"), "vibe");
    }
}
