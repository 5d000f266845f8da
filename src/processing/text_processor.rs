//! Text normalization, the English lexicon, and keyword extraction

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// A set of lowercase lemma keywords derived from one piece of text.
pub type KeywordSet = HashSet<String>;

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static ENGLISH_LEXICON: Lazy<Lexicon> = Lazy::new(Lexicon::build_english);

/// Role nouns that anchor a job title inside a job description.
const ROLE_NOUNS: [&str; 12] = [
    "developer",
    "engineer",
    "manager",
    "analyst",
    "scientist",
    "designer",
    "architect",
    "consultant",
    "specialist",
    "administrator",
    "lead",
    "intern",
];

/// The configured language model: a closed stop-word set plus a rule-based
/// lemmatizer. Compiled in as literal data so extraction stays deterministic.
pub struct Lexicon {
    stop_words: HashSet<&'static str>,
    irregular_lemmas: HashMap<&'static str, &'static str>,
}

impl Lexicon {
    pub fn english() -> &'static Lexicon {
        &ENGLISH_LEXICON
    }

    fn build_english() -> Self {
        let stop_words = [
            "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
            "any", "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below",
            "between", "both", "but", "by", "can", "cannot", "could", "did", "didn", "do", "does",
            "doesn", "doing", "don", "down", "during", "each", "either", "else", "ever", "every",
            "few", "for", "from", "further", "had", "hadn", "has", "hasn", "have", "haven",
            "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i",
            "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "may", "me", "might",
            "more", "most", "must", "my", "myself", "neither", "no", "nor", "not", "now", "of",
            "off", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves",
            "out", "over", "own", "same", "shall", "she", "should", "shouldn", "so", "some",
            "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
            "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
            "up", "upon", "us", "very", "was", "wasn", "we", "were", "weren", "what", "when",
            "where", "which", "while", "who", "whom", "whose", "why", "will", "with", "won",
            "would", "wouldn", "you", "your", "yours", "yourself", "yourselves", "s", "t", "ll",
            "re", "ve", "d", "m", "anything", "everything", "nothing", "something",
        ];

        // Irregular forms the suffix rules cannot reach.
        let irregular_lemmas = [
            ("men", "man"),
            ("women", "woman"),
            ("children", "child"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("geese", "goose"),
            ("leaves", "leaf"),
            ("lives", "life"),
            ("wives", "wife"),
            ("knives", "knife"),
            ("selves", "self"),
            ("analyses", "analysis"),
            ("theses", "thesis"),
            ("crises", "crisis"),
            ("phenomena", "phenomenon"),
            ("began", "begin"),
            ("begun", "begin"),
            ("bought", "buy"),
            ("brought", "bring"),
            ("built", "build"),
            ("caught", "catch"),
            ("chose", "choose"),
            ("chosen", "choose"),
            ("drove", "drive"),
            ("driven", "drive"),
            ("fell", "fall"),
            ("felt", "feel"),
            ("found", "find"),
            ("gave", "give"),
            ("given", "give"),
            ("got", "get"),
            ("gotten", "get"),
            ("grew", "grow"),
            ("grown", "grow"),
            ("held", "hold"),
            ("kept", "keep"),
            ("knew", "know"),
            ("known", "know"),
            ("led", "lead"),
            ("made", "make"),
            ("met", "meet"),
            ("paid", "pay"),
            ("ran", "run"),
            ("said", "say"),
            ("sat", "sit"),
            ("saw", "see"),
            ("seen", "see"),
            ("sent", "send"),
            ("sold", "sell"),
            ("spent", "spend"),
            ("spoke", "speak"),
            ("spoken", "speak"),
            ("stood", "stand"),
            ("taught", "teach"),
            ("took", "take"),
            ("taken", "take"),
            ("thought", "think"),
            ("threw", "throw"),
            ("thrown", "throw"),
            ("told", "tell"),
            ("understood", "understand"),
            ("went", "go"),
            ("gone", "go"),
            ("won", "win"),
            ("wrote", "write"),
            ("written", "write"),
        ];

        Self {
            stop_words: stop_words.iter().copied().collect(),
            irregular_lemmas: irregular_lemmas.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Reduces a lowercase word to its dictionary base form. Plural and
    /// participle suffixes strip in sequence so "trainings", "training",
    /// and "trained" all land on the same lemma.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular_lemmas.get(word) {
            return (*lemma).to_string();
        }

        let singular = strip_plural(word).unwrap_or_else(|| word.to_string());
        match strip_participle(&singular) {
            Some(stem) => stem,
            None => singular,
        }
    }
}

/// Plural suffix rules: -ies → y, -es after sibilants, bare -s.
fn strip_plural(word: &str) -> Option<String> {
    if word.len() > 4 && word.ends_with("ies") {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    if word.len() > 4
        && (word.ends_with("sses")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("xes")
            || word.ends_with("zes"))
    {
        return Some(word[..word.len() - 2].to_string());
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}

/// -ing / -ed rules with doubled-consonant undo and trailing-e restoration.
fn strip_participle(word: &str) -> Option<String> {
    let stem = if word.len() >= 5 && word.ends_with("ing") {
        &word[..word.len() - 3]
    } else if word.len() >= 4 && word.ends_with("ed") && !word.ends_with("eed") {
        &word[..word.len() - 2]
    } else {
        return None;
    };

    if stem.len() < 2 || !contains_vowel(stem) {
        return None;
    }
    Some(fix_stem(stem))
}

fn fix_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let len = bytes.len();

    // runn → run, programm → program; keep ll/ss/zz endings intact
    if len >= 3 && bytes[len - 1] == bytes[len - 2] {
        let last = bytes[len - 1] as char;
        if last.is_ascii_alphabetic()
            && !"aeiou".contains(last)
            && !"lsz".contains(last)
        {
            return stem[..len - 1].to_string();
        }
    }

    // manag → manage, us → use, servic → service
    let last = bytes[len - 1] as char;
    if "cgsuvz".contains(last) {
        return format!("{}e", stem);
    }
    stem.to_string()
}

fn contains_vowel(word: &str) -> bool {
    word.chars().any(|c| "aeiouy".contains(c))
}

/// Extracts the normalized keyword set from free text: tokenize, keep
/// alphabetic non-stop-word tokens, lemmatize, lowercase, collapse
/// duplicates. Empty input yields the empty set.
pub fn extract_keywords(text: &str, lexicon: &Lexicon) -> KeywordSet {
    let mut keywords = KeywordSet::new();

    for word in text.unicode_words() {
        if !word.chars().all(|c| c.is_alphabetic()) {
            continue;
        }
        let lowered = word.to_lowercase();
        if lexicon.is_stop_word(&lowered) {
            continue;
        }
        keywords.insert(lexicon.lemmatize(&lowered));
    }

    keywords
}

/// Collapses runs of whitespace to single spaces for containment matching.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Finds the leading role phrase of a job description: the first role noun
/// plus up to two immediately preceding non-stop-word tokens. Falls back to
/// the first two content words when no role noun occurs.
pub fn detect_job_title(text: &str, lexicon: &Lexicon) -> Option<String> {
    let tokens: Vec<String> = text
        .unicode_words()
        .filter(|w| w.chars().all(|c| c.is_alphabetic()))
        .map(|w| w.to_lowercase())
        .collect();

    if let Some(pos) = tokens.iter().position(|t| ROLE_NOUNS.contains(&t.as_str())) {
        let mut phrase = vec![tokens[pos].clone()];
        for token in tokens[..pos].iter().rev().take(2) {
            if lexicon.is_stop_word(token) {
                break;
            }
            phrase.push(token.clone());
        }
        phrase.reverse();
        return Some(phrase.join(" "));
    }

    let fallback: Vec<String> = tokens
        .iter()
        .filter(|t| !lexicon.is_stop_word(t))
        .take(2)
        .cloned()
        .collect();
    if fallback.is_empty() {
        None
    } else {
        Some(fallback.join(" "))
    }
}
