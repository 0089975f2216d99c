//! Word entries and where they come from
//!
//! The word list is fetched once at startup. Any failure (I/O, bad status,
//! malformed JSON) falls back to the list bundled into the binary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled fallback list, compiled in
const BUNDLED_WORDS_JSON: &str = include_str!("../assets/fallback_words.json");

/// Word categories the player can choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Animals,
    Fruits,
    Objects,
    DailyLife,
    Occupation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Animals,
        Category::Fruits,
        Category::Objects,
        Category::DailyLife,
        Category::Occupation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Animals => "Animals",
            Category::Fruits => "Fruits",
            Category::Objects => "Objects",
            Category::DailyLife => "DailyLife",
            Category::Occupation => "Occupation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "animals" => Some(Category::Animals),
            "fruits" => Some(Category::Fruits),
            "objects" => Some(Category::Objects),
            "dailylife" | "daily life" | "daily_life" => Some(Category::DailyLife),
            "occupation" | "occupations" => Some(Category::Occupation),
            _ => None,
        }
    }
}

/// A word to type and its translation shown on a hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Remote lists name this field `word`
    #[serde(alias = "word")]
    pub term: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl WordEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Uncategorized entries belong to every category
    pub fn in_category(&self, category: Category) -> bool {
        self.category.is_none_or(|c| c == category)
    }

    /// Term length in characters (not bytes)
    pub fn term_len(&self) -> usize {
        self.term.chars().count()
    }
}

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list request returned status {0}")]
    Status(u16),
    #[error("malformed word list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word list request failed: {0}")]
    Request(String),
}

/// Something that can produce the word list
pub trait WordSource {
    fn fetch(&self) -> Result<Vec<WordEntry>, WordSourceError>;
}

/// Word list given as JSON text (already downloaded, or embedded)
#[derive(Debug, Clone)]
pub struct JsonText(pub String);

impl WordSource for JsonText {
    fn fetch(&self) -> Result<Vec<WordEntry>, WordSourceError> {
        parse_words(&self.0)
    }
}

/// Word list read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFile(pub PathBuf);

impl WordSource for JsonFile {
    fn fetch(&self) -> Result<Vec<WordEntry>, WordSourceError> {
        let json = std::fs::read_to_string(&self.0)?;
        parse_words(&json)
    }
}

/// Entry as it appears on the wire, category still free text
#[derive(Deserialize)]
struct RawWordEntry {
    #[serde(alias = "word")]
    term: String,
    translation: String,
    #[serde(default)]
    category: Option<String>,
}

/// Parse a JSON array of word entries
///
/// Entries naming a category outside `Category::ALL` can never be chosen,
/// so they are dropped rather than failing the whole list.
pub fn parse_words(json: &str) -> Result<Vec<WordEntry>, WordSourceError> {
    let raw: Vec<RawWordEntry> = serde_json::from_str(json)?;
    let total = raw.len();
    let words: Vec<WordEntry> = raw
        .into_iter()
        .filter_map(|entry| {
            let category = match entry.category {
                None => None,
                Some(name) => Some(Category::from_str(&name)?),
            };
            Some(WordEntry {
                term: entry.term,
                translation: entry.translation,
                category,
            })
        })
        .collect();
    if words.len() < total {
        log::warn!(
            "Skipped {} word(s) with an unknown category",
            total - words.len()
        );
    }
    Ok(words)
}

/// The bundled fallback list
pub fn bundled() -> Vec<WordEntry> {
    match parse_words(BUNDLED_WORDS_JSON) {
        Ok(words) => words,
        Err(e) => {
            log::error!("Bundled word list is unreadable: {}", e);
            Vec::new()
        }
    }
}

/// Take a fetch result, substituting the bundled list on failure
pub fn or_bundled(result: Result<Vec<WordEntry>, WordSourceError>) -> Vec<WordEntry> {
    match result {
        Ok(words) => {
            log::info!("Loaded {} words", words.len());
            words
        }
        Err(e) => {
            log::warn!("Word list unavailable ({}), using bundled list", e);
            bundled()
        }
    }
}

/// Fetch once from `source`, no retry
pub fn load_words(source: &dyn WordSource) -> Vec<WordEntry> {
    or_bundled(source.fetch())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_list_parses() {
        let words = bundled();
        assert!(words.len() > 200);
        for category in Category::ALL {
            assert!(
                words
                    .iter()
                    .any(|w| w.category == Some(category) && w.term_len() <= 4),
                "{} has no short words",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_word_alias() {
        let words =
            parse_words(r#"[{"word": "cat", "translation": "แมว", "category": "Animals"}]"#)
                .unwrap();
        assert_eq!(words[0].term, "cat");
        assert_eq!(words[0].category, Some(Category::Animals));

        let words = parse_words(r#"[{"term": "dog", "translation": "หมา"}]"#).unwrap();
        assert_eq!(words[0].term, "dog");
        assert_eq!(words[0].category, None);
    }

    #[test]
    fn test_unknown_category_keeps_the_rest() {
        let json = r#"[
            {"word": "car", "translation": "รถ", "category": "Vehicles"},
            {"word": "cat", "translation": "แมว", "category": "Animals"}
        ]"#;
        let words = load_words(&JsonText(json.to_string()));
        assert_eq!(
            words,
            vec![WordEntry::new("cat", "แมว").with_category(Category::Animals)]
        );
        for category in Category::ALL {
            assert!(!words.iter().any(|w| w.term == "car" && w.in_category(category)));
        }
    }

    #[test]
    fn test_malformed_falls_back() {
        let words = load_words(&JsonText("{not json".to_string()));
        assert_eq!(words, bundled());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let words = load_words(&JsonFile(PathBuf::from("/definitely/not/here.json")));
        assert_eq!(words, bundled());
    }

    #[test]
    fn test_empty_list_is_not_a_failure() {
        let words = load_words(&JsonText("[]".to_string()));
        assert!(words.is_empty());
    }

    #[test]
    fn test_uncategorized_in_every_category() {
        let w = WordEntry::new("sun", "ดวงอาทิตย์");
        assert!(Category::ALL.iter().all(|&c| w.in_category(c)));
        let w = w.with_category(Category::Objects);
        assert!(w.in_category(Category::Objects));
        assert!(!w.in_category(Category::Fruits));
    }

    #[test]
    fn test_term_len_counts_chars() {
        assert_eq!(WordEntry::new("แมว", "cat").term_len(), 3);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::from_str(" Daily Life "), Some(Category::DailyLife));
        assert_eq!(Category::from_str("FRUITS"), Some(Category::Fruits));
        assert_eq!(Category::from_str("vehicles"), None);
    }
}
