use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use hangman_types::GameError;
use rand::Rng;

const CHAMPIONS: &str = include_str!("../words/champions.txt");

/// Fixed catalog of candidate words. Never empty once constructed.
#[derive(Debug, Clone)]
pub struct WordSource {
    words: Vec<String>,
}

impl WordSource {
    /// Build a catalog from a newline separated list.
    /// Blank lines and `#` comments are skipped, entries are normalized
    /// and de-duplicated in first-seen order.
    pub fn new(word_list: &str) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        let words: Vec<String> = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize_word)
            .filter(|word| !word.is_empty())
            .filter(|word| seen.insert(word.clone()))
            .collect();

        if words.is_empty() {
            return Err(GameError::EmptyCatalog);
        }

        Ok(Self { words })
    }

    /// The champion catalog shipped with the crate.
    pub fn champions() -> Self {
        Self::new(CHAMPIONS).unwrap_or_else(|_| Self {
            words: vec!["ashe".to_string()],
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let source = Self::new(&contents)
            .with_context(|| format!("Word list {} has no usable entries", path.display()))?;
        tracing::info!("Loaded {} words from {}", source.len(), path.display());
        Ok(source)
    }

    /// Uniformly random word from the catalog.
    pub fn pick_word(&self) -> String {
        self.pick_word_with(&mut rand::thread_rng())
    }

    pub fn pick_word_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let index = rng.gen_range(0..self.words.len());
        self.words[index].clone()
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = normalize_word(word);
        self.words.iter().any(|candidate| *candidate == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordSource {
    fn default() -> Self {
        Self::champions()
    }
}

/// Lowercase and keep only ASCII letters: "Kai'Sa" becomes "kaisa".
pub fn normalize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_word_source_parsing() {
        let word_list = "Ashe\n# comment\n\n  Zed  \nLux";
        let source = WordSource::new(word_list).unwrap();

        assert_eq!(source.words(), &["ashe", "zed", "lux"]);
        assert!(source.contains("ASHE"));
        assert!(!source.contains("teemo"));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_word("Kai'Sa"), "kaisa");
        assert_eq!(normalize_word("Dr. Mundo"), "drmundo");
        assert_eq!(normalize_word("Jarvan IV"), "jarvaniv");
        assert_eq!(normalize_word("Nunu & Willump"), "nunuwillump");
        assert_eq!(normalize_word("123"), "");
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let source = WordSource::new("Ashe\nashe\nASHE\nZed").unwrap();
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_empty_word_list() {
        assert_eq!(WordSource::new("").unwrap_err(), GameError::EmptyCatalog);
        assert_eq!(
            WordSource::new("# only a comment\n\n 42 \n").unwrap_err(),
            GameError::EmptyCatalog
        );
    }

    #[test]
    fn test_champion_catalog() {
        let source = WordSource::champions();
        assert!(source.len() > 100);
        assert!(source.contains("ashe"));
        assert!(source.contains("kaisa"));
        assert!(
            source
                .words()
                .iter()
                .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    #[test]
    fn test_random_word_selection() {
        let source = WordSource::new("ashe\nzed\nlux").unwrap();
        for _ in 0..20 {
            let word = source.pick_word();
            assert!(source.contains(&word));
        }
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        let source = WordSource::champions();
        let first = source.pick_word_with(&mut StdRng::seed_from_u64(7));
        let second = source.pick_word_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_covers_catalog() {
        let source = WordSource::new("ashe\nzed\nlux").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let picked: HashSet<String> = (0..200).map(|_| source.pick_word_with(&mut rng)).collect();
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_from_missing_file() {
        let result = WordSource::from_file("/definitely/not/here.txt");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read word list"));
    }
}
