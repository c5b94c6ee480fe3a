use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fst::automaton::Str;
use fst::{Automaton, IntoStreamer, Set, SetBuilder};
use log::info;

use super::error::DictionaryError;

/// Word list backed by an fst set. Words are stored trimmed and in lowercase.
pub struct Dictionary {
    words: Set<Vec<u8>>,
}

impl Dictionary {
    /// Reads one word per line, ignoring blank lines
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(path.as_ref())?;
        let dictionary = Self::from_reader(BufReader::new(file))?;
        info!(
            "Read {} words from {}",
            dictionary.len(),
            path.as_ref().display()
        );
        Ok(dictionary)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DictionaryError> {
        let mut words = Vec::new();
        for line in reader.lines() {
            words.push(line?);
        }
        Self::from_words(words)
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        // The fst builder needs its keys sorted and unique
        words.sort_unstable();
        words.dedup();

        let mut build = SetBuilder::memory();
        build.extend_iter(words)?;
        let bytes = build.into_inner()?;
        Ok(Self {
            words: Set::new(bytes)?,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in alphabetical order
    pub fn words(&self) -> Vec<String> {
        self.search(fst::automaton::AlwaysMatch)
    }

    pub fn starting_with(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.search(Str::new(&prefix).starts_with())
    }

    /// Searches the set with the provided automaton
    pub fn search<A: Automaton>(&self, matcher: A) -> Vec<String> {
        self.words
            .search(matcher)
            .into_stream()
            .into_bytes()
            .into_iter()
            .map(|w| String::from_utf8_lossy(&w).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::Dictionary;

    #[test]
    fn test_dictionary_lookup() {
        let vocab = vec!["Cat", "dog", "mouse", "moose", "laptop", "dog", " cart "];
        let dict = Dictionary::from_words(vocab).unwrap();

        assert_eq!(dict.len(), 6);
        assert!(dict.contains("CAT"));
        assert!(dict.contains("cart"));
        assert!(!dict.contains("ca"));
        assert_eq!(dict.starting_with("Mo"), vec!["moose", "mouse"]);
        assert_eq!(dict.words()[0], "cart");
    }

    #[test]
    fn test_reader_skips_blank_lines() {
        let text = "zebra\n\n  \napple\n";
        let dict = Dictionary::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(dict.words(), vec!["apple", "zebra"]);
        assert!(!dict.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(Dictionary::from_file("/nonexistent/words.txt").is_err());
    }
}
