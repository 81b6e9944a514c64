use std::collections::HashMap;

use super::Entry;

/// Word → entries bearing that word.
#[derive(Default)]
pub struct WordIndex {
    map: HashMap<String, Vec<Entry>>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: Entry) {
        self.map
            .entry(entry.word().to_string())
            .or_default()
            .push(entry);
    }

    /// Remove the entry identical to `entry`.
    ///
    /// # Panics
    ///
    /// Panics if the entry is absent: callers only remove what the code trie
    /// just gave up, so a miss means the two indexes have diverged.
    pub fn remove(&mut self, entry: &Entry) -> Entry {
        let removed = self.map.get_mut(entry.word()).and_then(|list| {
            let pos = list.iter().position(|e| e.same_as(entry))?;
            Some(list.remove(pos))
        });
        let Some(removed) = removed else {
            panic!("word index and code trie disagree on {entry:?}");
        };
        if self.map.get(entry.word()).is_some_and(Vec::is_empty) {
            self.map.remove(entry.word());
        }
        removed
    }

    pub fn get(&self, word: &str) -> &[Entry] {
        self.map.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.map.values().flatten()
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut index = WordIndex::new();
        index.insert(Entry::new("光明", Some("gumi"), None).unwrap());
        index.insert(Entry::new("光明", Some("gmr"), None).unwrap());
        assert_eq!(index.get("光明").len(), 2);
        assert!(index.get("黑暗").is_empty());
        assert_eq!(index.word_count(), 1);
    }

    #[test]
    fn test_remove_last_drops_word() {
        let mut index = WordIndex::new();
        let e = Entry::new("光明", Some("gumi"), None).unwrap();
        index.insert(e.clone());
        assert_eq!(index.remove(&e), e);
        assert!(index.get("光明").is_empty());
        assert_eq!(index.word_count(), 0);
    }

    #[test]
    #[should_panic(expected = "disagree")]
    fn test_remove_absent_panics() {
        let mut index = WordIndex::new();
        index.remove(&Entry::new("光明", Some("gumi"), None).unwrap());
    }
}
