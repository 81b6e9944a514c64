mod proptest_store;

use super::{DictStore, Entry};
use crate::settings::LoadSettings;

pub(super) const SAMPLE: &str = "\
# Rime dictionary
---
name: sample
version: \"1\"
...

# common words
光明\tgumian\t100
日月\triyude
天\ttian\t5
光亮\tgumian\t100
# trailing comment
";

/// Parse on one thread unless a test asks otherwise.
pub(super) fn load_settings() -> LoadSettings {
    LoadSettings {
        parse_threads: 1,
        min_lines_per_thread: 4096,
    }
}

pub(super) fn sample_store() -> DictStore {
    DictStore::from_text(SAMPLE, &load_settings()).unwrap()
}

pub(super) fn entry(word: &str, code: Option<&str>, weight: Option<&str>) -> Entry {
    Entry::new(word, code, weight).unwrap()
}
