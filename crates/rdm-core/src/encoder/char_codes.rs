use std::collections::HashMap;

use crate::dict::COMMENT_MARKER;

/// Single character → distinct leading code fragments, in first-seen order.
pub type CharCodes = HashMap<char, Vec<String>>;

/// Build a character table from the lines of a single-character source.
///
/// Keeps entry lines whose word is exactly one character and whose code has
/// at least `len` characters, and records the first `len` characters of
/// each such code. Header, comment and blank lines carry no tab-separated
/// code and drop out on their own.
pub fn load_char_codes<'a>(lines: impl IntoIterator<Item = &'a str>, len: usize) -> CharCodes {
    let mut table = CharCodes::new();
    for line in lines {
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let mut fields = line.splitn(3, '\t');
        let (Some(word), Some(code)) = (fields.next(), fields.next()) else {
            continue;
        };
        let mut chars = word.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            continue;
        };
        if code.chars().count() < len {
            continue;
        }

        let fragment: String = code.chars().take(len).collect();
        let fragments = table.entry(ch).or_default();
        if !fragments.contains(&fragment) {
            fragments.push(fragment);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_char_codes() {
        let lines = [
            "---",
            "name: single",
            "...",
            "",
            "# comment\tabc",
            "光\tguan",
            "光\tguab\t100",
            "光\tgua",
            "明\tmina",
            "明\tm",
            "日月\triyu",
            "无",
            "短\tdu",
        ];
        let table = load_char_codes(lines, 3);
        assert_eq!(table[&'光'], ["gua"]);
        assert_eq!(table[&'明'], ["min"]);
        assert!(!table.contains_key(&'短'));
        assert!(!table.contains_key(&'无'));
        assert!(!table.contains_key(&'日'));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_distinct_fragments_keep_order() {
        let table = load_char_codes(["光\tguan", "光\tkuan", "光\tgua"], 2);
        assert_eq!(table[&'光'], ["gu", "ku"]);
    }
}
