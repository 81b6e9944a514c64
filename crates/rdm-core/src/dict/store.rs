use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, debug_span, info, warn};

use super::batch::{self, BatchError, Edit};
use super::load::{parse_lines, split_header};
use super::{CodeTrie, DictError, Entry, Line, WordIndex};
use crate::settings::LoadSettings;

/// What a load found in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub entries: usize,
    pub comments: usize,
    pub blanks: usize,
    /// Entry lines skipped because an identical entry came earlier.
    pub duplicates: usize,
}

/// An editable dictionary: header, code trie and word index.
pub struct DictStore {
    path: Option<PathBuf>,
    header: Vec<String>,
    trie: CodeTrie,
    words: WordIndex,
    /// Blank and comment lines, in source order.
    others: Vec<Line>,
    len: usize,
    modified: bool,
    report: LoadReport,
}

impl DictStore {
    /// Load a dictionary source file.
    pub fn open(path: &Path, settings: &LoadSettings) -> Result<Self, DictError> {
        let _span = debug_span!("open", path = %path.display()).entered();
        let text = fs::read_to_string(path)?;
        let mut store = Self::from_text(&text, settings)?;
        store.path = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            entries = store.report.entries,
            comments = store.report.comments,
            duplicates = store.report.duplicates,
            words = store.words.word_count(),
            trie_nodes = store.trie.node_count(),
            "loaded dictionary"
        );
        Ok(store)
    }

    /// Build a store from the full text of a source file. The store has no
    /// path, so `save` needs an explicit one.
    pub fn from_text(text: &str, settings: &LoadSettings) -> Result<Self, DictError> {
        let raw: Vec<&str> = text.lines().collect();
        let (header, body) = split_header(&raw)?;
        let threads = settings.threads_for(body.len());
        let lines = parse_lines(body, header.len(), threads)?;

        let mut store = Self {
            path: None,
            header: header.iter().map(|l| l.to_string()).collect(),
            trie: CodeTrie::new(),
            words: WordIndex::new(),
            others: Vec::new(),
            len: 0,
            modified: false,
            report: LoadReport::default(),
        };
        for line in lines {
            match line {
                Line::Entry(entry) => {
                    if store.insert(entry.clone()) {
                        store.report.entries += 1;
                    } else {
                        warn!(line = entry.index().map(|i| i + 1), %entry, "duplicate entry skipped");
                        store.report.duplicates += 1;
                    }
                }
                Line::Comment { .. } => {
                    store.report.comments += 1;
                    store.others.push(line);
                }
                Line::Blank { .. } => {
                    store.report.blanks += 1;
                    store.others.push(line);
                }
            }
        }
        store.modified = false;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True after any insert or remove since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Insert an entry. Returns `false` if an identical entry exists.
    pub fn insert(&mut self, entry: Entry) -> bool {
        if self.trie.get(&entry).is_some() {
            return false;
        }
        self.words.insert(entry.clone());
        let inserted = self.trie.insert(entry);
        debug_assert!(inserted);
        self.len += 1;
        self.modified = true;
        true
    }

    /// Remove the entry identical to `entry`. Returns `false` if absent.
    pub fn remove(&mut self, entry: &Entry) -> bool {
        let Some(removed) = self.trie.remove(entry) else {
            return false;
        };
        self.words.remove(&removed);
        self.len -= 1;
        self.modified = true;
        true
    }

    /// The stored entry identical to `entry`, carrying its source index.
    pub fn find(&self, entry: &Entry) -> Option<&Entry> {
        self.trie.get(entry)
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.find(entry).is_some()
    }

    /// Entries whose code equals `code` (`exact`) or starts with it.
    pub fn search_by_code(&self, code: &str, exact: bool) -> Vec<&Entry> {
        self.trie.search(code, exact)
    }

    pub fn search_by_word(&self, word: &str) -> &[Entry] {
        self.words.get(word)
    }

    /// Whether any entry holds exactly `code`.
    pub fn is_code_occupied(&self, code: &str) -> bool {
        self.trie.is_occupied(code)
    }

    /// Entries sharing the word or the exact code of `entry`, excluding
    /// `entry` itself.
    pub fn search_similar(&self, entry: &Entry) -> Vec<&Entry> {
        let by_code = self
            .trie
            .search(entry.code().unwrap_or(""), true)
            .into_iter()
            .filter(|e| e.word() != entry.word());
        self.words
            .get(entry.word())
            .iter()
            .chain(by_code)
            .filter(|e| !e.same_as(entry))
            .collect()
    }

    /// Apply `edits` in order, or none of them.
    pub fn apply(&mut self, edits: Vec<Edit>) -> Result<(), BatchError> {
        batch::validate(&edits, |e| self.contains(e))?;
        for edit in edits {
            let applied = match edit {
                Edit::Insert(e) => self.insert(e),
                Edit::Remove(e) => self.remove(&e),
            };
            if !applied {
                unreachable!("validated edit batch failed to apply");
            }
        }
        Ok(())
    }

    /// Replace `old` with `new` as one step. Returns `false` if `old` is
    /// absent or `new` already exists.
    pub fn modify(&mut self, old: &Entry, new: Entry) -> bool {
        self.apply(vec![Edit::Remove(old.clone()), Edit::Insert(new)])
            .is_ok()
    }

    /// Codes whose entries leave candidate order to file order because two
    /// or more of them carry the same weight value.
    pub fn tied_weight_groups(&self) -> Vec<String> {
        self.code_groups()
            .into_iter()
            .filter(|(_, group)| has_tied_weights(group))
            .map(|(code, _)| code.to_string())
            .collect()
    }

    /// Give every entry in a tied code group a distinct integer weight that
    /// keeps its current order: by source index, new entries last, the first
    /// getting the highest weight. Returns the number of entries rewritten.
    pub fn reassign_tied_weights(&mut self) -> usize {
        let mut removals = Vec::new();
        let mut insertions = Vec::new();
        for (_, mut group) in self.code_groups() {
            if !has_tied_weights(&group) {
                continue;
            }
            group.sort_by(|a, b| source_order(a, b));
            let n = group.len();
            for (pos, entry) in group.into_iter().enumerate() {
                let weight = (n - pos).to_string();
                if entry.weight() == Some(weight.as_str()) {
                    continue;
                }
                removals.push(Edit::Remove(entry.clone()));
                insertions.push(Edit::Insert(entry.with_weight(Some(&weight))));
            }
        }

        let count = insertions.len();
        removals.extend(insertions);
        if let Err(e) = self.apply(removals) {
            unreachable!("weight reassignment produced an invalid batch: {e}");
        }
        if count > 0 {
            info!(count, "reassigned tied weights");
        }
        count
    }

    fn code_groups(&self) -> BTreeMap<&str, Vec<&Entry>> {
        let mut groups: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();
        for e in self.words.iter() {
            if let Some(code) = e.code() {
                groups.entry(code).or_default().push(e);
            }
        }
        groups
    }

    /// Render the whole file: header, then lines in save order.
    pub fn render(&self, sorted: bool) -> String {
        let mut entries: Vec<&Entry> = self.words.iter().collect();
        let mut out: Vec<String> = self.header.clone();

        if sorted {
            entries.sort_by(|a, b| {
                a.code()
                    .cmp(&b.code())
                    .then_with(|| source_order(a, b))
            });
            out.extend(entries.iter().map(|e| e.to_string()));
            out.extend(
                self.others
                    .iter()
                    .filter(|l| matches!(l, Line::Comment { .. }))
                    .map(Line::to_string),
            );
        } else {
            let (old, mut new): (Vec<&Entry>, Vec<&Entry>) =
                entries.into_iter().partition(|e| e.index().is_some());
            new.sort_by(|a, b| a.code().cmp(&b.code()).then_with(|| source_order(a, b)));

            let mut indexed: Vec<(usize, String)> = old
                .into_iter()
                .filter_map(|e| Some((e.index()?, e.to_string())))
                .chain(
                    self.others
                        .iter()
                        .filter_map(|l| Some((l.index()?, l.to_string()))),
                )
                .collect();
            indexed.sort_by_key(|(i, _)| *i);
            out.extend(indexed.into_iter().map(|(_, l)| l));
            out.extend(new.iter().map(|e| e.to_string()));
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }

    /// Write the dictionary to `path`, or back to its source when `None`.
    ///
    /// The file is written to a sibling temporary and renamed into place,
    /// so a failed save leaves the previous file untouched.
    pub fn save(&mut self, path: Option<&Path>, sorted: bool) -> Result<(), DictError> {
        let target = path
            .or(self.path.as_deref())
            .ok_or(DictError::NoPath)?
            .to_path_buf();
        let text = self.render(sorted);

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&target, &text)?;

        debug!(path = %target.display(), entries = self.len, sorted, "saved dictionary");
        self.modified = false;
        Ok(())
    }
}

/// Write through `<file name>.tmp` next to `target`, removing the
/// temporary if either step fails.
fn write_atomic(target: &Path, text: &str) -> std::io::Result<()> {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    let tmp = target.with_file_name(name);
    let result = fs::write(&tmp, text).and_then(|()| fs::rename(&tmp, target));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Source index ascending with new entries last; word and weight break
/// the remaining ties so output is deterministic.
fn source_order(a: &Entry, b: &Entry) -> Ordering {
    let idx = |e: &Entry| e.index().unwrap_or(usize::MAX);
    idx(a)
        .cmp(&idx(b))
        .then_with(|| a.word().cmp(b.word()))
        .then_with(|| a.weight().cmp(&b.weight()))
}

fn has_tied_weights(group: &[&Entry]) -> bool {
    let mut seen = HashSet::new();
    group.len() > 1 && !group.iter().all(|e| seen.insert(e.weight_value().to_bits()))
}
