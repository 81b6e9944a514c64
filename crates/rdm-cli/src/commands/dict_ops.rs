use std::path::Path;

use rdm_core::dict::{DictStore, Entry};
use rdm_core::settings::Settings;

use super::{open_for_edit, open_store, parse_entry, print_entries, save_store, SaveOptions};
use crate::prompt::Prompt;

/// Identity of an entry as given on the command line.
#[derive(Debug, Clone)]
pub struct EntryArgs {
    pub word: String,
    pub code: Option<String>,
    pub weight: Option<String>,
}

impl EntryArgs {
    fn entry(&self) -> Entry {
        parse_entry(&self.word, self.code.as_deref(), self.weight.as_deref())
    }
}

pub fn info(path: &Path, settings: &Settings, json: bool) {
    let store = open_store(path, settings);
    let report = store.report();
    let tied = store.tied_weight_groups();
    if json {
        let value = serde_json::json!({
            "path": path.display().to_string(),
            "header_lines": store.header().len(),
            "report": report,
            "tied_weight_codes": tied.len(),
        });
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&value), "Error: {}")
        );
        return;
    }
    println!("Dictionary:  {}", path.display());
    println!("Header:      {} lines", store.header().len());
    println!("Entries:     {}", report.entries);
    println!("Comments:    {}", report.comments);
    println!("Blank lines: {}", report.blanks);
    if report.duplicates > 0 {
        println!("Duplicates:  {} (skipped)", report.duplicates);
    }
    println!("Tied codes:  {}", tied.len());
}

pub fn lookup(path: &Path, settings: &Settings, code: &str, prefix: bool, json: bool) {
    let store = open_store(path, settings);
    let mut entries = store.search_by_code(code, !prefix);
    entries.sort_by(|a, b| a.code().cmp(&b.code()).then(a.index().cmp(&b.index())));
    if entries.is_empty() && !json {
        println!("{code}: not found");
        return;
    }
    if !json {
        println!("{code}: {} entries", entries.len());
    }
    print_entries(&entries, json);
}

pub fn word(path: &Path, settings: &Settings, word: &str, json: bool) {
    let store = open_store(path, settings);
    let entries: Vec<&Entry> = store.search_by_word(word).iter().collect();
    if entries.is_empty() && !json {
        println!("{word}: not found");
        return;
    }
    print_entries(&entries, json);
}

pub fn similar(path: &Path, settings: &Settings, target: &EntryArgs, json: bool) {
    let store = open_store(path, settings);
    let entry = target.entry();
    let entries = store.search_similar(&entry);
    if entries.is_empty() && !json {
        println!("{entry}: no similar entries");
        return;
    }
    print_entries(&entries, json);
}

pub fn add(
    path: &Path,
    settings: &Settings,
    prompt: &mut dyn Prompt,
    new: &EntryArgs,
    opts: &SaveOptions,
) {
    let entry = new.entry();
    let mut store = open_for_edit(path, settings, prompt);
    if store.insert(entry.clone()) {
        prompt.info(&format!("Added: {entry}"));
    } else {
        prompt.error(&format!("already exists: {entry}"));
    }
    if store.is_modified() {
        save_store(&mut store, settings, opts, prompt);
    }
}

pub fn remove(
    path: &Path,
    settings: &Settings,
    prompt: &mut dyn Prompt,
    old: &EntryArgs,
    opts: &SaveOptions,
) {
    let entry = old.entry();
    let mut store = open_for_edit(path, settings, prompt);
    if store.remove(&entry) {
        prompt.info(&format!("Removed: {entry}"));
    } else {
        prompt.error(&format!("not found: {entry}"));
    }
    if store.is_modified() {
        save_store(&mut store, settings, opts, prompt);
    }
}

/// Change the code and/or weight of one entry, keeping its position.
///
/// The file is rewritten whenever the store changed, including tied
/// weights settled on open when the edit itself is skipped.
pub fn modify(
    path: &Path,
    settings: &Settings,
    prompt: &mut dyn Prompt,
    old: &EntryArgs,
    code: Option<&str>,
    weight: Option<&str>,
    opts: &SaveOptions,
) {
    let mut store = open_for_edit(path, settings, prompt);
    modify_entry(&mut store, prompt, &old.entry(), code, weight);
    if store.is_modified() {
        save_store(&mut store, settings, opts, prompt);
    }
}

fn modify_entry(
    store: &mut DictStore,
    prompt: &mut dyn Prompt,
    old: &Entry,
    code: Option<&str>,
    weight: Option<&str>,
) {
    let Some(stored) = store.find(old).cloned() else {
        prompt.error(&format!("not found: {old}"));
        return;
    };

    // Build through `Entry::new` so the result is validated, then carry
    // the source position over.
    let code = code.or(stored.code());
    let weight = match weight {
        Some("") => None,
        Some(w) => Some(w),
        None => stored.weight(),
    };
    let checked = parse_entry(stored.word(), code, weight);
    let mut updated = stored.clone();
    if let Some(code) = checked.code() {
        updated = updated.with_code(code);
    }
    updated = updated.with_weight(checked.weight());

    if updated.same_as(&stored) {
        prompt.info("Nothing to change");
    } else if !prompt.confirm(&format!("Replace {stored} with {updated}?")) {
        prompt.info("Cancelled");
    } else if store.modify(&stored, updated.clone()) {
        prompt.info(&format!("Modified: {updated}"));
    } else {
        prompt.error(&format!("already exists: {updated}"));
    }
}

/// Reassign tied weights and rewrite the file in the configured order.
pub fn normalize(path: &Path, settings: &Settings, prompt: &mut dyn Prompt, opts: &SaveOptions) {
    let mut store = open_store(path, settings);
    let count = super::settle_tied_weights(&mut store, prompt);
    if count == 0 && store.tied_weight_groups().is_empty() {
        prompt.info("No tied weights");
    }
    save_store(&mut store, settings, opts, prompt);
}
