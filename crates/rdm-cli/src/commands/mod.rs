macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod dict_ops;
pub mod encode_ops;

use std::path::{Path, PathBuf};

use rdm_core::dict::{DictStore, Entry};
use rdm_core::settings::Settings;
use unicode_width::UnicodeWidthStr;

use crate::prompt::Prompt;

/// Where and how a mutated dictionary is written back.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Write here instead of over the source file.
    pub output: Option<PathBuf>,
    /// Keep source order instead of sorting by code.
    pub unsorted: bool,
}

impl SaveOptions {
    fn sorted(&self, settings: &Settings) -> bool {
        settings.save.sorted && !self.unsorted
    }
}

/// An entry as given on the command line.
pub fn parse_entry(word: &str, code: Option<&str>, weight: Option<&str>) -> Entry {
    die!(Entry::new(word, code, weight), "Error: {}")
}

/// Load a dictionary for reading.
pub(crate) fn open_store(path: &Path, settings: &Settings) -> DictStore {
    die!(
        DictStore::open(path, &settings.load),
        "Error opening {}: {}",
        path.display()
    )
}

/// Load a dictionary about to be edited.
pub(crate) fn open_for_edit(path: &Path, settings: &Settings, prompt: &mut dyn Prompt) -> DictStore {
    let mut store = open_store(path, settings);
    settle_tied_weights(&mut store, prompt);
    store
}

/// Offer to give tied entries distinct weights, so that an edit cannot
/// reorder their candidates. Returns the number of weights rewritten.
pub fn settle_tied_weights(store: &mut DictStore, prompt: &mut dyn Prompt) -> usize {
    let tied = store.tied_weight_groups();
    if tied.is_empty() {
        return 0;
    }
    let sample: Vec<&str> = tied.iter().take(5).map(String::as_str).collect();
    prompt.info(&format!(
        "{} codes have entries with equal weights (e.g. {})",
        tied.len(),
        sample.join(", ")
    ));
    if !prompt.confirm("Reassign their weights to keep the current order?") {
        return 0;
    }
    let count = store.reassign_tied_weights();
    prompt.info(&format!("Reassigned {count} weights"));
    count
}

pub(crate) fn save_store(
    store: &mut DictStore,
    settings: &Settings,
    opts: &SaveOptions,
    prompt: &mut dyn Prompt,
) {
    let sorted = opts.sorted(settings);
    die!(
        store.save(opts.output.as_deref(), sorted),
        "Error saving dictionary: {}"
    );
    let target = opts.output.as_deref().or(store.path());
    if let Some(path) = target {
        prompt.info(&format!("Saved {} entries to {}", store.len(), path.display()));
    }
}

/// Entries as aligned columns: word, code, weight, source line.
pub fn format_entries(entries: &[&Entry]) -> String {
    let width = entries.iter().map(|e| e.word().width()).max().unwrap_or(0);
    let mut out = String::new();
    for e in entries {
        let pad = width - e.word().width();
        let line = match e.index() {
            Some(i) => format!("L{}", i + 1),
            None => "new".to_string(),
        };
        out.push_str(&format!(
            "  {}{}  {:<8} {:>6}  {}\n",
            e.word(),
            " ".repeat(pad),
            e.code().unwrap_or("-"),
            e.weight().unwrap_or(""),
            line
        ));
    }
    out
}

pub(crate) fn print_entries(entries: &[&Entry], json: bool) {
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(entries), "Error: {}")
        );
    } else {
        print!("{}", format_entries(entries));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::prompt::Console;

    #[test]
    fn columns_align_by_display_width() {
        let a = Entry::new("光明", Some("gumian"), Some("100")).unwrap();
        let b = Entry::new("abc", Some("xyz"), None).unwrap();
        let text = format_entries(&[&a, &b]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  光明  gumian      100  new");
        assert_eq!(lines[1], "  abc   xyz              new");
        assert_eq!(lines[0].width(), lines[1].width());
    }

    fn tied_store() -> DictStore {
        let text = "---\nname: t\n...\n光明\tgumian\t5\n光亮\tgumian\t5\n日\tri\n";
        DictStore::from_text(text, &Settings::default().load).unwrap()
    }

    #[test]
    fn settle_tied_weights_on_yes() {
        let mut store = tied_store();
        let mut console = Console::new(Cursor::new(b"y\n".to_vec()), Vec::new(), false);
        assert_eq!(settle_tied_weights(&mut store, &mut console), 2);
        assert!(store.tied_weight_groups().is_empty());
        assert!(store.is_modified());
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.starts_with("1 codes have entries with equal weights (e.g. gumian)\n"));
        assert!(out.ends_with("Reassigned 2 weights\n"));
    }

    #[test]
    fn settle_tied_weights_declined() {
        let mut store = tied_store();
        let mut console = Console::new(Cursor::new(b"n\n".to_vec()), Vec::new(), false);
        assert_eq!(settle_tied_weights(&mut store, &mut console), 0);
        assert_eq!(store.tied_weight_groups(), ["gumian"]);
        assert!(!store.is_modified());
    }

    #[test]
    fn settle_tied_weights_silent_without_ties() {
        let text = "---\nname: t\n...\n日\tri\n";
        let mut store = DictStore::from_text(text, &Settings::default().load).unwrap();
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new(), false);
        assert_eq!(settle_tied_weights(&mut store, &mut console), 0);
        assert!(console.into_output().is_empty());
    }

    #[test]
    fn empty_list_formats_to_nothing() {
        assert_eq!(format_entries(&[]), "");
    }

    #[test]
    fn save_order_follows_settings() {
        let mut settings = Settings::default();
        assert!(SaveOptions::default().sorted(&settings));
        let unsorted = SaveOptions {
            unsorted: true,
            ..Default::default()
        };
        assert!(!unsorted.sorted(&settings));
        settings.save.sorted = false;
        assert!(!SaveOptions::default().sorted(&settings));
    }
}
