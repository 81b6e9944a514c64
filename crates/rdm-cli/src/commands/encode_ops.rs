use std::collections::BTreeMap;
use std::path::Path;

use rdm_core::encoder::Encoder;
use rdm_core::settings::Settings;
use rdm_core::shorten::ShortenPlan;

use super::dict_ops::EntryArgs;
use super::{open_for_edit, parse_entry, save_store, SaveOptions};
use crate::prompt::Prompt;

/// Build the encoder named by `scheme`, or the one the settings select.
pub fn build_encoder(settings: &Settings, scheme: Option<&str>, chars: &Path) -> Encoder {
    let built = match scheme {
        Some(name) => Encoder::build(name, chars),
        None => Encoder::open(settings.encoder.scheme(), chars),
    };
    die!(
        built,
        "Error building {} encoder from {}: {}",
        scheme.unwrap_or(&settings.encoder.scheme),
        chars.display()
    )
}

pub fn encode(
    settings: &Settings,
    scheme: Option<&str>,
    chars: &Path,
    words: &[String],
    len: Option<usize>,
    json: bool,
) {
    let encoder = build_encoder(settings, scheme, chars);
    let mut results = BTreeMap::new();
    for word in words {
        let full = encoder.encode(word);
        let codes = match len {
            Some(len) => die!(encoder.shorten(&full, len), "Error: {}"),
            None => full,
        };
        if !json {
            if codes.is_empty() {
                println!("{word}\t(no code)");
            } else {
                println!("{word}\t{}", codes.join(" "));
            }
        }
        results.insert(word.as_str(), codes);
    }
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&results), "Error: {}")
        );
    }
}

/// Shorten one entry's code, moving the current holder of the target code.
#[allow(clippy::too_many_arguments)]
pub fn shorten(
    path: &Path,
    settings: &Settings,
    prompt: &mut dyn Prompt,
    scheme: Option<&str>,
    chars: &Path,
    target_entry: &EntryArgs,
    target: &str,
    opts: &SaveOptions,
) {
    let encoder = build_encoder(settings, scheme, chars);
    let entry = parse_entry(
        &target_entry.word,
        target_entry.code.as_deref(),
        target_entry.weight.as_deref(),
    );
    let mut store = open_for_edit(path, settings, prompt);

    let plan = match ShortenPlan::plan(&store, &encoder, &entry, target) {
        Ok(plan) => plan,
        Err(e) => {
            prompt.error(&e.to_string());
            if store.is_modified() {
                save_store(&mut store, settings, opts, prompt);
            }
            std::process::exit(1);
        }
    };

    prompt.info(&format!("  {}  ->  {}", plan.entry(), plan.new_entry()));
    if let Some((old, new)) = plan.occupant() {
        prompt.info(&format!("  {old}  ->  {new}"));
    }
    if prompt.confirm("Apply?") {
        let done = die!(plan.apply(&mut store), "Error: {}");
        prompt.info(&format!("Shortened: {}", done.entry));
    } else {
        prompt.info("Cancelled");
    }
    if store.is_modified() {
        save_store(&mut store, settings, opts, prompt);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rdm_core::encoder::Scheme;

    use super::*;

    #[test]
    fn build_encoder_follows_settings_unless_named() {
        let dir = tempfile::tempdir().unwrap();
        let chars = dir.path().join("single.dict.yaml");
        fs::write(&chars, "光\tguan\n明\tmina\n").unwrap();

        let mut settings = Settings::default();
        assert_eq!(build_encoder(&settings, None, &chars).scheme(), Scheme::Xkjd6);
        assert_eq!(
            build_encoder(&settings, Some("虎码"), &chars).scheme(),
            Scheme::Wubi
        );
        settings.encoder.scheme = "erbi".to_string();
        assert_eq!(build_encoder(&settings, None, &chars).scheme(), Scheme::Erbi);
    }
}
