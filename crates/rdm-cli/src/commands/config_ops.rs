use std::fs;

use rdm_core::encoder::Scheme;
use rdm_core::settings::{self, Settings};

/// Settings from `--config`, or the embedded defaults.
pub fn load_settings(file: Option<&str>) -> Settings {
    match file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            die!(settings::parse_settings_toml(&content), "Error in {file}: {}")
        }
        None => Settings::default(),
    }
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: load.parse_threads={}, load.min_lines_per_thread={}, save.sorted={}, encoder.scheme={}",
        s.load.parse_threads, s.load.min_lines_per_thread, s.save.sorted, s.encoder.scheme
    );
}

pub fn schemes() {
    for (id, name) in Scheme::names() {
        let Some(scheme) = Scheme::from_name(id) else {
            continue;
        };
        let (min, max) = scheme.len_range();
        let len = if min == max {
            max.to_string()
        } else {
            format!("{min}-{max}")
        };
        println!("{id:<7} {len:<4} {scheme:?}  {name}");
    }
}
