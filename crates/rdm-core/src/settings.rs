//! Settings loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_settings.toml")` and
//! checked by `build.rs`. A custom file replaces them wholesale; every
//! section must be present.

use serde::Deserialize;

use crate::encoder::Scheme;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub load: LoadSettings,
    pub save: SaveSettings,
    pub encoder: EncoderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadSettings {
    pub parse_threads: usize,
    pub min_lines_per_thread: usize,
}

impl LoadSettings {
    /// Worker count for parsing `lines` body lines.
    pub fn threads_for(&self, lines: usize) -> usize {
        let max = match self.parse_threads {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        };
        (lines / self.min_lines_per_thread.max(1)).clamp(1, max)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveSettings {
    pub sorted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncoderSettings {
    pub scheme: String,
}

impl EncoderSettings {
    pub fn scheme(&self) -> Scheme {
        Scheme::from_name(&self.scheme).unwrap_or(Scheme::Xkjd6)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(load.min_lines_per_thread);

    if Scheme::from_name(&s.encoder.scheme).is_none() {
        return Err(SettingsError::InvalidValue {
            field: "encoder.scheme".to_string(),
            reason: format!("unknown scheme {:?}", s.encoder.scheme),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.load.parse_threads, 0);
        assert_eq!(s.load.min_lines_per_thread, 4096);
        assert!(s.save.sorted);
        assert_eq!(s.encoder.scheme(), Scheme::Xkjd6);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[load]
parse_threads = 2
min_lines_per_thread = 100

[save]
sorted = false

[encoder]
scheme = "五笔"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.load.parse_threads, 2);
        assert!(!s.save.sorted);
        assert_eq!(s.encoder.scheme(), Scheme::Wubi);
    }

    #[test]
    fn threads_for_respects_bounds() {
        let load = LoadSettings {
            parse_threads: 4,
            min_lines_per_thread: 100,
        };
        assert_eq!(load.threads_for(0), 1);
        assert_eq!(load.threads_for(99), 1);
        assert_eq!(load.threads_for(250), 2);
        assert_eq!(load.threads_for(100_000), 4);
    }

    #[test]
    fn threads_for_zero_min_lines() {
        let load = LoadSettings {
            parse_threads: 3,
            min_lines_per_thread: 0,
        };
        assert_eq!(load.threads_for(0), 1);
        assert_eq!(load.threads_for(2), 2);
        assert_eq!(load.threads_for(10), 3);
    }

    #[test]
    fn error_zero_min_lines() {
        let toml = r#"
[load]
parse_threads = 0
min_lines_per_thread = 0

[save]
sorted = true

[encoder]
scheme = "xkjd6"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("load.min_lines_per_thread"));
    }

    #[test]
    fn error_unknown_scheme() {
        let toml = r#"
[load]
parse_threads = 0
min_lines_per_thread = 10

[save]
sorted = true

[encoder]
scheme = "cangjie"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("encoder.scheme"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[load]
parse_threads = 0
min_lines_per_thread = 10
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
