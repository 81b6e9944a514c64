use std::fmt;

use serde::Serialize;

use super::DictError;

pub const COMMENT_MARKER: char = '#';

/// A dictionary record: a word with an optional code and weight.
///
/// `index` is the 0-based line position in the source file, `None` for
/// entries created after load. It takes part in save ordering only;
/// identity is (word, code, weight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<String>,
}

impl Entry {
    /// Build a new entry for insertion. Empty code or weight count as absent.
    pub fn new(word: &str, code: Option<&str>, weight: Option<&str>) -> Result<Self, DictError> {
        let code = code.filter(|c| !c.is_empty());
        let weight = weight.filter(|w| !w.is_empty());

        if word.is_empty() {
            return Err(DictError::InvalidEntry("word is empty".to_string()));
        }
        if word.starts_with(COMMENT_MARKER) {
            return Err(DictError::InvalidEntry(format!(
                "word {word:?} starts with the comment marker"
            )));
        }
        for field in [Some(word), code, weight].into_iter().flatten() {
            if field.contains(['\t', '\n', '\r']) {
                return Err(DictError::InvalidEntry(format!(
                    "{field:?} contains a tab or line break"
                )));
            }
        }
        if let Some(w) = weight {
            if code.is_none() {
                return Err(DictError::InvalidEntry(format!(
                    "weight {w:?} given without a code"
                )));
            }
            if !is_valid_weight(w) {
                return Err(DictError::InvalidEntry(format!(
                    "weight {w:?} is neither an integer nor a percentage"
                )));
            }
        }

        Ok(Self {
            index: None,
            word: word.to_string(),
            code: code.map(str::to_string),
            weight: weight.map(str::to_string),
        })
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn weight(&self) -> Option<&str> {
        self.weight.as_deref()
    }

    /// Numeric weight used to detect ties: absent is 0, `"12.5%"` is 12.5,
    /// unparsable text is 0.
    pub fn weight_value(&self) -> f64 {
        self.weight
            .as_deref()
            .and_then(|w| w.strip_suffix('%').unwrap_or(w).parse().ok())
            .unwrap_or(0.0)
    }

    /// Same word, code and weight; the source index is ignored.
    pub fn same_as(&self, other: &Entry) -> bool {
        self.word == other.word && self.code == other.code && self.weight == other.weight
    }

    /// Copy with a different code. Keeps index and weight.
    pub fn with_code(&self, code: &str) -> Entry {
        Entry {
            code: Some(code.to_string()),
            ..self.clone()
        }
    }

    /// Copy with a different weight. Keeps index and code.
    pub fn with_weight(&self, weight: Option<&str>) -> Entry {
        Entry {
            weight: weight.map(str::to_string),
            ..self.clone()
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.weight) {
            (None, None) => f.write_str(&self.word),
            (Some(code), None) => write!(f, "{}\t{}", self.word, code),
            (Some(code), Some(weight)) => write!(f, "{}\t{}\t{}", self.word, code, weight),
            (None, Some(_)) => unreachable!("entry {:?} has a weight but no code", self.word),
        }
    }
}

/// One line of a dictionary source after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank { index: usize },
    Comment { index: usize, text: String },
    Entry(Entry),
}

impl Line {
    /// Parse the line at 0-based `index`.
    ///
    /// Entry lines hold at most three tab-separated fields and a non-empty
    /// word; anything else is a `DictError::Format` naming the 1-based line.
    pub fn parse(index: usize, raw: &str) -> Result<Line, DictError> {
        if raw.is_empty() {
            return Ok(Line::Blank { index });
        }
        if raw.starts_with(COMMENT_MARKER) {
            return Ok(Line::Comment {
                index,
                text: raw.to_string(),
            });
        }

        let malformed = || DictError::Format {
            line: index + 1,
            text: raw.to_string(),
        };
        let fields: Vec<&str> = raw.splitn(4, '\t').collect();
        if fields.len() > 3 || fields[0].is_empty() {
            return Err(malformed());
        }

        Ok(Line::Entry(Entry {
            index: Some(index),
            word: fields[0].to_string(),
            code: fields.get(1).map(|s| s.to_string()),
            weight: fields.get(2).map(|s| s.to_string()),
        }))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Line::Blank { index } | Line::Comment { index, .. } => Some(*index),
            Line::Entry(e) => e.index,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Blank { .. } => Ok(()),
            Line::Comment { text, .. } => f.write_str(text),
            Line::Entry(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// A weight is a non-negative integer or a decimal number followed by `%`.
pub fn is_valid_weight(weight: &str) -> bool {
    match weight.strip_suffix('%') {
        Some(number) => {
            let mut parts = number.splitn(2, '.');
            let int = parts.next().unwrap_or("");
            let frac = parts.next();
            is_digits(int) && frac.map_or(true, is_digits)
        }
        None => is_digits(weight),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
