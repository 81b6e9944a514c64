//! Word encoders built on a single-character code table.
//!
//! An `Encoder` pairs a `Scheme` with the `CharCodes` table loaded for it.
//! Encoding picks up to four covered characters of a word (the first three
//! and the last one) and projects their code fragments into fixed slots,
//! taking every combination of each character's alternative fragments.

mod char_codes;
mod scheme;

pub use char_codes::{load_char_codes, CharCodes};
pub use scheme::Scheme;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown encoding scheme: {0}")]
    UnknownScheme(String),

    #[error("character table covers no characters")]
    EmptyTable,

    #[error("{ch:?} has a code fragment shorter than {len} characters")]
    ShortFragment { ch: char, len: usize },

    #[error("code length {len} is outside {min}..={max}")]
    LengthOutOfRange { len: usize, min: usize, max: usize },

    #[error("{0:?} has a fixed code length and cannot shorten codes")]
    FixedLength(Scheme),
}

/// Covered character count and code length range of an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSpec {
    pub char_count: usize,
    pub min_len: usize,
    pub max_len: usize,
}

pub struct Encoder {
    scheme: Scheme,
    chars: CharCodes,
}

impl Encoder {
    /// Bind `scheme` to a table. Every character needs at least one
    /// fragment, and every fragment at least `scheme.fragment_len()`
    /// characters.
    pub fn new(scheme: Scheme, chars: CharCodes) -> Result<Self, EncodeError> {
        if chars.is_empty() {
            return Err(EncodeError::EmptyTable);
        }
        let len = scheme.fragment_len();
        if let Some((&ch, _)) = chars
            .iter()
            .find(|(_, alts)| alts.is_empty() || alts.iter().any(|f| f.chars().count() < len))
        {
            return Err(EncodeError::ShortFragment { ch, len });
        }
        Ok(Self { scheme, chars })
    }

    pub fn from_lines<'a>(
        scheme: Scheme,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, EncodeError> {
        Self::new(scheme, load_char_codes(lines, scheme.fragment_len()))
    }

    /// Load the character table for `scheme` from a single-character source.
    pub fn open(scheme: Scheme, path: &Path) -> Result<Self, EncodeError> {
        let text = fs::read_to_string(path)?;
        let encoder = Self::from_lines(scheme, text.lines())?;
        info!(
            ?scheme,
            path = %path.display(),
            chars = encoder.chars.len(),
            "loaded character table"
        );
        Ok(encoder)
    }

    /// Build the encoder for a named input method (see `Scheme::names`).
    pub fn build(name: &str, path: &Path) -> Result<Self, EncodeError> {
        let scheme =
            Scheme::from_name(name).ok_or_else(|| EncodeError::UnknownScheme(name.to_string()))?;
        Self::open(scheme, path)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn char_codes(&self) -> &CharCodes {
        &self.chars
    }

    pub fn spec(&self) -> EncoderSpec {
        let (min_len, max_len) = self.scheme.len_range();
        EncoderSpec {
            char_count: self.chars.len(),
            min_len,
            max_len,
        }
    }

    /// Code fragments of the first three and the last covered character.
    ///
    /// With fewer than four covered characters, all of them. The last one
    /// is searched backward from the end of the word, never reaching a
    /// character already taken by the forward scan.
    fn select(&self, word: &str) -> Vec<&[String]> {
        let chars: Vec<char> = word.chars().collect();
        let mut picked: Vec<&[String]> = Vec::with_capacity(4);
        let mut next = 0;
        while next < chars.len() && picked.len() < 4 {
            if let Some(codes) = self.chars.get(&chars[next]) {
                picked.push(codes.as_slice());
            }
            next += 1;
        }
        if picked.len() == 4 {
            if let Some(last) = chars[next..].iter().rev().find_map(|c| self.chars.get(c)) {
                picked[3] = last.as_slice();
            }
        }
        picked
    }

    /// Every distinct full code of `word`, in a deterministic order.
    /// Empty when fewer than two characters of the word are covered.
    pub fn encode(&self, word: &str) -> Vec<String> {
        let selected = self.select(word);
        let slots = self.scheme.slots(selected.len());
        if slots.is_empty() {
            return Vec::new();
        }

        let fragments: Vec<Vec<Vec<char>>> = selected
            .iter()
            .map(|alts| alts.iter().map(|f| f.chars().collect()).collect())
            .collect();

        let mut seen = HashSet::new();
        let mut codes = Vec::new();
        // Odometer over one alternative per selected character.
        let mut choice = vec![0usize; fragments.len()];
        loop {
            let code: String = slots
                .iter()
                .map(|&(c, p)| fragments[c][choice[c]][p])
                .collect();
            if seen.insert(code.clone()) {
                codes.push(code);
            }

            let mut digit = choice.len();
            loop {
                if digit == 0 {
                    return codes;
                }
                digit -= 1;
                choice[digit] += 1;
                if choice[digit] < fragments[digit].len() {
                    break;
                }
                choice[digit] = 0;
            }
        }
    }

    /// Short forms of length `len` for a set of full codes, deduplicated.
    ///
    /// Only variable-length schemes shorten. `len` equal to the maximum
    /// returns the codes as they are.
    pub fn shorten(&self, full_codes: &[String], len: usize) -> Result<Vec<String>, EncodeError> {
        if !self.scheme.is_variable() {
            return Err(EncodeError::FixedLength(self.scheme));
        }
        let (min, max) = self.scheme.len_range();
        if len < min || len > max {
            return Err(EncodeError::LengthOutOfRange { len, min, max });
        }

        let mut seen = HashSet::new();
        Ok(full_codes
            .iter()
            .map(|c| {
                if len == max {
                    c.clone()
                } else {
                    c.chars().take(len).collect()
                }
            })
            .filter(|c| seen.insert(c.clone()))
            .collect())
    }
}
