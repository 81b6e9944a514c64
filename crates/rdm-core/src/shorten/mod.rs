//! Shortening an entry's code, re-lengthening whatever entry holds the
//! target code.
//!
//! A `ShortenPlan` is computed against the store without touching it. The
//! plan is then applied as one edit batch: both removals, then both
//! insertions. If the batch cannot apply, the store is left unchanged.


use tracing::{debug, info};

use crate::dict::{BatchError, DictStore, Edit, Entry};
use crate::encoder::{EncodeError, Encoder};

#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("{target:?} is not shorter than the current code {current:?}")]
    NotShorter { target: String, current: String },

    #[error("{target:?} is not a legal short form of {word}")]
    NotLegalShortForm { target: String, word: String },

    #[error("target code {0:?} is held by more than one entry")]
    Ambiguous(String),

    #[error("re-encoding {word} at length {len} is not unique")]
    NotUnique { word: String, len: usize },

    #[error("no free longer code for {0}")]
    NoFreeCode(String),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Entries as stored after a successful shorten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    pub entry: Entry,
    /// The former holder of the target code, with its new code.
    pub occupant: Option<Entry>,
}

/// A validated shorten, ready to apply.
#[derive(Debug, Clone)]
pub struct ShortenPlan {
    entry: Entry,
    new_entry: Entry,
    /// (current, reassigned) holder of the target code.
    occupant: Option<(Entry, Entry)>,
}

impl ShortenPlan {
    /// Plan moving `entry` to the shorter code `target`.
    ///
    /// `target` must be one of the encoder's short forms for the entry's
    /// word. An entry already holding `target` either swaps into the
    /// entry's current code, when that is one of its own forms at that
    /// length, or moves to the shortest longer form that is unique and free.
    pub fn plan(
        store: &DictStore,
        encoder: &Encoder,
        entry: &Entry,
        target: &str,
    ) -> Result<Self, ShortenError> {
        let stored = store
            .find(entry)
            .cloned()
            .ok_or_else(|| ShortenError::NotFound(entry.to_string()))?;
        let current = stored.code().unwrap_or_default().to_string();
        let target_len = target.chars().count();
        let current_len = current.chars().count();
        if target_len >= current_len {
            return Err(ShortenError::NotShorter {
                target: target.to_string(),
                current,
            });
        }

        let forms = encoder.shorten(&encoder.encode(stored.word()), target_len)?;
        if !forms.iter().any(|f| f == target) {
            return Err(ShortenError::NotLegalShortForm {
                target: target.to_string(),
                word: stored.word().to_string(),
            });
        }

        let occupants: Vec<&Entry> = store
            .search_by_code(target, true)
            .into_iter()
            .filter(|e| !e.same_as(&stored))
            .collect();
        let occupant = match occupants.as_slice() {
            [] => None,
            [holder] => {
                let code = reassign(store, encoder, holder, target_len, &current)?;
                Some(((*holder).clone(), holder.with_code(&code)))
            }
            _ => return Err(ShortenError::Ambiguous(target.to_string())),
        };

        debug!(
            entry = %stored,
            target,
            occupant = ?occupant.as_ref().map(|(_, new)| new.to_string()),
            "planned shorten"
        );
        Ok(Self {
            new_entry: stored.with_code(target),
            entry: stored,
            occupant,
        })
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn new_entry(&self) -> &Entry {
        &self.new_entry
    }

    pub fn occupant(&self) -> Option<(&Entry, &Entry)> {
        self.occupant.as_ref().map(|(old, new)| (old, new))
    }

    /// Removals first, so a swap never collides with itself.
    pub fn edits(&self) -> Vec<Edit> {
        let mut edits = vec![Edit::Remove(self.entry.clone())];
        if let Some((old, _)) = &self.occupant {
            edits.push(Edit::Remove(old.clone()));
        }
        edits.push(Edit::Insert(self.new_entry.clone()));
        if let Some((_, new)) = &self.occupant {
            edits.push(Edit::Insert(new.clone()));
        }
        edits
    }

    pub fn apply(self, store: &mut DictStore) -> Result<Shortened, ShortenError> {
        store.apply(self.edits())?;
        info!(
            entry = %self.new_entry,
            occupant = ?self.occupant.as_ref().map(|(_, new)| new.to_string()),
            "shortened code"
        );
        Ok(Shortened {
            entry: self.new_entry,
            occupant: self.occupant.map(|(_, new)| new),
        })
    }
}

/// New code for `holder`, which gives up a code of `short_len` characters.
fn reassign(
    store: &DictStore,
    encoder: &Encoder,
    holder: &Entry,
    short_len: usize,
    freed: &str,
) -> Result<String, ShortenError> {
    let full = encoder.encode(holder.word());
    let (min, max) = encoder.scheme().len_range();

    let freed_len = freed.chars().count();
    if (min..=max).contains(&freed_len)
        && encoder
            .shorten(&full, freed_len)?
            .iter()
            .any(|c| c == freed)
    {
        return Ok(freed.to_string());
    }

    for len in short_len + 1..=max {
        match encoder.shorten(&full, len)?.as_slice() {
            [] => continue,
            [code] if !store.is_code_occupied(code) => return Ok(code.clone()),
            [_] => continue,
            _ => {
                return Err(ShortenError::NotUnique {
                    word: holder.word().to_string(),
                    len,
                })
            }
        }
    }
    Err(ShortenError::NoFreeCode(holder.word().to_string()))
}

/// Plan and apply in one call.
pub fn shorten(
    store: &mut DictStore,
    encoder: &Encoder,
    entry: &Entry,
    target: &str,
) -> Result<Shortened, ShortenError> {
    ShortenPlan::plan(store, encoder, entry, target)?.apply(store)
}
