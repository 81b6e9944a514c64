use std::collections::HashMap;

use super::Entry;

/// One step of an all-or-nothing edit batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(Entry),
    Remove(Entry),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("edit #{position}: entry already present: {entry}")]
    Duplicate { position: usize, entry: String },

    #[error("edit #{position}: entry not found: {entry}")]
    Missing { position: usize, entry: String },
}

type Key<'a> = (&'a str, Option<&'a str>, Option<&'a str>);

fn key(entry: &Entry) -> Key<'_> {
    (entry.word(), entry.code(), entry.weight())
}

/// Check `edits` in order against `present` plus the effect of earlier edits.
pub(super) fn validate(
    edits: &[Edit],
    present: impl Fn(&Entry) -> bool,
) -> Result<(), BatchError> {
    let mut overlay: HashMap<Key<'_>, bool> = HashMap::new();
    for (position, edit) in edits.iter().enumerate() {
        match edit {
            Edit::Insert(e) => {
                let k = key(e);
                if overlay.get(&k).copied().unwrap_or_else(|| present(e)) {
                    return Err(BatchError::Duplicate {
                        position,
                        entry: e.to_string(),
                    });
                }
                overlay.insert(k, true);
            }
            Edit::Remove(e) => {
                let k = key(e);
                if !overlay.get(&k).copied().unwrap_or_else(|| present(e)) {
                    return Err(BatchError::Missing {
                        position,
                        entry: e.to_string(),
                    });
                }
                overlay.insert(k, false);
            }
        }
    }
    Ok(())
}
