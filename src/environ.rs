//! `KEY=VALUE` environment list handed to the exec'd child.
//!
//! Entries are kept as raw `OsString`s so that inherited variables that are not
//! valid UTF-8 survive the round trip to `execve` untouched. Order carries no
//! meaning: `unset` swaps the last entry into the freed slot.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environ {
    entries: Vec<OsString>,
}

fn entry_has_key(entry: &OsStr, key: &str) -> bool {
    let bytes = entry.as_bytes();
    let key = key.as_bytes();
    bytes.len() > key.len() && bytes.starts_with(key) && bytes[key.len()] == b'='
}

impl Environ {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the current process environment.
    pub fn from_process() -> Self {
        let entries = std::env::vars_os()
            .map(|(k, v)| {
                let mut e = k;
                e.push("=");
                e.push(v);
                e
            })
            .collect();
        Self { entries }
    }

    /// Build from preformatted `KEY=VALUE` entries, kept as given.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// True iff an entry starting with `key=` exists.
    pub fn is_set(&self, key: &str) -> bool {
        self.entries.iter().any(|e| entry_has_key(e, key))
    }

    /// Value of the first entry carrying `key`.
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.entries
            .iter()
            .find(|e| entry_has_key(e, key))
            .map(|e| OsStr::from_bytes(&e.as_bytes()[key.len() + 1..]))
    }

    /// Replace every entry for `key` with a single `key=value`.
    pub fn set(&mut self, key: &str, value: impl AsRef<OsStr>) {
        self.entries.retain(|e| !entry_has_key(e, key));
        let mut entry = OsString::from(key);
        entry.push("=");
        entry.push(value.as_ref());
        self.entries.push(entry);
    }

    /// Remove the first entry for `key`, if any.
    pub fn unset(&mut self, key: &str) {
        if let Some(pos) = self.entries.iter().position(|e| entry_has_key(e, key)) {
            self.entries.swap_remove(pos);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        self.entries.iter().map(OsString::as_os_str)
    }

    pub fn into_entries(self) -> Vec<OsString> {
        self.entries
    }

    /// Raw bytes of every entry, in list order.
    pub fn into_byte_entries(self) -> Vec<Vec<u8>> {
        self.entries.into_iter().map(OsStringExt::into_vec).collect()
    }
}
