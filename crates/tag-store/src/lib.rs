//! Tag bookkeeping for labelled sets of analysis files.
//!
//! A [`TagStore`] keeps an ordered list of [`TagRecord`]s under a single
//! JSON-encoded key in a [`StorageBackend`]. Within one store, a given file
//! sequence carries at most one label: saving a record whose files match an
//! existing record overwrites that record's label in place instead of adding
//! a duplicate.

pub mod backend;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use fwtag_api_types::FileRef;

/// Backend key holding the JSON-encoded tag list.
pub const TAG_LIST_KEY: &str = "tagged_files";

/// A label paired with the exact sequence of files it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    pub files: Vec<FileRef>,
}

/// Unvalidated input to [`TagStore::save`].
///
/// Both fields are optional so that untrusted input (a half-filled form, a
/// decoded JSON body) can be handed to `save` directly and rejected there.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagDraft {
    pub tag: Option<String>,
    pub files: Option<Vec<FileRef>>,
}

impl TagDraft {
    pub fn new(tag: impl Into<String>, files: Vec<FileRef>) -> Self {
        Self {
            tag: Some(tag.into()),
            files: Some(files),
        }
    }
}

/// Tag list manager over an injected storage backend.
pub struct TagStore<B> {
    backend: B,
}

impl<B: StorageBackend> TagStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Current tag list; an absent key reads as an empty list.
    ///
    /// An unreadable payload is logged and treated as empty rather than
    /// failing the read.
    pub fn all_tags(&self) -> Result<Vec<TagRecord>> {
        let Some(raw) = self.backend.get(TAG_LIST_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("discarding unreadable tag list: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Save a tag record, keeping one label per distinct file sequence.
    ///
    /// Returns `Ok(false)` without touching stored state when the draft is
    /// missing its label or its files; an empty-string label is a value like
    /// any other. Otherwise every stored record
    /// whose files compare equal (order-sensitive, value-equal per entry) to
    /// the incoming files gets its label overwritten in place; the scan does
    /// not stop at the first hit, so a malformed list holding duplicate file
    /// sequences has all of them rewritten. When nothing matches, the new
    /// record is inserted at the front of the list.
    pub fn save(&mut self, draft: TagDraft) -> Result<bool> {
        let (tag, files) = match (draft.tag, draft.files) {
            (Some(tag), Some(files)) => (tag, files),
            _ => return Ok(false),
        };

        let mut records = self.all_tags()?;
        let mut matched = false;
        for record in &mut records {
            if record.files == files {
                record.tag = tag.clone();
                matched = true;
            }
        }
        if !matched {
            records.insert(0, TagRecord { tag, files });
        }

        let encoded = serde_json::to_string(&records)?;
        self.backend.set(TAG_LIST_KEY, &encoded)?;
        Ok(true)
    }

    /// Remove the stored list entirely; a following [`Self::all_tags`] is empty.
    pub fn delete_all(&mut self) -> Result<()> {
        self.backend.remove(TAG_LIST_KEY)
    }
}
