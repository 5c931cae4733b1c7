//! Shared Flywheel REST resource types for fwtag.
//!
//! This crate is the single source of truth for the request/response shapes
//! exchanged with a Flywheel server. The client and CLI import these types
//! directly; nothing here issues network calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Containers ──────────────────────────────────────────────────────────────

/// A Flywheel project (top-level data container).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// A scan session belonging to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Subject metadata attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// An acquisition (one scan series) within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acquisition {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// An analysis run against a project, carrying its output files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

// ─── Files ───────────────────────────────────────────────────────────────────

/// A file attached to a container, as listed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,
}

/// Identifier pair naming one taggable analysis file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub analysis_id: String,
    pub name: String,
}

impl FileRef {
    pub fn new(analysis_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            analysis_id: analysis_id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.analysis_id, self.name)
    }
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// JSON body for `POST /projects/{id}/file/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEnvelope {
    pub name: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub content: String,
}
