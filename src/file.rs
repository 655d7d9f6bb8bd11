//! Candidate-file data model shared by the pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Write decision applied to a candidate file.
///
/// `Force`, `Skip`, and `Identical` are the statuses this core interprets;
/// anything else an override file or the conflicter produces passes through
/// opaquely as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Disposition {
    /// Write unconditionally, overriding any collision.
    Force,
    /// Cancel the write.
    Skip,
    /// On-disk content already matches; nothing to do.
    Identical,
    /// Status not interpreted by this core, forwarded verbatim.
    Other(String),
}

impl Disposition {
    /// The wire string for this disposition.
    pub fn as_str(&self) -> &str {
        match self {
            Disposition::Force => "force",
            Disposition::Skip => "skip",
            Disposition::Identical => "identical",
            Disposition::Other(status) => status,
        }
    }
}

impl From<&str> for Disposition {
    fn from(status: &str) -> Self {
        match status {
            "force" => Disposition::Force,
            "skip" => Disposition::Skip,
            "identical" => Disposition::Identical,
            other => Disposition::Other(other.to_string()),
        }
    }
}

impl From<String> for Disposition {
    fn from(status: String) -> Self {
        Disposition::from(status.as_str())
    }
}

impl From<Disposition> for String {
    fn from(disposition: Disposition) -> Self {
        disposition.as_str().to_string()
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action a candidate file is queued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    /// File content is to be written.
    Write,
    /// File is to be deleted.
    Delete,
}

/// A file a scaffolding run wants to act on.
///
/// `pending == None` means no action is needed: the file passes through the
/// pipeline untouched. The pipeline sets `disposition`; the collision-check
/// stage decides files that still carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Absolute path of the file.
    pub path: PathBuf,

    /// Queued action, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingAction>,

    /// Decision applied so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,
}

impl CandidateFile {
    /// A file queued for write.
    pub fn pending_write(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: Some(PendingAction::Write),
            disposition: None,
        }
    }

    /// A file queued for deletion.
    pub fn pending_delete(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: Some(PendingAction::Delete),
            disposition: None,
        }
    }

    /// A file with no action needed.
    pub fn settled(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pending: None,
            disposition: None,
        }
    }

    /// Whether any action is still queued.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_wire_strings() {
        assert_eq!(Disposition::from("force"), Disposition::Force);
        assert_eq!(Disposition::from("skip"), Disposition::Skip);
        assert_eq!(Disposition::from("identical"), Disposition::Identical);
        assert_eq!(
            Disposition::from("create"),
            Disposition::Other("create".to_string())
        );
        assert_eq!(Disposition::Force.to_string(), "force");
        assert_eq!(Disposition::Other("conflict".to_string()).to_string(), "conflict");
    }

    #[test]
    fn test_disposition_serializes_as_string() {
        let json = serde_json::to_string(&Disposition::Force).unwrap();
        assert_eq!(json, "\"force\"");
        let back: Disposition = serde_json::from_str("\"create\"").unwrap();
        assert_eq!(back, Disposition::Other("create".to_string()));
    }

    #[test]
    fn test_candidate_constructors() {
        let file = CandidateFile::pending_write("/proj/src/a.json");
        assert!(file.is_pending());
        assert_eq!(file.pending, Some(PendingAction::Write));
        assert!(file.disposition.is_none());

        let file = CandidateFile::pending_delete("/proj/old.txt");
        assert_eq!(file.pending, Some(PendingAction::Delete));

        let file = CandidateFile::settled("/proj/untouched.txt");
        assert!(!file.is_pending());
    }

    #[test]
    fn test_candidate_json_shape() {
        let file = CandidateFile::pending_write("/proj/src/a.json");
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"pending\":\"write\""));
        assert!(!json.contains("disposition"));
    }
}
