//! Directory-scoped override resolution.
//!
//! Walks a target path's ancestor chain for override-declaration files,
//! parses and caches them, and answers which disposition (if any) the
//! nearest declaration assigns to the path. Precedence: a rule in a closer
//! ancestor directory always outranks a rule in a farther one, regardless
//! of pattern specificity; within one file, earlier-declared rules win.

mod rules;

pub use rules::{OverrideFile, OverrideRule};

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::file::Disposition;

/// Default name of the per-directory override-declaration file.
pub const DEFAULT_OVERRIDE_FILENAME: &str = ".yo-resolve";

/// Errors raised while resolving override rules.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An override-declaration file exists but could not be read.
    #[error("error loading override file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A declared pattern does not compile to a glob.
    #[error("invalid pattern {pattern:?} in override file {}: {source}", path.display())]
    Pattern {
        path: PathBuf,
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A matched override rule together with its provenance.
#[derive(Debug)]
pub struct RuleMatch<'a> {
    /// Status the rule assigns.
    pub disposition: &'a Disposition,

    /// The absolute glob that matched.
    pub pattern: &'a str,

    /// The override file that declared the rule.
    pub declared_in: &'a Path,
}

/// Resolves per-file dispositions from override-declaration files found in
/// ancestor directories.
///
/// Parsed files are cached for the lifetime of the resolver: each
/// declaration file is read and parsed at most once, however many candidate
/// files resolve through it. A resolver is therefore scoped to a single
/// scaffolding run and must not be shared across concurrent runs.
#[derive(Debug)]
pub struct OverrideResolver {
    filename: String,
    cache: HashMap<PathBuf, OverrideFile>,
}

impl Default for OverrideResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideResolver {
    /// Resolver using [`DEFAULT_OVERRIDE_FILENAME`].
    pub fn new() -> Self {
        Self::with_filename(DEFAULT_OVERRIDE_FILENAME)
    }

    /// Resolver using a custom declaration filename.
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            cache: HashMap::new(),
        }
    }

    /// Declaration filename this resolver looks for.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declaration files in the target's ancestor directories, nearest
    /// first, up to the filesystem root.
    fn discover(&self, target: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut dir = target.parent();
        while let Some(current) = dir {
            let candidate = current.join(&self.filename);
            if candidate.is_file() {
                found.push(candidate);
            }
            dir = current.parent();
        }
        found
    }

    /// Disposition the nearest matching rule assigns to `target`, if any.
    /// `None` means no rule matched and the caller's own logic applies.
    pub fn resolve(&mut self, target: &Path) -> Result<Option<Disposition>, ResolveError> {
        Ok(self.lookup(target)?.map(|m| m.disposition.clone()))
    }

    /// Like [`OverrideResolver::resolve`], additionally exposing the
    /// matched rule's pattern and declaring file.
    pub fn lookup(&mut self, target: &Path) -> Result<Option<RuleMatch<'_>>, ResolveError> {
        let files = self.discover(target);
        for path in &files {
            if !self.cache.contains_key(path) {
                let parsed = OverrideFile::load(path)?;
                self.cache.insert(path.clone(), parsed);
            }
        }
        for path in &files {
            let Some(file) = self.cache.get(path) else {
                continue;
            };
            if let Some(rule) = file.first_match(target) {
                debug!(
                    target = %target.display(),
                    pattern = rule.pattern.as_str(),
                    declared_in = %file.path.display(),
                    disposition = %rule.disposition,
                    "override rule matched"
                );
                return Ok(Some(RuleMatch {
                    disposition: &rule.disposition,
                    pattern: &rule.pattern,
                    declared_in: &file.path,
                }));
            }
        }
        Ok(None)
    }
}
