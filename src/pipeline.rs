//! Per-file decision pipeline.
//!
//! Three ordered stages applied to each candidate file: force-config,
//! override-resolution, collision-check. Files are processed strictly
//! sequentially in arrival order; each ends forwarded with a disposition,
//! suppressed, or errored.

use std::path::PathBuf;
use thiserror::Error;

use crate::conflicter::{Conflicter, ConflicterError};
use crate::file::{CandidateFile, Disposition};
use crate::resolve::{OverrideResolver, ResolveError};

/// Configuration-store filenames that must never reach collision
/// arbitration: they are force-written unconditionally.
const CONFIG_STORE_FILES: &[&str] = &[".yo-rc.json", ".yo-rc-global.json"];

/// Pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Override resolution failed for the file being processed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The conflicter reported an error during arbitration. Never retried:
    /// arbitration may be interactive.
    #[error("collision check failed for {}: {source}", path.display())]
    Collision {
        path: PathBuf,
        #[source]
        source: ConflicterError,
    },
}

/// Outcome of running one candidate file through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// The file proceeds downstream, carrying its disposition.
    Forwarded(CandidateFile),
    /// The write was cancelled; the pending state has been cleared.
    Suppressed(CandidateFile),
}

impl Flow {
    /// The forwarded file, if the write proceeds.
    pub fn forwarded(self) -> Option<CandidateFile> {
        match self {
            Flow::Forwarded(file) => Some(file),
            Flow::Suppressed(_) => None,
        }
    }
}

/// Applies the three decision stages to candidate files, one at a time.
///
/// Owns the [`OverrideResolver`] (and its cache) and the conflicter for the
/// duration of one scaffolding run; drop the pipeline to abort a run, no
/// state outlives it.
#[derive(Debug)]
pub struct DecisionPipeline<C> {
    resolver: OverrideResolver,
    conflicter: C,
}

impl<C: Conflicter> DecisionPipeline<C> {
    /// Pipeline with a default resolver.
    pub fn new(conflicter: C) -> Self {
        Self::with_resolver(OverrideResolver::new(), conflicter)
    }

    /// Pipeline with a custom resolver (e.g. a non-default override
    /// filename).
    pub fn with_resolver(resolver: OverrideResolver, conflicter: C) -> Self {
        Self { resolver, conflicter }
    }

    /// The conflicter, for callers that need to flush or inspect it after a
    /// run.
    pub fn conflicter(&self) -> &C {
        &self.conflicter
    }

    /// Run one candidate file through all stages.
    ///
    /// Files with no pending state pass through every stage untouched and
    /// are always forwarded.
    pub fn process(&mut self, file: CandidateFile) -> Result<Flow, PipelineError> {
        let file = force_config_stage(file);
        let file = self.override_stage(file)?;
        self.collision_stage(file)
    }

    /// Run files through the pipeline sequentially, in arrival order,
    /// collecting the forwarded ones. The first error terminates the run.
    pub fn process_all(
        &mut self,
        files: impl IntoIterator<Item = CandidateFile>,
    ) -> Result<Vec<CandidateFile>, PipelineError> {
        let mut forwarded = Vec::new();
        for file in files {
            if let Flow::Forwarded(file) = self.process(file)? {
                forwarded.push(file);
            }
        }
        Ok(forwarded)
    }

    /// Stage 2: consult the override rules for files that are pending and
    /// still undecided.
    fn override_stage(&mut self, mut file: CandidateFile) -> Result<CandidateFile, PipelineError> {
        if !file.is_pending() || file.disposition.is_some() {
            return Ok(file);
        }
        if let Some(disposition) = self.resolver.resolve(&file.path)? {
            file.disposition = Some(disposition);
        }
        Ok(file)
    }

    /// Stage 3: delegate pending files to the conflicter, then trigger its
    /// flush hook. A `skip` verdict clears the pending state and suppresses
    /// the file; anything else is carried downstream.
    fn collision_stage(&mut self, mut file: CandidateFile) -> Result<Flow, PipelineError> {
        if !file.is_pending() {
            return Ok(Flow::Forwarded(file));
        }
        let verdict = self.conflicter.check_for_collision(&file);
        self.conflicter.resolve();
        let disposition = verdict.map_err(|source| PipelineError::Collision {
            path: file.path.clone(),
            source,
        })?;
        if disposition == Disposition::Skip {
            file.pending = None;
            return Ok(Flow::Suppressed(file));
        }
        file.disposition = Some(disposition);
        Ok(Flow::Forwarded(file))
    }
}

/// Stage 1: configuration-store files are force-written, overriding
/// anything else. Files with no pending state pass through untouched.
fn force_config_stage(mut file: CandidateFile) -> CandidateFile {
    if !file.is_pending() {
        return file;
    }
    let is_config_store = file
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| CONFIG_STORE_FILES.contains(&name));
    if is_config_store {
        file.disposition = Some(Disposition::Force);
    }
    file
}
