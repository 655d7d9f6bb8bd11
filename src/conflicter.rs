//! Boundary to the external collision-arbitration capability.

use crate::file::{CandidateFile, Disposition};

/// Error produced by a conflicter implementation, propagated verbatim.
pub type ConflicterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// External capability that arbitrates file-write collisions the override
/// rules did not pre-decide.
///
/// Implementations may coordinate a shared interactive session, so calls are
/// strictly serialized: one file's arbitration completes before the next
/// file enters the collision-check stage.
pub trait Conflicter {
    /// Decide the disposition for `file`. May involve interactive
    /// arbitration; errors abort the file's processing and are never
    /// retried.
    fn check_for_collision(&mut self, file: &CandidateFile) -> Result<Disposition, ConflicterError>;

    /// Flush hook, triggered once per pending file processed. Side-effects
    /// only; the pipeline consumes no return value.
    fn resolve(&mut self);
}
