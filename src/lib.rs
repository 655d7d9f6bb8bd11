//! Scaffold Gate - write-disposition gating for scaffolding runs.
//!
//! This crate decides, for each file a scaffolding run wants to write,
//! whether that write should proceed, be forced, or be skipped. Decisions
//! come from author-declared override files found in ancestor directories
//! (`.yo-resolve`), with configuration stores force-written and everything
//! still undecided delegated to an external collision arbiter.

pub mod conflicter;
pub mod file;
pub mod pipeline;
pub mod resolve;

pub use conflicter::{Conflicter, ConflicterError};
pub use file::{CandidateFile, Disposition, PendingAction};
pub use pipeline::{DecisionPipeline, Flow, PipelineError};
pub use resolve::{OverrideResolver, ResolveError, RuleMatch, DEFAULT_OVERRIDE_FILENAME};

pub use scaffold_namespace::{Flag, Namespace, NamespaceUpdate};
