//! Namespace grammar for generator identifiers.
//!
//! A namespace is a compact string naming a scaffolding unit: an optionally
//! scoped package name, a colon-delimited sub-generator path, a version
//! constraint, a running-instance id, invocation methods, and a modifier
//! flag. This crate parses that string into structured fields and
//! serializes it back, losslessly up to the canonical semver-termination
//! form.
//!
//! ```
//! use scaffold_namespace::Namespace;
//!
//! let ns = Namespace::parse("@myorg/generator:sub@^1.2.0#inst1+prompt+write?").unwrap();
//! assert_eq!(ns.scope.as_deref(), Some("myorg"));
//! assert_eq!(ns.unscoped, "generator");
//! assert_eq!(ns.id(), "@myorg/generator:sub#inst1");
//! ```

mod namespace;
mod parser;

pub use namespace::{Flag, Namespace, NamespaceUpdate};
