//! The namespace value type and its derived views.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::parser;

/// Single-character modifier flags a namespace can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// Trailing `?`: the namespace is optional and resolution failures are
    /// tolerated by the caller.
    Optional,
}

impl Flag {
    /// The wire character for this flag.
    pub fn as_char(self) -> char {
        match self {
            Flag::Optional => '?',
        }
    }
}

/// Structured generator identifier.
///
/// Fields mirror the grammar segments one to one. `scope` is stored without
/// its `@`/`/` delimiters, `generator` keeps its internal (and any trailing)
/// colons verbatim, `semver` is opaque, and an empty `methods` vector means
/// the segment was absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Package-scope prefix, without delimiters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Base package/generator name.
    pub unscoped: String,

    /// Colon-delimited sub-generator path inside the package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Version constraint, preserved verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semver: Option<String>,

    /// Identifier of a specific running instance, or `*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    /// Ordered invocation method names; empty means absent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,

    /// Modifier flag, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<Flag>,
}

/// Partial update consumed by [`Namespace::with`]. Absent fields never
/// erase existing data.
#[derive(Debug, Clone, Default)]
pub struct NamespaceUpdate {
    pub scope: Option<String>,
    pub unscoped: Option<String>,
    pub generator: Option<String>,
    pub semver: Option<String>,
    pub instance_id: Option<String>,
    pub methods: Option<Vec<String>>,
    pub flag: Option<Flag>,
}

impl Namespace {
    /// Parse a namespace string.
    ///
    /// Returns `None` when the input does not match the grammar. This is the
    /// expected soft-failure outcome, not an error: callers are expected to
    /// apply their own fallback strategy.
    pub fn parse(input: &str) -> Option<Self> {
        match parser::scan(input) {
            Some(ns) => {
                trace!(?ns, "parsed namespace");
                Some(ns)
            }
            None => {
                debug!(input, "namespace failed grammar parse, using fallback");
                None
            }
        }
    }

    /// `@scope/` when a scope is present, empty otherwise.
    fn scope_prefix(&self) -> String {
        match &self.scope {
            Some(scope) => format!("@{scope}/"),
            None => String::new(),
        }
    }

    /// `:generator` when a generator is present, empty otherwise.
    fn generator_suffix(&self) -> String {
        match &self.generator {
            Some(generator) => format!(":{generator}"),
            None => String::new(),
        }
    }

    /// `#instance` when an instance id is present, empty otherwise.
    fn instance_suffix(&self) -> String {
        match &self.instance_id {
            Some(id) => format!("#{id}"),
            None => String::new(),
        }
    }

    /// Scoped package name: `@scope/unscoped` or plain `unscoped`.
    pub fn package_namespace(&self) -> String {
        format!("{}{}", self.scope_prefix(), self.unscoped)
    }

    /// Package name plus generator path.
    pub fn namespace(&self) -> String {
        format!("{}{}", self.package_namespace(), self.generator_suffix())
    }

    /// Generator path without the scope.
    pub fn unscoped_namespace(&self) -> String {
        format!("{}{}", self.unscoped, self.generator_suffix())
    }

    /// Namespace plus instance marker; identifies one running occurrence.
    pub fn id(&self) -> String {
        format!("{}{}", self.namespace(), self.instance_suffix())
    }

    /// Package install hint: `[@scope/]generator-<unscoped>`.
    pub fn generator_hint(&self) -> String {
        format!("{}generator-{}", self.scope_prefix(), self.unscoped)
    }

    /// Install hint with the version constraint attached, quoted for shell
    /// safety since constraints may contain spaces and `<`/`>`.
    pub fn versioned_hint(&self) -> String {
        match &self.semver {
            Some(semver) => format!("{}@\"{}\"", self.generator_hint(), semver),
            None => self.generator_hint(),
        }
    }

    /// Whether the optional flag is set.
    pub fn is_optional(&self) -> bool {
        self.flag == Some(Flag::Optional)
    }

    /// Produce a new namespace from a full shallow snapshot of this one,
    /// overwritten by the fields present in `update`.
    pub fn with(&self, update: NamespaceUpdate) -> Namespace {
        Namespace {
            scope: update.scope.or_else(|| self.scope.clone()),
            unscoped: update.unscoped.unwrap_or_else(|| self.unscoped.clone()),
            generator: update.generator.or_else(|| self.generator.clone()),
            semver: update.semver.or_else(|| self.semver.clone()),
            instance_id: update.instance_id.or_else(|| self.instance_id.clone()),
            methods: update.methods.unwrap_or_else(|| self.methods.clone()),
            flag: update.flag.or(self.flag),
        }
    }

    /// Re-parse `namespace` and merge the fields the parse produced into
    /// this value; fields the parse left absent keep their current value.
    /// Unparseable input leaves the value unchanged.
    pub fn set_namespace(&mut self, namespace: &str) {
        let Some(parsed) = Namespace::parse(namespace) else {
            return;
        };
        if parsed.scope.is_some() {
            self.scope = parsed.scope;
        }
        self.unscoped = parsed.unscoped;
        if parsed.generator.is_some() {
            self.generator = parsed.generator;
        }
        if parsed.semver.is_some() {
            self.semver = parsed.semver;
        }
        if parsed.instance_id.is_some() {
            self.instance_id = parsed.instance_id;
        }
        if !parsed.methods.is_empty() {
            self.methods = parsed.methods;
        }
        if parsed.flag.is_some() {
            self.flag = parsed.flag;
        }
    }
}

impl fmt::Display for Namespace {
    /// Canonical serialized form. The semver segment is closed with a bare
    /// `@` exactly when instance/method/flag data follows, so the trailing
    /// data cannot be mistaken for constraint characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace())?;

        let mut post = self.instance_suffix();
        for method in &self.methods {
            post.push('+');
            post.push_str(method);
        }
        if let Some(flag) = self.flag {
            post.push(flag.as_char());
        }

        match &self.semver {
            Some(semver) if !post.is_empty() => write!(f, "@{semver}@{post}"),
            Some(semver) => write!(f, "@{semver}"),
            None => f.write_str(&post),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> Namespace {
        Namespace::parse(input).unwrap()
    }

    #[test]
    fn test_roundtrip_canonical() {
        let input = "@myorg/generator:sub@^1.2.0@#inst1+prompt+write?";
        let ns = parsed(input);
        assert_eq!(ns.to_string(), input);
        assert_eq!(parsed(&ns.to_string()), ns);
    }

    #[test]
    fn test_roundtrip_alternate_semver_termination() {
        // Accepted without the terminating "@", serialized with it.
        let ns = parsed("@myorg/generator:sub@^1.2.0#inst1+prompt+write?");
        assert_eq!(ns.to_string(), "@myorg/generator:sub@^1.2.0@#inst1+prompt+write?");
        assert_eq!(parsed(&ns.to_string()), ns);
    }

    #[test]
    fn test_serialize_semver_without_trailing_data() {
        // No instance/methods/flag: no terminator.
        let ns = parsed("foo@^1.0.0");
        assert_eq!(ns.to_string(), "foo@^1.0.0");
    }

    #[test]
    fn test_roundtrip_minimal() {
        let ns = parsed("foo");
        assert_eq!(ns.to_string(), "foo");
        assert_eq!(parsed("foo"), ns);
    }

    #[test]
    fn test_package_namespace_views() {
        let ns = parsed("@myorg/app:client:web");
        assert_eq!(ns.package_namespace(), "@myorg/app");
        assert_eq!(ns.namespace(), "@myorg/app:client:web");
        assert_eq!(ns.unscoped_namespace(), "app:client:web");
    }

    #[test]
    fn test_id_includes_instance() {
        let ns = parsed("@myorg/app:client#one");
        assert_eq!(ns.id(), "@myorg/app:client#one");
        let ns = parsed("@myorg/app:client");
        assert_eq!(ns.id(), "@myorg/app:client");
    }

    #[test]
    fn test_generator_hint() {
        assert_eq!(parsed("foo").generator_hint(), "generator-foo");
        assert_eq!(parsed("@myorg/foo").generator_hint(), "@myorg/generator-foo");
    }

    #[test]
    fn test_versioned_hint_quotes_constraint() {
        let ns = parsed("foo@>=1.0.0 <2.0.0");
        assert_eq!(ns.versioned_hint(), "generator-foo@\">=1.0.0 <2.0.0\"");
        assert_eq!(parsed("foo").versioned_hint(), "generator-foo");
    }

    #[test]
    fn test_is_optional() {
        assert!(parsed("foo?").is_optional());
        assert!(!parsed("foo").is_optional());
    }

    #[test]
    fn test_with_overwrites_present_fields_only() {
        let ns = parsed("@myorg/app:client@^2.0.0");
        let updated = ns.with(NamespaceUpdate {
            instance_id: Some("run1".to_string()),
            methods: Some(vec!["prompt".to_string()]),
            ..Default::default()
        });
        assert_eq!(updated.scope.as_deref(), Some("myorg"));
        assert_eq!(updated.semver.as_deref(), Some("^2.0.0"));
        assert_eq!(updated.instance_id.as_deref(), Some("run1"));
        assert_eq!(updated.methods, vec!["prompt"]);
        // The original is untouched.
        assert!(ns.instance_id.is_none());
    }

    #[test]
    fn test_with_methods_given_as_sequence_serialize_identically() {
        let from_string = parsed("foo+prompt+write");
        let from_sequence = parsed("foo").with(NamespaceUpdate {
            methods: Some(vec!["prompt".to_string(), "write".to_string()]),
            ..Default::default()
        });
        assert_eq!(from_string.to_string(), from_sequence.to_string());
    }

    #[test]
    fn test_set_namespace_partial_merge() {
        let mut ns = parsed("@myorg/app:client#one");
        ns.set_namespace("bar:other");
        // Fields the parse did not produce keep their value.
        assert_eq!(ns.scope.as_deref(), Some("myorg"));
        assert_eq!(ns.instance_id.as_deref(), Some("one"));
        // Produced fields overwrite.
        assert_eq!(ns.unscoped, "bar");
        assert_eq!(ns.generator.as_deref(), Some("other"));
    }

    #[test]
    fn test_set_namespace_ignores_unparseable_input() {
        let mut ns = parsed("@myorg/app");
        ns.set_namespace("NOT A NAMESPACE");
        assert_eq!(ns, parsed("@myorg/app"));
    }

    #[test]
    fn test_json_roundtrip() {
        let ns = parsed("@myorg/generator:sub@^1.2.0@#inst1+prompt+write?");
        let json = serde_json::to_string(&ns).unwrap();
        let back: Namespace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ns);
        assert!(json.contains("\"instance_id\":\"inst1\""));
    }

    #[test]
    fn test_json_skips_absent_fields() {
        let json = serde_json::to_string(&parsed("foo")).unwrap();
        assert_eq!(json, "{\"unscoped\":\"foo\"}");
    }
}
