//! Override-declaration file parsing.
//!
//! One rule per line: `<pattern> [<status>]`. Everything from a `#` to the
//! end of the line is a comment, blank lines are skipped, and a missing
//! status defaults to `skip`. Patterns are globs relative to the declaring
//! file's directory and are stored resolved to absolute-path globs.

use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::ResolveError;
use crate::file::Disposition;

/// One glob pattern → disposition mapping.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    /// Absolute-path glob: the declaring file's directory joined with the
    /// declared pattern.
    pub pattern: String,

    /// Status assigned to matching paths.
    pub disposition: Disposition,

    matcher: GlobMatcher,
}

impl OverrideRule {
    /// Whether this rule's glob matches `path`.
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Parsed contents of one override-declaration file, rules kept in
/// declaration order.
#[derive(Debug, Clone)]
pub struct OverrideFile {
    /// Absolute path of the declaring file.
    pub path: PathBuf,

    rules: Vec<OverrideRule>,
}

impl OverrideFile {
    /// Read and parse the declaration file at `path`.
    ///
    /// A file that exists but cannot be read (permissions, race, encoding)
    /// fails the whole resolution call with [`ResolveError::Read`].
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let content = fs::read_to_string(path).map_err(|source| ResolveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(path, dir, &content)
    }

    fn parse(path: &Path, dir: &Path, content: &str) -> Result<Self, ResolveError> {
        let mut rules = Vec::new();
        for line in content.lines() {
            let line = line.split('#').next().unwrap_or(line).trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(pattern) = fields.next() else {
                continue;
            };
            // Second field is the status; anything after it is ignored.
            let disposition = fields
                .next()
                .map(Disposition::from)
                .unwrap_or(Disposition::Skip);
            let absolute = dir.join(pattern).to_string_lossy().into_owned();
            // Literal separator: `*` never crosses a directory boundary, so
            // a rule only reaches into subdirectories when it says so.
            let matcher = GlobBuilder::new(&absolute)
                .literal_separator(true)
                .build()
                .map_err(|source| ResolveError::Pattern {
                    path: path.to_path_buf(),
                    pattern: absolute.clone(),
                    source,
                })?
                .compile_matcher();
            rules.push(OverrideRule {
                pattern: absolute,
                disposition,
                matcher,
            });
        }
        debug!(path = %path.display(), rules = rules.len(), "parsed override file");
        Ok(Self {
            path: path.to_path_buf(),
            rules,
        })
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// First declared rule matching `target`, if any.
    pub fn first_match(&self, target: &Path) -> Option<&OverrideRule> {
        self.rules.iter().find(|rule| rule.matches(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(dir: &str, content: &str) -> OverrideFile {
        let path = Path::new(dir).join(".yo-resolve");
        OverrideFile::parse(&path, Path::new(dir), content).unwrap()
    }

    #[test]
    fn test_parse_pattern_and_status() {
        let file = parse("/proj", "src/*.json force\n*.log skip\n");
        assert_eq!(file.rules().len(), 2);
        assert_eq!(file.rules()[0].pattern, "/proj/src/*.json");
        assert_eq!(file.rules()[0].disposition, Disposition::Force);
        assert_eq!(file.rules()[1].pattern, "/proj/*.log");
        assert_eq!(file.rules()[1].disposition, Disposition::Skip);
    }

    #[test]
    fn test_parse_status_defaults_to_skip() {
        let file = parse("/proj", "generated/**\n");
        assert_eq!(file.rules()[0].disposition, Disposition::Skip);
    }

    #[test]
    fn test_parse_ignores_comments_and_blanks() {
        let content = "\n# full-line comment\nsrc/*.json force # trailing comment\n   \n";
        let file = parse("/proj", content);
        assert_eq!(file.rules().len(), 1);
        assert_eq!(file.rules()[0].pattern, "/proj/src/*.json");
    }

    #[test]
    fn test_parse_extra_fields_ignored() {
        let file = parse("/proj", "*.tmp skip stray tokens\n");
        assert_eq!(file.rules().len(), 1);
        assert_eq!(file.rules()[0].disposition, Disposition::Skip);
    }

    #[test]
    fn test_parse_preserves_declaration_order() {
        let file = parse("/proj", "a.txt force\na.txt skip\n");
        let matched = file.first_match(Path::new("/proj/a.txt")).unwrap();
        assert_eq!(matched.disposition, Disposition::Force);
    }

    #[test]
    fn test_parse_unknown_status_passes_through() {
        let file = parse("/proj", "*.txt create\n");
        assert_eq!(
            file.rules()[0].disposition,
            Disposition::Other("create".to_string())
        );
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let file = parse("/proj", "*.log skip\nsrc/*.log force\n**/*.rs skip\n");
        assert!(file.rules()[0].matches(Path::new("/proj/app.log")));
        assert!(!file.rules()[0].matches(Path::new("/proj/src/app.log")));
        assert!(file.rules()[1].matches(Path::new("/proj/src/app.log")));
        assert!(file.rules()[2].matches(Path::new("/proj/deep/nested/main.rs")));
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let path = Path::new("/proj/.yo-resolve");
        let err = OverrideFile::parse(path, Path::new("/proj"), "src/[ force\n").unwrap_err();
        match err {
            ResolveError::Pattern { path, pattern, .. } => {
                assert_eq!(path, Path::new("/proj/.yo-resolve"));
                assert_eq!(pattern, "/proj/src/[");
            }
            other => panic!("expected pattern error, got {other:?}"),
        }
    }
}
