//! Ignore rules for template trees.
//!
//! Files matched by an ignore rule are copied byte for byte instead of having
//! their contents processed. Their names are still processed. A rule can name
//! an extension (`png`, `.dll`, `dl*`) or a pattern (`binfiles`, `*.min.js`,
//! `*/vendor/*`).
//!
//! # Pattern Syntax
//!
//! Patterns use standard glob syntax and are matched without regard to case:
//!
//! - `*` matches any sequence of characters, including `/`
//! - `?` matches any single character
//! - `[abc]` matches any character in the set
//! - `[a-z]` matches any character in the range
//!
//! An extension rule is tried against the extension without its dot, and only
//! for paths that have one. A pattern is tried against the file name first and
//! then against the whole path with `/` separators. A pattern that is not valid glob syntax is
//! matched literally.
//!
//! # Propagation
//!
//! Once a path is found to be ignored it is remembered, and every path below
//! it is ignored without checking the rules again. Checking a directory before
//! its contents is therefore enough to ignore a whole subtree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, trace};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A single compiled ignore pattern.
///
/// # Examples
///
/// ```rust
/// use bpl_cli::pattern::PatternMatcher;
///
/// let matcher = PatternMatcher::new("*.Min.JS");
/// assert!(matcher.matches("app.min.js"));
/// assert!(!matcher.matches("app.js"));
///
/// // Not valid glob syntax, so matched literally
/// let literal = PatternMatcher::new("[draft");
/// assert!(literal.matches("[draft"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    original_pattern: String,
}

impl PatternMatcher {
    /// Compiles `pattern_str` after trimming it, lowercasing it and turning
    /// `\` into `/`.
    pub fn new(pattern_str: &str) -> Self {
        let normalized = pattern_str.trim().to_lowercase().replace('\\', "/");
        let pattern = Pattern::new(&normalized).unwrap_or_else(|e| {
            debug!(target: "ignore", "Pattern '{normalized}' is not a glob ({e}), matching literally");
            // An escaped pattern always compiles
            Pattern::new(&Pattern::escape(&normalized)).unwrap_or_default()
        });

        Self {
            pattern,
            original_pattern: normalized,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.matches_with(text, MATCH_OPTIONS)
    }

    /// The normalized pattern text.
    pub fn pattern(&self) -> &str {
        &self.original_pattern
    }
}

/// Extension and pattern rules plus the set of paths already found ignored.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    extensions: Vec<PatternMatcher>,
    patterns: Vec<PatternMatcher>,
    ignored_prefixes: Vec<PathBuf>,
}

impl IgnoreRules {
    /// Builds rules from extension and pattern lists. Entries are trimmed and
    /// lowercased, extensions lose a leading `.`, and empty entries are
    /// dropped.
    pub fn new<E, P>(extensions: E, patterns: P) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect::<BTreeSet<_>>()
            .iter()
            .map(|e| PatternMatcher::new(e))
            .collect();
        let patterns = patterns
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| PatternMatcher::new(p.as_ref()))
            .collect();

        Self {
            extensions,
            patterns,
            ignored_prefixes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.patterns.is_empty()
    }

    /// Normalized extensions, sorted.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(PatternMatcher::pattern)
    }

    /// Normalized patterns in the order given.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(PatternMatcher::pattern)
    }

    /// Returns true if the contents of `path` must be copied verbatim.
    ///
    /// A positive answer is remembered, so that everything below `path` is
    /// ignored as well.
    pub fn is_ignored(&mut self, path: &Path) -> bool {
        if self.ignored_prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            trace!(target: "ignore", "{} is below an ignored path", path.display());
            return true;
        }

        let reason = self.matching_rule(path);
        match reason {
            Some(rule) => {
                debug!(target: "ignore", "Ignoring {} (matched '{rule}')", path.display());
                self.ignored_prefixes.push(path.to_path_buf());
                true
            }
            None => false,
        }
    }

    fn matching_rule(&self, path: &Path) -> Option<String> {
        if let Some(extension) = path.extension() {
            let extension = extension.to_string_lossy().to_lowercase();
            if let Some(matcher) = self.extensions.iter().find(|m| m.matches(&extension)) {
                return Some(format!(".{}", matcher.pattern()));
            }
        }

        if let Some(file_name) = path.file_name() {
            let file_name = file_name.to_string_lossy().to_lowercase();
            if let Some(matcher) = self.patterns.iter().find(|m| m.matches(&file_name)) {
                return Some(matcher.pattern().to_string());
            }
        }

        let full_path = path.to_string_lossy().to_lowercase().replace('\\', "/");
        self.patterns
            .iter()
            .find(|m| m.matches(&full_path))
            .map(|m| m.pattern().to_string())
    }
}

fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim().to_lowercase();
    extension.strip_prefix('.').map(str::to_string).unwrap_or(extension)
}
