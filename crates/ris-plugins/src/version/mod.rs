//! Dependency version handling.
//!
//! [`VersionResolver`] turns the version expression a manifest declares for a
//! plugin dependency into the git ref to check out. Only an exact
//! `major.minor.patch` release is recognised: range operators such as `~` and
//! `^` are ignored and the stated release is used as-is. Anything else,
//! including a `*` wildcard, resolves to the configured default branch.
//!
//! [`SemVersion`] carries the same three components for ordering plugin
//! versions against each other with [`compare`].

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

#[expect(clippy::unwrap_used, reason = "the pattern is a valid literal")]
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[~^]?(\d+)\.(\d+)\.(\d+)|\*").unwrap());

/// Resolves dependency version expressions into git refs.
///
/// # Example
///
/// ```
/// use ris_plugins::VersionResolver;
///
/// let resolver = VersionResolver::new("master");
/// assert_eq!(resolver.resolve("^1.2.3"), "v1.2.3");
/// assert_eq!(resolver.resolve("*"), "master");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResolver {
    default_branch: String,
}

impl VersionResolver {
    /// Creates a resolver falling back to `default_branch`.
    #[must_use]
    pub fn new(default_branch: impl Into<String>) -> Self {
        Self {
            default_branch: default_branch.into(),
        }
    }

    /// Returns the fallback branch.
    #[must_use]
    pub const fn default_branch(&self) -> &str {
        self.default_branch.as_str()
    }

    /// Resolves a dependency version expression to a git ref.
    ///
    /// The leftmost of an embedded `major.minor.patch` triple or a `*`
    /// wildcard decides: a triple yields `v<triple>`, a wildcard or no match
    /// yields the default branch.
    #[must_use]
    pub fn resolve(&self, expression: &str) -> String {
        VERSION_PATTERN
            .captures(expression)
            .and_then(|captures| {
                let part = |index: usize| captures.get(index).map(|m| m.as_str());
                Some(format!("v{}.{}.{}", part(1)?, part(2)?, part(3)?))
            })
            .unwrap_or_else(|| self.default_branch.clone())
    }
}

/// A `major.minor.patch` version used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemVersion {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl SemVersion {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extracts the first `major.minor.patch` triple from a dependency string.
    ///
    /// Returns `None` when the string carries no triple, a `*` precedes it,
    /// or a component does not fit in a `u64`.
    #[must_use]
    pub fn parse(expression: &str) -> Option<Self> {
        let captures = VERSION_PATTERN.captures(expression)?;
        let part = |index: usize| -> Option<u64> { captures.get(index)?.as_str().parse().ok() };
        Some(Self::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for SemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialOrd for SemVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

/// Orders two versions by major, then minor, then patch.
///
/// Choosing between diverging versions is left to the caller.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use ris_plugins::{SemVersion, compare};
///
/// let older = SemVersion::new(1, 2, 3);
/// let newer = SemVersion::new(1, 2, 4);
/// assert_eq!(compare(&older, &newer), Ordering::Less);
/// ```
#[must_use]
pub fn compare(left: &SemVersion, right: &SemVersion) -> Ordering {
    left.major
        .cmp(&right.major)
        .then_with(|| left.minor.cmp(&right.minor))
        .then_with(|| left.patch.cmp(&right.patch))
}
