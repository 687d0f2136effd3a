//! Plugin identifier resolution.
//!
//! A plugin can be requested as an already structured [`PluginSpec`], as a
//! raw git URL carrying the configured prefix token (`git+https://...`), or
//! as a bare name matched against a candidate list. [`PluginIdentifier`]
//! decides which of the three shapes an input has once, at the boundary, and
//! [`find_in_list`] turns it into a [`PluginSpec`].

use serde::{Deserialize, Serialize};

use crate::error::PluginError;

/// Identity of a plugin before installation.
///
/// # Example
///
/// ```
/// use ris_plugins::PluginSpec;
///
/// let spec = PluginSpec::new("rispa-core").with_package_name("@rispa/core");
/// assert_eq!(spec.name(), "rispa-core");
/// assert!(spec.clone_url().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSpec {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    clone_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_alias: Option<String>,
}

impl PluginSpec {
    /// Creates a spec carrying only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clone_url: None,
            package_name: None,
            package_alias: None,
        }
    }

    /// Sets the repository URL.
    #[must_use]
    pub fn with_clone_url(mut self, clone_url: impl Into<String>) -> Self {
        self.clone_url = Some(clone_url.into());
        self
    }

    /// Sets the package name published by the plugin.
    #[must_use]
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Sets an alternative package name.
    #[must_use]
    pub fn with_package_alias(mut self, package_alias: impl Into<String>) -> Self {
        self.package_alias = Some(package_alias.into());
        self
    }

    /// Returns the plugin name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the repository URL, if resolved.
    #[must_use]
    pub fn clone_url(&self) -> Option<&str> {
        self.clone_url.as_deref()
    }

    /// Returns the package name, if known.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    /// Returns the package alias, if known.
    #[must_use]
    pub fn package_alias(&self) -> Option<&str> {
        self.package_alias.as_deref()
    }

    /// Returns the repository URL or fails when the spec is unresolved.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnresolvedPlugin`] when no clone URL is known.
    pub fn require_clone_url(&self) -> Result<&str, PluginError> {
        self.clone_url().ok_or_else(|| PluginError::UnresolvedPlugin {
            name: self.name.clone(),
        })
    }

    fn matches(&self, identifier: &str) -> bool {
        self.name == identifier
            || self.package_name() == Some(identifier)
            || self.package_alias() == Some(identifier)
    }
}

/// The three shapes a plugin request can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginIdentifier {
    /// A structured spec, used unchanged.
    Spec(PluginSpec),
    /// A git URL with the prefix token already stripped.
    Url(String),
    /// A name, package name or alias to look up.
    Name(String),
}

impl PluginIdentifier {
    /// Classifies a raw request string.
    ///
    /// Strings starting with `git_prefix` become [`PluginIdentifier::Url`]
    /// with the prefix removed; everything else is a
    /// [`PluginIdentifier::Name`].
    ///
    /// # Example
    ///
    /// ```
    /// use ris_plugins::PluginIdentifier;
    ///
    /// let parsed = PluginIdentifier::parse("git+https://git.com/x/y.git", "git+");
    /// assert_eq!(parsed, PluginIdentifier::Url("https://git.com/x/y.git".into()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str, git_prefix: &str) -> Self {
        match raw.strip_prefix(git_prefix) {
            Some(url) if !git_prefix.is_empty() => Self::Url(url.to_owned()),
            _ => Self::Name(raw.to_owned()),
        }
    }
}

impl From<PluginSpec> for PluginIdentifier {
    fn from(spec: PluginSpec) -> Self {
        Self::Spec(spec)
    }
}

/// Derives a plugin name from the last path segment of a clone URL.
///
/// # Example
///
/// ```
/// use ris_plugins::extract_plugin_name_from_url;
///
/// assert_eq!(
///     extract_plugin_name_from_url("https://git.com/x/rispa-foo.git"),
///     "rispa-foo"
/// );
/// ```
#[must_use]
pub fn extract_plugin_name_from_url(clone_url: &str) -> String {
    let segment = clone_url.rsplit('/').next().unwrap_or(clone_url);
    segment.strip_suffix(".git").unwrap_or(segment).to_owned()
}

/// Resolves an identifier against the candidate list.
///
/// Candidates are scanned in order and the first one whose name, package
/// name or package alias equals the identifier wins. An unmatched name comes
/// back as a spec without a clone URL, which installers reject with
/// [`PluginError::UnresolvedPlugin`].
#[must_use]
pub fn find_in_list(identifier: PluginIdentifier, candidates: &[PluginSpec]) -> PluginSpec {
    match identifier {
        PluginIdentifier::Spec(spec) => spec,
        PluginIdentifier::Url(url) => {
            PluginSpec::new(extract_plugin_name_from_url(&url)).with_clone_url(url)
        }
        PluginIdentifier::Name(name) => candidates
            .iter()
            .find(|candidate| candidate.matches(&name))
            .cloned()
            .unwrap_or_else(|| PluginSpec::new(name)),
    }
}

/// Resolves raw identifiers against a fixed candidate list and URL prefix.
#[derive(Debug, Clone, Default)]
pub struct PluginFinder {
    git_prefix: String,
    candidates: Vec<PluginSpec>,
}

impl PluginFinder {
    /// Creates a finder over `candidates` recognising URLs by `git_prefix`.
    #[must_use]
    pub fn new(git_prefix: impl Into<String>, candidates: Vec<PluginSpec>) -> Self {
        Self {
            git_prefix: git_prefix.into(),
            candidates,
        }
    }

    /// Returns the candidate list in lookup order.
    #[must_use]
    pub fn candidates(&self) -> &[PluginSpec] {
        &self.candidates
    }

    /// First candidate whose name, package name or alias is `identifier`.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<&PluginSpec> {
        self.candidates
            .iter()
            .find(|candidate| candidate.matches(identifier))
    }

    /// Classifies and resolves a raw identifier.
    #[must_use]
    pub fn find(&self, raw: &str) -> PluginSpec {
        find_in_list(
            PluginIdentifier::parse(raw, &self.git_prefix),
            &self.candidates,
        )
    }
}
