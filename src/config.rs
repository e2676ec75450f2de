// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Commit taxonomy layout.
//!
//! Specify the layout of the __commit taxonomy__, the single source of truth
//! that every generated configuration file is derived from. The taxonomy is
//! normally stored in a `commit-types.json` file at the top-level of a
//! project.
//!
//! # General Layout
//!
//! ```json
//! {
//!   "types": {
//!     "feat": { "description": "A new feature", "changelog_group": "Features", "bump": "minor" },
//!     "chore": { "description": "Maintenance", "changelog_group": null }
//!   },
//!   "excluded_scopes": ["release"],
//!   "commitlint_rules": { "body-max-line-length": [0, "always", 200] }
//! }
//! ```
//!
//! A commit type without a changelog group is __hidden__. An explicit `null`
//! and an omitted `changelog_group` key mean the same thing.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

/// Fixed output precedence for well-known commit types.
///
/// Types outside of this listing are placed after all canonical types.
pub const CANONICAL_ORDER: [&str; 13] = [
    "feat",
    "fix",
    "improvement",
    "perf",
    "refactor",
    "docs",
    "style",
    "test",
    "build",
    "ci",
    "chore",
    "revert",
    "data",
];

/// Commit taxonomy, i.e., the source of truth for all generators.
#[derive(Default, Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct Taxonomy {
    /// JSON schema reference of the source file.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Brief description of the taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Commit types keyed by type name.
    #[serde(default)]
    pub types: BTreeMap<String, CommitType>,

    /// Scopes that never show up in a changelog.
    #[serde(default, alias = "excludedScopes", skip_serializing_if = "Vec::is_empty")]
    pub excluded_scopes: Vec<String>,

    /// Commitlint rule overrides forwarded verbatim.
    #[serde(
        default,
        alias = "commitlintRules",
        skip_serializing_if = "serde_json::Map::is_empty"
    )]
    pub commitlint_rules: serde_json::Map<String, serde_json::Value>,
}

impl Taxonomy {
    /// Load taxonomy from file at `path`.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::NotFound`] if file does not exist.
    /// - Return [`ConfigError::Read`] if file cannot be read.
    /// - Return [`ConfigError::Malformed`] or
    ///   [`ConfigError::EmptyChangelogGroup`] if content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Read {
                source: err,
                path: path.to_path_buf(),
            },
        })?;

        let taxonomy: Taxonomy = data.parse()?;
        debug!(
            path = %path.display(),
            types = taxonomy.types.len(),
            "loaded commit taxonomy"
        );

        Ok(taxonomy)
    }

    /// Commit types that belong to a changelog group.
    pub fn visible_types(&self) -> BTreeMap<&str, &CommitType> {
        self.types
            .iter()
            .filter(|(_, commit_type)| commit_type.is_visible())
            .map(|(name, commit_type)| (name.as_str(), commit_type))
            .collect()
    }

    /// All type names, canonical types first.
    ///
    /// Canonical types follow [`CANONICAL_ORDER`]. Remaining types come
    /// after them in no particular order.
    pub fn ordered_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|name| self.types.contains_key(*name))
            .collect();
        names.extend(
            self.types
                .keys()
                .map(String::as_str)
                .filter(|name| !CANONICAL_ORDER.contains(name)),
        );

        names
    }

    /// Iterate over commit types in output order.
    pub fn ordered_types(&self) -> impl Iterator<Item = (&str, &CommitType)> + '_ {
        self.ordered_names()
            .into_iter()
            .filter_map(|name| self.types.get(name).map(|commit_type| (name, commit_type)))
    }

    /// Iterate over visible commit types in output order, paired with their
    /// changelog group.
    pub fn ordered_visible_types(
        &self,
    ) -> impl Iterator<Item = (&str, &str, &CommitType)> + '_ {
        let visible = self.visible_types();
        self.ordered_names().into_iter().filter_map(move |name| {
            let commit_type: &CommitType = *visible.get(name)?;
            let group = commit_type.changelog_group.as_deref()?;
            Some((name, group, commit_type))
        })
    }
}

impl FromStr for Taxonomy {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let taxonomy: Taxonomy = serde_json::from_str(data).map_err(ConfigError::Malformed)?;

        // INVARIANT: Changelog groups are never empty when present.
        if let Some((name, _)) = taxonomy
            .types
            .iter()
            .find(|(_, commit_type)| commit_type.changelog_group.as_deref() == Some(""))
        {
            return Err(ConfigError::EmptyChangelogGroup {
                type_name: name.clone(),
            });
        }

        Ok(taxonomy)
    }
}

/// Single commit type entry.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct CommitType {
    /// Human readable description.
    #[serde(default)]
    pub description: String,

    /// Changelog group label, hidden when absent.
    #[serde(default)]
    pub changelog_group: Option<String>,

    /// Version bump triggered by the commit type.
    #[serde(default, skip_serializing_if = "Bump::is_unspecified")]
    pub bump: Bump,
}

impl CommitType {
    /// Construct new commit type with description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Place commit type into changelog group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.changelog_group = Some(group.into());
        self
    }

    /// Set version bump of commit type.
    pub fn with_bump(mut self, bump: Bump) -> Self {
        self.bump = bump;
        self
    }

    /// Commit type shows up in changelogs.
    pub fn is_visible(&self) -> bool {
        self.changelog_group.is_some()
    }
}

/// Semantic version bump level.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    Major,
    Minor,
    Patch,
    None,

    /// Let each generator pick its own default.
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl Bump {
    /// Bump level name as written in the source file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::None => "none",
            Self::Unspecified => "",
        }
    }

    /// No bump was written for the commit type.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }

    /// Bump level that actually triggers a release.
    pub fn release(&self) -> Option<&'static str> {
        match self {
            Self::Major | Self::Minor | Self::Patch => Some(self.as_str()),
            Self::None | Self::Unspecified => None,
        }
    }
}

impl Display for Bump {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

/// Taxonomy loading error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Taxonomy file does not exist.
    #[error("commit taxonomy not found at {:?}", path.display())]
    NotFound { path: PathBuf },

    /// Taxonomy file exists, but cannot be read.
    #[error("failed to read commit taxonomy at {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Taxonomy file is not valid structured data.
    #[error("malformed commit taxonomy")]
    Malformed(#[source] serde_json::Error),

    /// Commit type declares an empty changelog group.
    #[error("commit type {type_name:?} has an empty changelog group")]
    EmptyChangelogGroup { type_name: String },
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
