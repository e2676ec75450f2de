// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration file generators.
//!
//! A __generator__ projects the commit taxonomy into the native configuration
//! format of one release or changelog tool. Every generator works in one of
//! two modes:
//!
//! - __Fresh__: no target file exists yet, so a minimal document holding
//!   the taxonomy derived __fragment__ plus whatever boilerplate the tool
//!   needs is produced.
//! - __Merge__: the target file already exists. Its tree is parsed, the
//!   fragment location is replaced wholesale, and every other key is left
//!   alone.
//!
//! Replacing the fragment wholesale is what makes generation idempotent.
//! Feeding a generator its own output yields the exact same output again.
//!
//! # Registry
//!
//! Generators are collected into a [`Registry`] keyed by name. The
//! [`Registry::builtin`] constructor lists every generator this crate ships
//! with. Listing a registry is always sorted by name.

pub mod changie;
pub mod cliff;
pub mod codec;
pub mod commitlint;
pub mod conventional_changelog;
pub mod release_please;
pub mod release_plz;
pub mod semantic_release;

use crate::{config::Taxonomy, generator::codec::CodecError};

use serde::Serialize;
use std::{collections::BTreeMap, fmt::Debug};
use tracing::warn;

/// Project commit taxonomy into a target configuration file.
pub trait Generator: Debug {
    /// Unique name of generator.
    fn name(&self) -> &'static str;

    /// Name of configuration file that generator produces.
    fn file_name(&self) -> &'static str;

    /// Generate configuration file content.
    ///
    /// Produces a fresh document if `existing` is `None`. Otherwise, merges
    /// the taxonomy derived fragment into `existing`.
    ///
    /// # Errors
    ///
    /// - Return [`GeneratorError::Parse`] if `existing` is not valid for
    ///   target format.
    /// - Return [`GeneratorError::Encode`] if document cannot be serialized.
    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String>;
}

/// Name keyed catalog of generators.
#[derive(Debug, Default)]
pub struct Registry {
    generators: BTreeMap<&'static str, Box<dyn Generator>>,
}

impl Registry {
    /// Construct new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct registry holding every generator of this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(changie::Changie);
        registry.register(cliff::Cliff);
        registry.register(commitlint::Commitlint);
        registry.register(conventional_changelog::ConventionalChangelog);
        registry.register(release_please::ReleasePlease);
        registry.register(release_plz::ReleasePlz);
        registry.register(semantic_release::SemanticRelease);
        registry
    }

    /// Register new generator.
    ///
    /// # Panics
    ///
    /// - Will panic if a generator with the same name is already registered.
    pub fn register(&mut self, generator: impl Generator + 'static) {
        let name = generator.name();
        if self.generators.contains_key(name) {
            panic!("generator already registered: {name}");
        }
        self.generators.insert(name, Box::new(generator));
    }

    /// Lookup generator by name.
    ///
    /// # Errors
    ///
    /// - Return [`UnknownGenerator`] if no generator goes by `name`.
    pub fn get(&self, name: &str) -> Result<&dyn Generator, UnknownGenerator> {
        self.generators
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| UnknownGenerator {
                name: name.into(),
                available: self.names().into_iter().map(Into::into).collect(),
            })
    }

    /// All generators sorted by name.
    pub fn all(&self) -> Vec<&dyn Generator> {
        self.generators.values().map(Box::as_ref).collect()
    }

    /// All generator names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.generators.keys().copied().collect()
    }

    /// Select generators by name, or every generator if `names` is empty.
    ///
    /// # Errors
    ///
    /// - Return [`UnknownGenerator`] for the first name that is not
    ///   registered.
    pub fn select(
        &self,
        names: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Vec<&dyn Generator>, UnknownGenerator> {
        let selected = names
            .into_iter()
            .map(|name| self.get(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(if selected.is_empty() {
            self.all()
        } else {
            selected
        })
    }
}

/// Changelog section entry shared by the conventional-changelog family.
///
/// Visible types carry a section label, hidden ones are flagged as such.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct ChangelogSection {
    #[serde(rename = "type")]
    pub commit_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

/// Build changelog sections for all commit types in output order.
pub fn changelog_sections(taxonomy: &Taxonomy) -> Vec<ChangelogSection> {
    taxonomy
        .ordered_types()
        .map(|(name, commit_type)| ChangelogSection {
            commit_type: name.into(),
            section: commit_type.changelog_group.clone(),
            hidden: !commit_type.is_visible(),
        })
        .collect()
}

/// Commit message parser rule shared by git-cliff style configurations.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CommitParser {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip: bool,
}

/// What happens to commits that no other parser rule matched.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CatchAll {
    /// Route into named group.
    Group(&'static str),

    /// Drop from changelog.
    Skip,
}

/// Build commit parser rules.
///
/// Rules come in three blocks: one skip rule per excluded scope, one rule
/// per visible type in output order, and a trailing catch-all rule.
pub fn commit_parsers(taxonomy: &Taxonomy, catch_all: CatchAll) -> Vec<CommitParser> {
    let scopes = taxonomy.excluded_scopes.iter().map(|scope| CommitParser {
        message: format!(r"^[a-z]+\({scope}\)"),
        group: None,
        skip: true,
    });

    let types = taxonomy
        .ordered_visible_types()
        .map(|(name, group, _)| CommitParser {
            message: format!("^{name}"),
            group: Some(group.into()),
            skip: false,
        });

    let fallback = match catch_all {
        CatchAll::Group(group) => CommitParser {
            message: ".*".into(),
            group: Some(group.into()),
            skip: false,
        },
        CatchAll::Skip => CommitParser {
            message: ".*".into(),
            group: None,
            skip: true,
        },
    };

    scopes.chain(types).chain([fallback]).collect()
}

/// Parse JSON target into its root object.
///
/// Falls back to `template` if there is no existing document, or if its root
/// is not an object.
pub(crate) fn json_document(
    file_name: &'static str,
    existing: Option<&str>,
    template: impl FnOnce() -> serde_json::Map<String, serde_json::Value>,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let Some(text) = existing else {
        return Ok(template());
    };

    match codec::parse_json(text).map_err(GeneratorError::parse(file_name))? {
        serde_json::Value::Object(root) => Ok(root),
        _ => {
            warn!("{file_name} root is not an object, generating fresh document");
            Ok(template())
        }
    }
}

/// Requested generator is not registered.
#[derive(Clone, Debug, thiserror::Error)]
#[error("unknown generator {name:?} (available: {})", .available.join(", "))]
pub struct UnknownGenerator {
    pub name: String,
    pub available: Vec<String>,
}

/// All possible error types for generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Existing configuration file is not valid for its format.
    #[error("failed to parse existing {file_name}")]
    Parse {
        #[source]
        source: CodecError,
        file_name: &'static str,
    },

    /// Generated document could not be serialized.
    #[error("failed to encode {file_name}")]
    Encode {
        #[source]
        source: CodecError,
        file_name: &'static str,
    },
}

impl GeneratorError {
    pub(crate) fn parse(file_name: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| Self::Parse { source, file_name }
    }

    pub(crate) fn encode(file_name: &'static str) -> impl FnOnce(CodecError) -> Self {
        move |source| Self::Encode { source, file_name }
    }
}

/// Friendly result alias :3
pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

#[cfg(test)]
pub(crate) mod fixture {
    use crate::config::Taxonomy;

    /// Taxonomy covering visible, hidden, bumped, and unknown types.
    pub(crate) fn taxonomy() -> Taxonomy {
        r#"{
          "types": {
            "feat": {"description": "A new feature", "changelog_group": "Features", "bump": "minor"},
            "fix": {"description": "A bug fix", "changelog_group": "Bug Fixes", "bump": "patch"},
            "perf": {"description": "Performance", "changelog_group": "Performance"},
            "docs": {"description": "Documentation", "changelog_group": null},
            "chore": {"description": "Maintenance"},
            "custom": {"description": "Custom type", "changelog_group": "Custom"}
          },
          "excluded_scopes": ["release"],
          "commitlint_rules": {
            "header-max-length": [2, "always", 100]
          }
        }"#
        .parse()
        .expect("fixture taxonomy is valid")
    }

    /// Same taxonomy with one visible type moved to another group.
    pub(crate) fn regrouped_taxonomy() -> Taxonomy {
        let mut taxonomy = taxonomy();
        if let Some(fix) = taxonomy.types.get_mut("fix") {
            fix.changelog_group = Some("Fixes".into());
        }
        taxonomy
    }
}
