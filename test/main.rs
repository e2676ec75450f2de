// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT


use anyhow::Result;
use commit_config_gen::Taxonomy;
use std::{fs::write, path::Path};

pub(crate) const TAXONOMY: &str = r#"{
  "$schema": "./commit-types.schema.json",
  "description": "Commit types for the integration suite",
  "types": {
    "feat": {"description": "A new feature", "changelog_group": "Added", "bump": "minor"},
    "fix": {"description": "A bug fix", "changelog_group": "Fixed", "bump": "patch"},
    "refactor": {"description": "Code change", "changelog_group": "Changed"},
    "docs": {"description": "Documentation", "changelog_group": null},
    "chore": {"description": "Maintenance"}
  },
  "excluded_scopes": ["release", "deps"],
  "commitlint_rules": {
    "body-max-line-length": [0, "always", 200]
  }
}"#;

/// Commit taxonomy written to disk for the orchestration layer to load.
pub(crate) struct TaxonomyFixture {
    taxonomy: Taxonomy,
}

impl TaxonomyFixture {
    pub(crate) fn new(path: impl AsRef<Path>, content: impl AsRef<str>) -> Result<Self> {
        write(path.as_ref(), content.as_ref())?;
        let taxonomy = Taxonomy::load(path.as_ref())?;

        Ok(Self { taxonomy })
    }

    pub(crate) fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Rename changelog group of `type_name`, rewriting the file on disk.
    pub(crate) fn regroup(
        &mut self,
        path: impl AsRef<Path>,
        type_name: &str,
        group: &str,
    ) -> Result<()> {
        if let Some(commit_type) = self.taxonomy.types.get_mut(type_name) {
            commit_type.changelog_group = Some(group.into());
        }
        write(path.as_ref(), serde_json::to_string_pretty(&self.taxonomy)?)?;

        // INVARIANT: What is on disk must load back into the same taxonomy.
        self.taxonomy = Taxonomy::load(path.as_ref())?;

        Ok(())
    }
}
