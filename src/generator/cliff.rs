// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! git-cliff configuration generator.
//!
//! git-cliff routes commits into changelog groups through the ordered
//! `git.commit_parsers` list of `cliff.toml`. The first parser whose
//! `message` pattern matches wins, so the generated list is laid out as
//! follows:
//!
//! 1. Skip rules for excluded scopes.
//! 2. One rule per visible commit type.
//! 3. A catch-all rule routing everything else into the `_ignored` group,
//!    which the changelog template filters out.
//!
//! # See Also
//!
//! - [git-cliff configuration](https://git-cliff.org/docs/configuration)

use crate::{
    config::Taxonomy,
    generator::{
        codec::{parse_toml, split_preamble, to_toml, toml_table, write_toml},
        commit_parsers, CatchAll, Generator, GeneratorError, Result,
    },
};

use tracing::debug;

const FILE_NAME: &str = "cliff.toml";

/// Group that the changelog template hides.
pub const IGNORED_GROUP: &str = "_ignored";

const TEMPLATE: &str = r##"# git-cliff config
# Auto-generated from commit-types.json - do not edit directly
# Run: commit-config-gen generate

[changelog]
header = """# Changelog

All notable changes to this project will be documented in this file.
"""
body = """
{% set visible_commits = commits | filter(attribute="group", value="_ignored") | length %}\
{% set total_commits = commits | length %}\
{% set has_visible_commits = visible_commits != total_commits %}\
{% if version or has_visible_commits %}\
## {% if version %}[{{ version | trim_start_matches(pat="v") }}] - {{ timestamp | date(format="%Y-%m-%d") }}{% else %}[unreleased]{% endif %}
{% if has_visible_commits %}\
{% for group, group_commits in commits | group_by(attribute="group") %}\
{% if group != "_ignored" %}

### {{ group | upper_first }}
{% for commit in group_commits %}
- {{ commit.message | upper_first }}
{% endfor %}
{% endif %}\
{% endfor %}\
{% else %}
No notable changes in this release.
{% endif %}\
{% endif %}\
"""
trim = false

[git]
conventional_commits = true
filter_unconventional = true
tag_pattern = "v[0-9].*"
"##;

/// Generator for `cliff.toml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cliff;

impl Generator for Cliff {
    fn name(&self) -> &'static str {
        "cliff"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let text = existing.unwrap_or(TEMPLATE);
        let mut doc = parse_toml(text).map_err(GeneratorError::parse(FILE_NAME))?;

        let parsers = to_toml(commit_parsers(taxonomy, CatchAll::Group(IGNORED_GROUP)))
            .map_err(GeneratorError::encode(FILE_NAME))?;
        let git = toml_table(&mut doc, "git");
        debug!(
            fresh = existing.is_none(),
            replaced = git.contains_key("commit_parsers"),
            "merging git-cliff commit parsers"
        );
        git.insert("commit_parsers".into(), parsers);

        write_toml(split_preamble(text).0, &doc).map_err(GeneratorError::encode(FILE_NAME))
    }
}
