// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! release-plz configuration generator.
//!
//! release-plz embeds git-cliff, so its `changelog.commit_parsers` list uses
//! the same rule layout as [`cliff`](crate::generator::cliff). The only
//! difference is the catch-all rule, which skips unmatched commits outright
//! instead of routing them into a hidden group.

use crate::{
    config::Taxonomy,
    generator::{
        codec::{parse_toml, split_preamble, to_toml, toml_table, write_toml},
        commit_parsers, CatchAll, Generator, GeneratorError, Result,
    },
};

use tracing::debug;

const FILE_NAME: &str = "release-plz.toml";

const TEMPLATE: &str = "\
# release-plz config
# Auto-generated from commit-types.json - do not edit directly
# Run: commit-config-gen generate

";

/// Generator for `release-plz.toml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReleasePlz;

impl Generator for ReleasePlz {
    fn name(&self) -> &'static str {
        "release-plz"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let text = existing.unwrap_or(TEMPLATE);
        let mut doc = parse_toml(text).map_err(GeneratorError::parse(FILE_NAME))?;

        let parsers = to_toml(commit_parsers(taxonomy, CatchAll::Skip))
            .map_err(GeneratorError::encode(FILE_NAME))?;
        let changelog = toml_table(&mut doc, "changelog");
        debug!(
            fresh = existing.is_none(),
            replaced = changelog.contains_key("commit_parsers"),
            "merging release-plz commit parsers"
        );
        changelog.insert("commit_parsers".into(), parsers);

        write_toml(split_preamble(text).0, &doc).map_err(GeneratorError::encode(FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixture;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn messages(text: &str) -> Vec<(String, bool)> {
        let doc = parse_toml(text).expect("valid toml");
        doc["changelog"]["commit_parsers"]
            .as_array()
            .expect("commit parsers")
            .iter()
            .map(|parser| {
                (
                    parser["message"].as_str().expect("message").to_string(),
                    parser.get("skip").and_then(toml::Value::as_bool).unwrap_or(false),
                )
            })
            .collect()
    }

    #[test]
    fn fresh_skips_unmatched_commits() -> anyhow::Result<()> {
        let result = ReleasePlz.generate(&fixture::taxonomy(), None)?;
        assert!(result.starts_with("# release-plz config\n"));

        let expect = vec![
            (r"^[a-z]+\(release\)".to_string(), true),
            ("^feat".to_string(), false),
            ("^fix".to_string(), false),
            ("^perf".to_string(), false),
            ("^custom".to_string(), false),
            (".*".to_string(), true),
        ];
        assert_eq!(messages(&result), expect);

        let doc = parse_toml(&result)?;
        let fallback = doc["changelog"]["commit_parsers"]
            .as_array()
            .and_then(|parsers| parsers.last())
            .expect("catch-all rule");
        assert!(fallback.get("group").is_none());

        Ok(())
    }

    #[test]
    fn merge_preserves_workspace_settings() -> anyhow::Result<()> {
        let existing = indoc! {r#"
            [workspace]
            allow_dirty = true
            changelog_update = true

            [changelog]
            protect_breaking_commits = true
            commit_parsers = [
                { message = "^old", group = "Old" },
            ]

            [[package]]
            name = "my-crate"
            publish = false
        "#};

        let result = ReleasePlz.generate(&fixture::taxonomy(), Some(existing))?;
        let doc = parse_toml(&result)?;
        assert_eq!(doc["workspace"]["allow_dirty"].as_bool(), Some(true));
        assert_eq!(
            doc["changelog"]["protect_breaking_commits"].as_bool(),
            Some(true)
        );
        assert_eq!(doc["package"][0]["name"].as_str(), Some("my-crate"));
        assert!(messages(&result)
            .iter()
            .all(|(message, _)| message != "^old"));
        assert_eq!(messages(&result).len(), 6);

        Ok(())
    }

    #[test]
    fn merge_into_empty_file() -> anyhow::Result<()> {
        let result = ReleasePlz.generate(&fixture::taxonomy(), Some(""))?;
        assert_eq!(messages(&result).len(), 6);

        Ok(())
    }
}
