// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Commitlint configuration generator.
//!
//! Writes the `rules` table of `.commitlintrc.json`. The `type-enum` rule
//! lists every commit type, hidden ones included, since hidden types are
//! still valid commit types. Rule overrides from the taxonomy are copied over
//! verbatim. Any other rule already present in the file is kept.

use crate::{
    config::Taxonomy,
    generator::{
        codec::{json_object, write_json},
        json_document, Generator, GeneratorError, Result,
    },
};

use serde_json::{json, Map, Value};
use tracing::debug;

const FILE_NAME: &str = ".commitlintrc.json";

/// Generator for `.commitlintrc.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Commitlint;

impl Generator for Commitlint {
    fn name(&self) -> &'static str {
        "commitlint"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let mut root = json_document(FILE_NAME, existing, || {
            Map::from_iter([(
                "extends".to_string(),
                json!(["@commitlint/config-conventional"]),
            )])
        })?;

        let rules = json_object(&mut root, "rules");
        for (name, rule) in build_rules(taxonomy) {
            debug!(rule = %name, replaced = rules.contains_key(&name), "setting commitlint rule");
            rules.insert(name, rule);
        }

        write_json(&Value::Object(root)).map_err(GeneratorError::encode(FILE_NAME))
    }
}

fn build_rules(taxonomy: &Taxonomy) -> Map<String, Value> {
    let mut rules = Map::new();
    rules.insert(
        "type-enum".into(),
        json!([2, "always", taxonomy.ordered_names()]),
    );
    rules.extend(taxonomy.commitlint_rules.clone());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{codec::parse_json, fixture};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_lists_all_types() -> anyhow::Result<()> {
        let result = Commitlint.generate(&fixture::taxonomy(), None)?;
        let expect = indoc! {r#"
            {
              "extends": [
                "@commitlint/config-conventional"
              ],
              "rules": {
                "type-enum": [
                  2,
                  "always",
                  [
                    "feat",
                    "fix",
                    "perf",
                    "docs",
                    "chore",
                    "custom"
                  ]
                ],
                "header-max-length": [
                  2,
                  "always",
                  100
                ]
              }
            }
        "#};
        assert_eq!(result, expect);

        Ok(())
    }

    #[test]
    fn merge_keeps_custom_rules_and_extends() -> anyhow::Result<()> {
        let existing = indoc! {r#"
            {
              "extends": ["@my-org/commitlint-config"],
              "rules": {
                "type-enum": [2, "always", ["old"]],
                "custom-rule": [1, "never"]
              },
              "helpUrl": "https://example.com/commits"
            }
        "#};

        let result = parse_json(&Commitlint.generate(&fixture::taxonomy(), Some(existing))?)?;
        assert_eq!(result["extends"], json!(["@my-org/commitlint-config"]));
        assert_eq!(result["helpUrl"], json!("https://example.com/commits"));
        assert_eq!(result["rules"]["custom-rule"], json!([1, "never"]));
        assert_eq!(
            result["rules"]["type-enum"],
            json!([2, "always", ["feat", "fix", "perf", "docs", "chore", "custom"]])
        );
        assert_eq!(result["rules"]["header-max-length"], json!([2, "always", 100]));

        Ok(())
    }

    #[test]
    fn merge_replaces_non_object_rules() -> anyhow::Result<()> {
        let existing = r#"{"extends": [], "rules": "nope"}"#;
        let result = parse_json(&Commitlint.generate(&fixture::taxonomy(), Some(existing))?)?;
        assert!(result["rules"]["type-enum"].is_array());

        Ok(())
    }

    #[test]
    fn non_object_root_degrades_to_fresh() -> anyhow::Result<()> {
        let taxonomy = fixture::taxonomy();
        let result = Commitlint.generate(&taxonomy, Some("[1, 2, 3]"))?;
        assert_eq!(result, Commitlint.generate(&taxonomy, None)?);

        Ok(())
    }
}
