// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Changie configuration generator.
//!
//! Changie stores its change kinds under the top-level `kinds` list of
//! `.changie.yaml`. Each visible commit type becomes one kind labeled by its
//! changelog group, with an `auto` bump level whenever the type triggers a
//! release.
//!
//! # See Also
//!
//! - [Changie configuration](https://changie.dev/config/)

use crate::{
    config::Taxonomy,
    generator::{
        codec::{parse_yaml, split_preamble, to_yaml, write_yaml},
        Generator, GeneratorError, Result,
    },
};

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

const FILE_NAME: &str = ".changie.yaml";

/// Generator for `.changie.yaml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Changie;

impl Generator for Changie {
    fn name(&self) -> &'static str {
        "changie"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let kinds = to_yaml(build_kinds(taxonomy)).map_err(GeneratorError::encode(FILE_NAME))?;

        let (preamble, mut doc) = match existing {
            Some(text) => {
                let doc = parse_yaml(text).map_err(GeneratorError::parse(FILE_NAME))?;
                (split_preamble(text).0, doc)
            }
            None => ("", Value::Mapping(Mapping::new())),
        };

        // INVARIANT: Leading comments survive even if the document body does not.
        //   - A file holding nothing but comments parses as null.
        match doc {
            Value::Mapping(_) => {}
            Value::Null => doc = Value::Mapping(Mapping::new()),
            _ => {
                warn!("{FILE_NAME} root is not a mapping, generating fresh document");
                doc = Value::Mapping(Mapping::new());
            }
        }

        if let Value::Mapping(root) = &mut doc {
            debug!(replaced = root.contains_key("kinds"), "merging changie kinds");
            root.insert(Value::from("kinds"), kinds);
        }

        write_yaml(preamble, &doc).map_err(GeneratorError::encode(FILE_NAME))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
struct Kind {
    label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    auto: Option<&'static str>,
}

fn build_kinds(taxonomy: &Taxonomy) -> Vec<Kind> {
    taxonomy
        .ordered_visible_types()
        .map(|(_, group, commit_type)| Kind {
            label: group.into(),
            auto: commit_type.bump.release(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixture;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<(String, Option<String>)> {
        let doc = parse_yaml(text).expect("valid yaml");
        doc["kinds"]
            .as_sequence()
            .expect("kinds list")
            .iter()
            .map(|kind| {
                (
                    kind["label"].as_str().expect("label").to_string(),
                    kind.get("auto").and_then(Value::as_str).map(String::from),
                )
            })
            .collect()
    }

    #[test]
    fn fresh_lists_visible_kinds() -> anyhow::Result<()> {
        let result = Changie.generate(&fixture::taxonomy(), None)?;
        let expect = vec![
            ("Features".to_string(), Some("minor".to_string())),
            ("Bug Fixes".to_string(), Some("patch".to_string())),
            ("Performance".to_string(), None),
            ("Custom".to_string(), None),
        ];
        assert_eq!(kinds(&result), expect);

        Ok(())
    }

    #[test]
    fn merge_preserves_unrelated_keys() -> anyhow::Result<()> {
        let existing = indoc! {r#"
            # Changie settings.
            changesDir: .changes
            unreleasedDir: unreleased
            headerPath: header.tpl.md
            kinds:
              - label: Old Kind
                auto: major
            newlines:
              afterKind: 1
        "#};

        let result = Changie.generate(&fixture::taxonomy(), Some(existing))?;
        assert!(result.starts_with("# Changie settings.\n"));

        let doc = parse_yaml(&result)?;
        assert_eq!(doc["changesDir"].as_str(), Some(".changes"));
        assert_eq!(doc["headerPath"].as_str(), Some("header.tpl.md"));
        assert_eq!(doc["newlines"]["afterKind"].as_u64(), Some(1));
        assert_eq!(kinds(&result).len(), 4);
        assert!(!result.contains("Old Kind"));

        let keys: Vec<&str> = doc
            .as_mapping()
            .expect("mapping")
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["changesDir", "unreleasedDir", "headerPath", "kinds", "newlines"]
        );

        Ok(())
    }

    #[test]
    fn merge_appends_missing_kinds() -> anyhow::Result<()> {
        let result = Changie.generate(&fixture::taxonomy(), Some("changesDir: .changes\n"))?;
        let doc = parse_yaml(&result)?;
        assert_eq!(doc["changesDir"].as_str(), Some(".changes"));
        assert_eq!(kinds(&result).len(), 4);

        Ok(())
    }

    #[test]
    fn comment_only_file_keeps_banner() -> anyhow::Result<()> {
        let existing = indoc! {"
            # Managed by the release team.
            # Ask before editing.
        "};

        let taxonomy = fixture::taxonomy();
        let result = Changie.generate(&taxonomy, Some(existing))?;
        assert!(result.starts_with(existing));
        assert_eq!(kinds(&result).len(), 4);
        assert_eq!(Changie.generate(&taxonomy, Some(&result))?, result);

        Ok(())
    }

    #[test]
    fn non_mapping_root_degrades_to_fresh() -> anyhow::Result<()> {
        let taxonomy = fixture::taxonomy();
        let result = Changie.generate(&taxonomy, Some("- just\n- a list\n"))?;
        assert_eq!(result, Changie.generate(&taxonomy, None)?);

        Ok(())
    }
}
