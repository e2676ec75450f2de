// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! conventional-changelog configuration generator.
//!
//! Replaces the top-level `types` list of `.versionrc.json`, as read by
//! standard-version and the conventionalcommits preset.

use crate::{
    config::Taxonomy,
    generator::{
        changelog_sections,
        codec::{to_json, write_json},
        json_document, Generator, GeneratorError, Result,
    },
};

use serde_json::{Map, Value};

const FILE_NAME: &str = ".versionrc.json";

/// Generator for `.versionrc.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConventionalChangelog;

impl Generator for ConventionalChangelog {
    fn name(&self) -> &'static str {
        "conventional-changelog"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let types =
            to_json(changelog_sections(taxonomy)).map_err(GeneratorError::encode(FILE_NAME))?;

        let mut root = json_document(FILE_NAME, existing, Map::new)?;
        root.insert("types".into(), types);

        write_json(&Value::Object(root)).map_err(GeneratorError::encode(FILE_NAME))
    }
}
