// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! release-please configuration generator.
//!
//! release-please reads changelog sections per package. Only the root
//! package `"."` is managed here, through its `changelog-sections` list.
//! Other packages and package settings are left alone.

use crate::{
    config::Taxonomy,
    generator::{
        changelog_sections,
        codec::{json_object, to_json, write_json},
        json_document, Generator, GeneratorError, Result,
    },
};

use serde_json::{Map, Value};

const FILE_NAME: &str = "release-please-config.json";

/// Package key of the repository root.
const ROOT_PACKAGE: &str = ".";

/// Generator for `release-please-config.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReleasePlease;

impl Generator for ReleasePlease {
    fn name(&self) -> &'static str {
        "release-please"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let sections =
            to_json(changelog_sections(taxonomy)).map_err(GeneratorError::encode(FILE_NAME))?;

        let mut root = json_document(FILE_NAME, existing, Map::new)?;
        let packages = json_object(&mut root, "packages");
        json_object(packages, ROOT_PACKAGE).insert("changelog-sections".into(), sections);

        write_json(&Value::Object(root)).map_err(GeneratorError::encode(FILE_NAME))
    }
}
