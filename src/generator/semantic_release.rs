// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! semantic-release configuration generator.
//!
//! semantic-release configures plugins through the `plugins` list of
//! `.releaserc.json`, where each entry is either a bare plugin name or a
//! `[name, options]` pair. Two plugins receive taxonomy derived options:
//!
//! - `@semantic-release/commit-analyzer` gets `releaseRules` and
//!   `presetConfig.types`.
//! - `@semantic-release/release-notes-generator` gets `presetConfig.types`.
//!
//! # Release Rules
//!
//! A type with an explicit bump releases at that level. A type without one
//! falls back to the analyzer defaults, i.e., `feat` is a minor release, and
//! `fix` or `perf` is a patch release. Every other type without a bump gets
//! no release rule at all.

use crate::{
    config::{Bump, Taxonomy},
    generator::{
        changelog_sections,
        codec::{json_object, to_json, write_json},
        json_document, Generator, GeneratorError, Result,
    },
};

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

const FILE_NAME: &str = ".releaserc.json";

/// Plugin that decides release level.
pub const COMMIT_ANALYZER: &str = "@semantic-release/commit-analyzer";

/// Plugin that renders release notes.
pub const RELEASE_NOTES_GENERATOR: &str = "@semantic-release/release-notes-generator";

/// Generator for `.releaserc.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SemanticRelease;

impl Generator for SemanticRelease {
    fn name(&self) -> &'static str {
        "semantic-release"
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    fn generate(&self, taxonomy: &Taxonomy, existing: Option<&str>) -> Result<String> {
        let release_rules =
            to_json(build_release_rules(taxonomy)).map_err(GeneratorError::encode(FILE_NAME))?;
        let preset_types =
            to_json(changelog_sections(taxonomy)).map_err(GeneratorError::encode(FILE_NAME))?;

        let mut root = json_document(FILE_NAME, existing, template)?;
        let plugins = plugin_list(&mut root);

        let analyzer = plugin_options(plugins, COMMIT_ANALYZER, 0);
        analyzer.insert("releaseRules".into(), release_rules);
        json_object(analyzer, "presetConfig").insert("types".into(), preset_types.clone());

        let position = plugin_position(plugins, COMMIT_ANALYZER).map_or(0, |index| index + 1);
        let notes = plugin_options(plugins, RELEASE_NOTES_GENERATOR, position);
        json_object(notes, "presetConfig").insert("types".into(), preset_types);

        write_json(&Value::Object(root)).map_err(GeneratorError::encode(FILE_NAME))
    }
}

fn template() -> Map<String, Value> {
    Map::from_iter([
        ("branches".to_string(), json!(["main"])),
        ("plugins".to_string(), default_plugins()),
    ])
}

fn default_plugins() -> Value {
    json!([
        COMMIT_ANALYZER,
        RELEASE_NOTES_GENERATOR,
        "@semantic-release/changelog",
        "@semantic-release/npm",
        "@semantic-release/github",
    ])
}

/// Make sure `plugins` is a list, replacing whatever was there.
fn plugin_list(root: &mut Map<String, Value>) -> &mut Vec<Value> {
    let entry = root.entry("plugins").or_insert_with(default_plugins);
    if !entry.is_array() {
        debug!("plugins is not a list, using default plugin list");
        *entry = default_plugins();
    }

    match entry {
        Value::Array(plugins) => plugins,
        _ => unreachable!("entry was just made a list"),
    }
}

fn plugin_name(plugin: &Value) -> Option<&str> {
    match plugin {
        Value::String(name) => Some(name.as_str()),
        Value::Array(pair) => pair.first().and_then(Value::as_str),
        _ => None,
    }
}

fn plugin_position(plugins: &[Value], name: &str) -> Option<usize> {
    plugins
        .iter()
        .position(|plugin| plugin_name(plugin) == Some(name))
}

/// Options object of plugin `name`.
///
/// Bare plugin names are upgraded to `[name, {}]` pairs. A missing plugin is
/// inserted at `position`.
fn plugin_options<'a>(
    plugins: &'a mut Vec<Value>,
    name: &str,
    position: usize,
) -> &'a mut Map<String, Value> {
    let index = match plugin_position(plugins, name) {
        Some(index) => index,
        None => {
            debug!(plugin = name, position, "inserting missing plugin");
            let position = position.min(plugins.len());
            plugins.insert(position, json!([name, {}]));
            position
        }
    };

    let plugin = &mut plugins[index];
    if !plugin.is_array() {
        *plugin = json!([name, {}]);
    }

    let pair = match plugin {
        Value::Array(pair) => pair,
        _ => unreachable!("plugin was just made a pair"),
    };
    if pair.len() < 2 {
        pair.push(json!({}));
    } else if !pair[1].is_object() {
        pair[1] = json!({});
    }

    match &mut pair[1] {
        Value::Object(options) => options,
        _ => unreachable!("plugin options were just made an object"),
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
struct ReleaseRule {
    #[serde(rename = "type")]
    commit_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    release: Option<&'static str>,
}

/// Release level the analyzer assumes for a type without explicit bump.
fn default_release(name: &str) -> Option<&'static str> {
    match name {
        "feat" => Some("minor"),
        "fix" | "perf" => Some("patch"),
        _ => None,
    }
}

fn build_release_rules(taxonomy: &Taxonomy) -> Vec<ReleaseRule> {
    taxonomy
        .ordered_types()
        .filter_map(|(name, commit_type)| {
            let release = match commit_type.bump {
                Bump::Unspecified => Some(default_release(name)?),
                bump => bump.release(),
            };

            Some(ReleaseRule {
                commit_type: name.into(),
                release,
            })
        })
        .collect()
}
