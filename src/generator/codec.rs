// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Document tree codecs.
//!
//! Thin layer over the JSON, TOML, and YAML tree codecs that every generator
//! shares. Parsing yields a mutable tree, serializing yields the text that
//! gets written back to disk.
//!
//! None of the codecs retain comments. TOML and YAML documents at least keep
//! their leading comment block through [`split_preamble`], since that is
//! where generated files and users alike put their banner text.

use serde::Serialize;

/// Split leading block of comment and blank lines from the rest of `text`.
///
/// The preamble ends right before the first line that is neither blank nor a
/// `#` comment.
pub(crate) fn split_preamble(text: &str) -> (&str, &str) {
    let mut end = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            break;
        }
        end += line.len();
    }

    text.split_at(end)
}

pub(crate) fn parse_json(text: &str) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize JSON document with two space indentation and trailing newline.
pub(crate) fn write_json(doc: &serde_json::Value) -> Result<String> {
    let mut data = serde_json::to_string_pretty(doc)?;
    data.push('\n');
    Ok(data)
}

pub(crate) fn to_json(value: impl Serialize) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn parse_toml(text: &str) -> Result<toml::Table> {
    Ok(toml::from_str(text)?)
}

/// Serialize TOML document behind `preamble`.
pub(crate) fn write_toml(preamble: &str, doc: &toml::Table) -> Result<String> {
    Ok(format!("{preamble}{}", toml::to_string_pretty(doc)?))
}

pub(crate) fn to_toml(value: impl Serialize) -> Result<toml::Value> {
    Ok(toml::Value::try_from(value)?)
}

pub(crate) fn parse_yaml(text: &str) -> Result<serde_yaml::Value> {
    Ok(serde_yaml::from_str(text)?)
}

/// Serialize YAML document behind `preamble`.
pub(crate) fn write_yaml(preamble: &str, doc: &serde_yaml::Value) -> Result<String> {
    Ok(format!("{preamble}{}", serde_yaml::to_string(doc)?))
}

pub(crate) fn to_yaml(value: impl Serialize) -> Result<serde_yaml::Value> {
    Ok(serde_yaml::to_value(value)?)
}

/// Make `json[key]` a JSON object, replacing whatever was there.
pub(crate) fn json_object<'a>(
    parent: &'a mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> &'a mut serde_json::Map<String, serde_json::Value> {
    let entry = parent
        .entry(key)
        .or_insert_with(|| serde_json::Value::Object(Default::default()));
    if !entry.is_object() {
        *entry = serde_json::Value::Object(Default::default());
    }

    match entry {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("entry was just made an object"),
    }
}

/// Make `toml[key]` a TOML table, replacing whatever was there.
pub(crate) fn toml_table<'a>(parent: &'a mut toml::Table, key: &str) -> &'a mut toml::Table {
    let entry = parent
        .entry(key)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    if !entry.is_table() {
        *entry = toml::Value::Table(Default::default());
    }

    match entry {
        toml::Value::Table(table) => table,
        _ => unreachable!("entry was just made a table"),
    }
}

/// Codec error types.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON document could not be decoded or encoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML document could not be decoded.
    #[error(transparent)]
    TomlDecode(#[from] toml::de::Error),

    /// TOML document could not be encoded.
    #[error(transparent)]
    TomlEncode(#[from] toml::ser::Error),

    /// YAML document could not be decoded or encoded.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Friendly result alias :3
pub(crate) type Result<T, E = CodecError> = std::result::Result<T, E>;
