// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Keep generated configuration files in sync with the commit taxonomy.
//!
//! Two operations are provided over a target directory:
//!
//! - [`render_all`] runs each selected generator against the file it owns,
//!   merging into it when it exists, and hands back the rendered documents
//!   for the caller to write or print.
//! - [`check_all`] reports every generated file whose content no longer
//!   matches what its generator would produce. Missing files are skipped,
//!   since absence is not drift.
//!
//! Both operations honor a [`FailurePolicy`] that decides whether the first
//! failing generator aborts the run, or whether every generator runs and all
//! failures are reported together.

use crate::{
    config::Taxonomy,
    generator::{Generator, GeneratorError},
};

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs::{read_to_string, write},
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// What to do when a generator fails.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,

    /// Run every generator, then report all failures.
    Continue,
}

/// Generated configuration file ready to be written.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Rendered {
    /// Name of generator that produced the content.
    pub generator: &'static str,

    /// Target path of configuration file.
    pub path: PathBuf,

    /// Generated file content.
    pub content: String,

    /// Whether content was merged into an existing file.
    pub merged: bool,
}

impl Rendered {
    /// Write content to target path.
    ///
    /// # Errors
    ///
    /// - Return [`SyncError::Write`] if target file cannot be written.
    pub fn write(&self) -> Result<()> {
        write(&self.path, &self.content).map_err(|err| SyncError::Write {
            source: err,
            path: self.path.clone(),
        })?;
        info!(path = %self.path.display(), merged = self.merged, "wrote {}", self.generator);

        Ok(())
    }
}

/// Outcome of a sync check.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct SyncReport {
    /// Files that matched their generator output.
    pub in_sync: Vec<PathBuf>,

    /// Files that do not exist and were skipped.
    pub missing: Vec<PathBuf>,

    /// Files that drifted from their generator output.
    pub drifted: Vec<PathBuf>,
}

impl SyncReport {
    /// No file drifted.
    pub fn is_in_sync(&self) -> bool {
        self.drifted.is_empty()
    }
}

impl Display for SyncReport {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        if self.is_in_sync() {
            return fmt.write_str("all configs are in sync with the commit taxonomy");
        }

        writeln!(fmt, "config sync check failed:")?;
        for path in &self.drifted {
            writeln!(fmt, "  - {} is out of sync", path.display())?;
        }

        Ok(())
    }
}

/// Strip leading and trailing whitespace before comparing documents.
pub fn normalize(content: &str) -> &str {
    content.trim()
}

/// Check if `actual` content matches what `generator` would produce.
///
/// # Errors
///
/// - Return [`GeneratorError`] if `actual` cannot be merged into.
pub fn is_in_sync(
    generator: &dyn Generator,
    taxonomy: &Taxonomy,
    actual: &str,
) -> Result<bool, GeneratorError> {
    let expected = generator.generate(taxonomy, Some(actual))?;
    Ok(normalize(&expected) == normalize(actual))
}

/// Read existing configuration file, if any.
///
/// # Errors
///
/// - Return [`SyncError::Read`] if file exists, but cannot be read.
pub fn read_existing(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    match read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SyncError::Read {
            source: err,
            path: path.to_path_buf(),
        }),
    }
}

/// Render configuration files of `generators` inside `dir`.
///
/// # Errors
///
/// - Return [`SyncError::Read`] if existing file cannot be read.
/// - Return [`SyncError::Generate`] if generator fails.
/// - Return [`SyncError::Failures`] if policy is
///   [`FailurePolicy::Continue`] and at least one generator failed.
#[instrument(skip(taxonomy, generators, dir), fields(dir = %dir.as_ref().display()))]
pub fn render_all(
    taxonomy: &Taxonomy,
    generators: &[&dyn Generator],
    dir: impl AsRef<Path>,
    policy: FailurePolicy,
) -> Result<Vec<Rendered>> {
    let dir = dir.as_ref();
    run_each(generators, policy, |generator| {
        let path = dir.join(generator.file_name());
        let existing = read_existing(&path)?;
        debug!(generator = generator.name(), merge = existing.is_some(), "rendering");

        let content = generator
            .generate(taxonomy, existing.as_deref())
            .map_err(|err| SyncError::Generate {
                source: err,
                path: path.clone(),
            })?;

        Ok(Rendered {
            generator: generator.name(),
            path,
            content,
            merged: existing.is_some(),
        })
    })
}

/// Check configuration files of `generators` inside `dir` for drift.
///
/// # Errors
///
/// - Return [`SyncError::Read`] if existing file cannot be read.
/// - Return [`SyncError::Generate`] if existing file cannot be merged into.
/// - Return [`SyncError::Failures`] if policy is
///   [`FailurePolicy::Continue`] and at least one generator failed.
#[instrument(skip(taxonomy, generators, dir), fields(dir = %dir.as_ref().display()))]
pub fn check_all(
    taxonomy: &Taxonomy,
    generators: &[&dyn Generator],
    dir: impl AsRef<Path>,
    policy: FailurePolicy,
) -> Result<SyncReport> {
    let dir = dir.as_ref();
    let statuses = run_each(generators, policy, |generator| {
        let path = dir.join(generator.file_name());
        let Some(actual) = read_existing(&path)? else {
            debug!(generator = generator.name(), "skipping missing file");
            return Ok((path, None));
        };

        let synced = is_in_sync(generator, taxonomy, &actual).map_err(|err| {
            SyncError::Generate {
                source: err,
                path: path.clone(),
            }
        })?;
        debug!(generator = generator.name(), synced, "checked");

        Ok((path, Some(synced)))
    })?;

    let mut report = SyncReport::default();
    for (path, status) in statuses {
        match status {
            None => report.missing.push(path),
            Some(true) => report.in_sync.push(path),
            Some(false) => report.drifted.push(path),
        }
    }

    Ok(report)
}

fn run_each<T>(
    generators: &[&dyn Generator],
    policy: FailurePolicy,
    mut job: impl FnMut(&dyn Generator) -> Result<T>,
) -> Result<Vec<T>> {
    let mut outputs = Vec::with_capacity(generators.len());
    let mut failures = Vec::new();

    for generator in generators {
        match job(*generator) {
            Ok(output) => outputs.push(output),
            Err(err) if policy == FailurePolicy::Abort => return Err(err),
            Err(err) => failures.push(err),
        }
    }

    if failures.is_empty() {
        Ok(outputs)
    } else {
        Err(SyncError::Failures(failures))
    }
}

/// All possible error types for syncing configuration files.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Existing configuration file cannot be read.
    #[error("failed to read {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Configuration file cannot be written.
    #[error("failed to write {:?}", path.display())]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Generator failed on configuration file.
    #[error("failed to generate {:?}", path.display())]
    Generate {
        #[source]
        source: GeneratorError,
        path: PathBuf,
    },

    /// Several generators failed.
    #[error("{} generator(s) failed: {}", .0.len(), join_errors(.0))]
    Failures(Vec<SyncError>),
}

fn join_errors(errors: &[SyncError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Friendly result alias :3
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{fixture, Registry};
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[test]
    fn normalize_trims_surrounding_whitespace_only() {
        assert_eq!(normalize("\n  {\n  \"a\": 1\n}\n\n"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn own_output_is_in_sync() -> anyhow::Result<()> {
        let taxonomy = fixture::taxonomy();
        for generator in Registry::builtin().all() {
            let fresh = generator.generate(&taxonomy, None)?;
            assert!(is_in_sync(generator, &taxonomy, &fresh)?, "{}", generator.name());
            assert!(is_in_sync(generator, &taxonomy, &format!("\n{fresh}\n\n"))?);
        }

        Ok(())
    }

    #[test]
    fn regrouped_taxonomy_drifts() -> anyhow::Result<()> {
        let taxonomy = fixture::taxonomy();
        let regrouped = fixture::regrouped_taxonomy();
        for generator in Registry::builtin().all() {
            let stale = generator.generate(&regrouped, None)?;
            let synced = is_in_sync(generator, &taxonomy, &stale)?;
            // Commitlint only cares about type names, not changelog groups.
            assert_eq!(synced, generator.name() == "commitlint", "{}", generator.name());
        }

        Ok(())
    }

    #[sealed_test]
    fn read_existing_missing_file() -> anyhow::Result<()> {
        assert_eq!(read_existing("nope.json")?, None);
        Ok(())
    }

    #[sealed_test]
    fn check_skips_missing_files() -> anyhow::Result<()> {
        let registry = Registry::builtin();
        let report = check_all(
            &fixture::taxonomy(),
            &registry.all(),
            ".",
            FailurePolicy::Abort,
        )?;
        assert!(report.is_in_sync());
        assert_eq!(report.missing.len(), 7);

        Ok(())
    }

    #[sealed_test]
    fn continue_policy_collects_every_failure() -> anyhow::Result<()> {
        write(".versionrc.json", "{ nope")?;
        write(".commitlintrc.json", "[[[")?;

        let registry = Registry::builtin();
        let generators = registry.select(["commitlint", "changie", "conventional-changelog"])?;

        let result = render_all(&fixture::taxonomy(), &generators, ".", FailurePolicy::Continue);
        match result {
            Err(SyncError::Failures(failures)) => assert_eq!(failures.len(), 2),
            other => panic!("expected collected failures, got {other:?}"),
        }

        let result = render_all(&fixture::taxonomy(), &generators, ".", FailurePolicy::Abort);
        assert!(matches!(result, Err(SyncError::Generate { .. })));

        Ok(())
    }
}
