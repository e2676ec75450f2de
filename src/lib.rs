// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Generate commit tooling configuration from a single source of truth.
//!
//! Projects keep one __commit taxonomy__ (`commit-types.json`) describing
//! their commit types, changelog groups, and version bumps. From it, this
//! crate generates or updates the native configuration files of several
//! release and changelog tools:
//!
//! | Generator                | File                         |
//! |--------------------------|------------------------------|
//! | `changie`                | `.changie.yaml`              |
//! | `cliff`                  | `cliff.toml`                 |
//! | `commitlint`             | `.commitlintrc.json`         |
//! | `conventional-changelog` | `.versionrc.json`            |
//! | `release-please`         | `release-please-config.json` |
//! | `release-plz`            | `release-plz.toml`           |
//! | `semantic-release`       | `.releaserc.json`            |
//!
//! Existing files are merged into rather than overwritten, so any setting
//! that is not derived from the taxonomy survives regeneration.
//!
//! # See Also
//!
//! 1. [`Taxonomy`]
//! 2. [`Registry`]
//! 3. [`sync`]

pub mod config;
pub mod generator;
pub mod sync;

pub use config::{Bump, CommitType, Taxonomy};
pub use generator::{Generator, Registry};
