// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use commit_config_gen::{
    sync::{check_all, render_all, FailurePolicy},
    Registry, Taxonomy,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
    path::{Path, PathBuf},
    process::exit,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "commit-config-gen [options] <command>",
    subcommand_help_heading = "Commands",
    version
)]
struct Cli {
    /// Path to commit taxonomy file.
    #[arg(
        short,
        long,
        global = true,
        default_value = "commit-types.json",
        value_name = "path"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<bool> {
        let registry = Registry::builtin();
        match self.command {
            Command::Generate(opts) => run_generate(&self.config, &registry, opts),
            Command::Check(opts) => run_check(&self.config, &registry, opts),
            Command::List => run_list(&registry),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Generate configuration files from commit taxonomy.
    #[command(override_usage = "commit-config-gen generate [options]")]
    Generate(GenerateOptions),

    /// Verify configuration files are in sync with commit taxonomy.
    #[command(override_usage = "commit-config-gen check [options]")]
    Check(CheckOptions),

    /// List available generators.
    #[command(override_usage = "commit-config-gen list")]
    List,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct GenerateOptions {
    /// Print generated content without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Output directory for generated files.
    #[arg(short, long, default_value = ".", value_name = "dir")]
    pub output: PathBuf,

    /// Generators to run, all of them by default.
    #[arg(short, long, value_delimiter = ',', value_name = "name")]
    pub generators: Vec<String>,

    /// Keep running remaining generators after a failure.
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct CheckOptions {
    /// Directory containing configuration files to check.
    #[arg(short, long, default_value = ".", value_name = "dir")]
    pub dir: PathBuf,

    /// Generators to check, all present files by default.
    #[arg(short, long, value_delimiter = ',', value_name = "name")]
    pub generators: Vec<String>,

    /// Keep checking remaining generators after a failure.
    #[arg(long)]
    pub keep_going: bool,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    match run() {
        Ok(true) => exit(0),
        Ok(false) => exit(1),
        Err(error) => {
            error!("{error:?}");
            exit(1);
        }
    }
}

fn run() -> Result<bool> {
    Cli::parse().run()
}

fn failure_policy(keep_going: bool) -> FailurePolicy {
    if keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    }
}

fn run_generate(config: &Path, registry: &Registry, opts: GenerateOptions) -> Result<bool> {
    let taxonomy = Taxonomy::load(config).context("failed to load commit taxonomy")?;
    let generators = registry.select(&opts.generators)?;

    let rendered = render_all(
        &taxonomy,
        &generators,
        &opts.output,
        failure_policy(opts.keep_going),
    )?;
    for document in rendered {
        if opts.dry_run {
            println!("=== {} ===", document.path.display());
            println!("{}", document.content);
            continue;
        }

        document.write()?;
    }

    Ok(true)
}

fn run_check(config: &Path, registry: &Registry, opts: CheckOptions) -> Result<bool> {
    let taxonomy = Taxonomy::load(config).context("failed to load commit taxonomy")?;
    let generators = registry.select(&opts.generators)?;

    let report = check_all(
        &taxonomy,
        &generators,
        &opts.dir,
        failure_policy(opts.keep_going),
    )?;
    if report.is_in_sync() {
        info!("{report}");
        return Ok(true);
    }

    print!("{report}");
    println!("\nRun 'commit-config-gen generate' to fix");

    Ok(false)
}

fn run_list(registry: &Registry) -> Result<bool> {
    for generator in registry.all() {
        println!("{:<25} {}", generator.name(), generator.file_name());
    }

    Ok(true)
}
