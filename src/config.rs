// src/config.rs
use crate::args::{ConvertArgs, FlattenArgs, MatchArgs, PurgeArgs, ScanOptions};
use crate::error::{AppError, Result};
pub use asset_tidy_engine::config::{
    Config, ConfigBuilder, ConvertOptions, ConvertOptionsBuilder, FlattenOptionsBuilder,
    MatchOptions, MatchOptionsBuilder, PurgeOptionsBuilder, WalkOptions, WalkOptionsBuilder,
};
use std::path::{Path, PathBuf};

fn builder_error(e: impl std::fmt::Display) -> AppError {
    AppError::Config(e.to_string())
}

fn walk_options(path: &Path, scan: &ScanOptions) -> Result<WalkOptions> {
    WalkOptionsBuilder::default()
        .root(path)
        .hidden(!scan.skip_hidden)
        .git_ignore(scan.gitignore)
        .max_depth(scan.max_depth)
        .follow_links(scan.follow)
        .build()
        .map_err(builder_error)
}

fn match_options(matcher: &MatchArgs) -> Result<MatchOptions> {
    // First occurrence wins so the order given on the command line is kept.
    let mut extensions: Vec<String> = Vec::with_capacity(matcher.ext.len());
    for ext in &matcher.ext {
        if !extensions.contains(ext) {
            extensions.push(ext.clone());
        }
    }
    MatchOptionsBuilder::default()
        .extensions(extensions)
        .build()
        .map_err(builder_error)
}

impl TryFrom<&ConvertArgs> for Config {
    type Error = AppError;

    fn try_from(args: &ConvertArgs) -> Result<Self> {
        let convert = ConvertOptionsBuilder::default()
            .quality(args.quality)
            .keep_alpha(args.keep_alpha)
            .skip_existing(args.skip_existing)
            .jobs(args.jobs)
            .build()
            .map_err(builder_error)?;
        let purge = PurgeOptionsBuilder::default()
            .require_webp(args.require_webp)
            .build()
            .map_err(builder_error)?;

        ConfigBuilder::default()
            .walk(walk_options(&args.path, &args.scan)?)
            .matcher(match_options(&args.matcher)?)
            .convert(convert)
            .purge(purge)
            .build()
            .map_err(builder_error)
    }
}

impl TryFrom<&PurgeArgs> for Config {
    type Error = AppError;

    fn try_from(args: &PurgeArgs) -> Result<Self> {
        let purge = PurgeOptionsBuilder::default()
            .dry_run(args.dry_run)
            .require_webp(args.require_webp)
            .build()
            .map_err(builder_error)?;

        ConfigBuilder::default()
            .walk(walk_options(&args.path, &args.scan)?)
            .matcher(match_options(&args.matcher)?)
            .purge(purge)
            .build()
            .map_err(builder_error)
    }
}

impl TryFrom<&FlattenArgs> for Config {
    type Error = AppError;

    fn try_from(args: &FlattenArgs) -> Result<Self> {
        let flatten = FlattenOptionsBuilder::default()
            .dry_run(args.dry_run)
            .include_root(args.include_root)
            .build()
            .map_err(builder_error)?;

        ConfigBuilder::default()
            .walk(walk_options(&args.path, &args.scan)?)
            .flatten(flatten)
            .build()
            .map_err(builder_error)
    }
}

/// Configuration used by the interactive flow: defaults everywhere.
#[must_use]
pub fn interactive_config(folder: PathBuf) -> Config {
    Config::for_root(folder)
}
