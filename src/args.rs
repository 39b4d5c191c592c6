// src/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{
    options::OutputFormat,
    parsers::{parse_extension, parse_jobs, parse_positive_usize, parse_quality},
};

/// Top-level CLI arguments parsed via clap.
///
/// Without a subcommand the tool asks for a folder on stdin, converts it and
/// then offers to delete the originals.
#[derive(Parser, Debug)]
#[command(
    name = "asset_tidy",
    version = crate::VERSION,
    about = "Convert JPEG/PNG assets to WebP and fold self-nested folders",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every JPEG/PNG under DIR to lossy WebP next to the original
    Convert(ConvertArgs),
    /// Delete the JPEG/PNG originals under DIR
    Purge(PurgeArgs),
    /// Move files out of `name/name/` folders into `name/` and drop the empty copy
    Flatten(FlattenArgs),
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true, help_heading = "Output")]
    pub format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Output")]
    pub verbose: u8,

    /// Only print the summary
    #[arg(short, long, global = true, conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,

    /// Exit with status 1 when any file failed
    #[arg(long, global = true, help_heading = "Behavior")]
    pub strict: bool,
}

/// Directory traversal options
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScanOptions {
    /// Skip hidden files and folders
    #[arg(long, help_heading = "Scan")]
    pub skip_hidden: bool,

    /// Honour .gitignore files found in the tree
    #[arg(long, help_heading = "Scan")]
    pub gitignore: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long, help_heading = "Scan")]
    pub follow: bool,

    /// Maximum depth below DIR
    #[arg(long, value_parser = parse_positive_usize, help_heading = "Scan")]
    pub max_depth: Option<usize>,
}

/// Which files are treated as source images
#[derive(clap::Args, Debug, Clone)]
pub struct MatchArgs {
    /// Source extensions (comma separated, subset of jpg,jpeg,png)
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_extension,
        default_values = ["jpg", "jpeg", "png"],
        help_heading = "Scan"
    )]
    pub ext: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Folder to convert
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// WebP quality (0-100)
    #[arg(long, default_value_t = 80.0, value_parser = parse_quality, help_heading = "Convert")]
    pub quality: f32,

    /// Keep the alpha channel of transparent PNGs instead of flattening to RGB
    #[arg(long, help_heading = "Convert")]
    pub keep_alpha: bool,

    /// Leave files alone whose .webp already exists
    #[arg(long, help_heading = "Convert")]
    pub skip_existing: bool,

    /// Parallel conversions (0 = one per CPU core)
    #[arg(short, long, default_value_t = 1, value_parser = parse_jobs, help_heading = "Convert")]
    pub jobs: usize,

    /// Offer to delete the originals after converting
    #[arg(long, help_heading = "Delete")]
    pub delete_originals: bool,

    /// Delete without asking (with --delete-originals)
    #[arg(short, long, requires = "delete_originals", help_heading = "Delete")]
    pub yes: bool,

    /// Only delete originals that have a .webp next to them
    #[arg(long, requires = "delete_originals", help_heading = "Delete")]
    pub require_webp: bool,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub matcher: MatchArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PurgeArgs {
    /// Folder to clean
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Delete without asking
    #[arg(short, long, help_heading = "Delete")]
    pub yes: bool,

    /// List what would be deleted without deleting
    #[arg(long, help_heading = "Delete")]
    pub dry_run: bool,

    /// Only delete originals that have a .webp next to them
    #[arg(long, help_heading = "Delete")]
    pub require_webp: bool,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub matcher: MatchArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FlattenArgs {
    /// Folder to restructure
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Show the moves without touching anything
    #[arg(long, help_heading = "Flatten")]
    pub dry_run: bool,

    /// Also collapse folders named like DIR itself into DIR
    #[arg(long, help_heading = "Flatten")]
    pub include_root: bool,

    #[command(flatten)]
    pub scan: ScanOptions,
}
