// crates/engine/src/flatten.rs
//! Collapse self-nested directories.
//!
//! A tree such as `products/crane/crane/photo.jpg` is the result of
//! extracting an archive into a folder of the same name. For every directory
//! `D`, each descendant directory carrying exactly the same name as `D` has
//! its files moved up into `D` and is removed once empty.
//!
//! Directories are visited deepest first, so `a/a/a` is folded into `a/a`
//! before `a/a` is folded into `a`. The root itself only takes part when
//! `include_root` is set.

use crate::config::Config;
use crate::convert::sanitize_options;
use crate::error::{EngineError, Result};
use crate::filesystem::{collect_dirs, list_files};
use crate::path_security::{is_within, sanitize_root};
use crate::progress::Event;
use crate::stats::{FlattenAction, FlattenActionKind, FlattenReport, RunInfo};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Collapse every same-name nesting under the configured root.
///
/// Files are never overwritten: a move whose destination exists is recorded
/// as a conflict and the inner directory is kept.
///
/// # Errors
///
/// Returns an error only when the root is invalid.
pub fn flatten_tree<F>(config: &Config, on_event: F) -> Result<FlattenReport>
where
    F: Fn(&Event<'_>),
{
    let root = sanitize_root(&config.walk.root, &sanitize_options(config))?;
    if root.was_symlink {
        log::info!(
            "{} is a symlink, flattening {}",
            config.walk.root.display(),
            root.canonical.display()
        );
    }
    let options = &config.flatten;
    let mut report = FlattenReport::new(RunInfo::start(config.walk.root.clone()), options.dry_run);

    let mut dirs = collect_dirs(&config.walk.root, &config.walk)?;
    if !options.include_root {
        dirs.retain(|d| d != &config.walk.root);
    }
    report.dirs_scanned = dirs.len();

    for outer in &dirs {
        // Already folded into its parent.
        if !outer.is_dir() {
            continue;
        }
        let Some(name) = dir_name(outer, &config.walk.root, &root.canonical) else {
            continue;
        };

        for inner in nested_namesakes(outer, &name, config)? {
            if !inner.is_dir() {
                continue;
            }
            report.collapsed += 1;
            log::debug!("collapsing {} into {}", inner.display(), outer.display());
            on_event(&Event::Collapsing {
                outer,
                inner: &inner,
            });
            collapse(outer, &inner, options.dry_run, &mut report, &on_event);
        }
    }
    report.run.finish();

    log::debug!(
        "flatten finished: collapsed={} moved={} conflicts={} removed={}",
        report.collapsed,
        report.files_moved,
        report.conflicts,
        report.dirs_removed
    );
    Ok(report)
}

/// The root may be given as `.` and has no file name of its own.
fn dir_name(dir: &Path, root: &Path, canonical_root: &Path) -> Option<OsString> {
    if dir == root {
        return canonical_root.file_name().map(ToOwned::to_owned);
    }
    dir.file_name().map(ToOwned::to_owned)
}

/// Descendants of `outer` (excluding itself) named exactly `name`, deepest first.
fn nested_namesakes(outer: &Path, name: &OsString, config: &Config) -> Result<Vec<PathBuf>> {
    let mut walk = config.walk.clone();
    walk.max_depth = None;
    Ok(collect_dirs(outer, &walk)?
        .into_iter()
        .filter(|d| d != outer && d.file_name() == Some(name.as_os_str()))
        .collect())
}

fn collapse<F>(outer: &Path, inner: &Path, dry_run: bool, report: &mut FlattenReport, on_event: &F)
where
    F: Fn(&Event<'_>),
{
    let files = match list_files(inner) {
        Ok(files) => files,
        Err(e) => {
            record_error(report, inner, None, &e, on_event);
            return;
        }
    };

    let mut all_moved = true;
    for from in &files {
        let Some(file_name) = from.file_name() else {
            continue;
        };
        let to = outer.join(file_name);

        if !is_within(outer, &to) {
            let e = EngineError::Config(format!("refusing to move outside {}", outer.display()));
            record_error(report, from, Some(&to), &e, on_event);
            all_moved = false;
            continue;
        }

        if to.symlink_metadata().is_ok() {
            log::debug!(
                "not moving {}: {} already exists",
                from.display(),
                to.display()
            );
            on_event(&Event::Conflict { from, to: &to });
            report.record(action(FlattenActionKind::Conflict, from, Some(&to)));
            all_moved = false;
            continue;
        }

        if !dry_run
            && let Err(source) = fs::rename(from, &to)
        {
            let e = EngineError::FileMove {
                from: from.clone(),
                to: to.clone(),
                source,
            };
            record_error(report, from, Some(&to), &e, on_event);
            all_moved = false;
            continue;
        }

        on_event(&Event::Moved {
            from,
            to: &to,
            planned: dry_run,
        });
        report.record(action(FlattenActionKind::MoveFile, from, Some(&to)));
    }

    remove_if_empty(inner, dry_run, all_moved, report, on_event);
}

/// Removal failures are expected (leftover subdirectories) and only logged.
fn remove_if_empty<F>(
    inner: &Path,
    dry_run: bool,
    all_moved: bool,
    report: &mut FlattenReport,
    on_event: &F,
) where
    F: Fn(&Event<'_>),
{
    let removed = if dry_run {
        all_moved && !has_non_file_entries(inner)
    } else {
        match fs::remove_dir(inner) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("keeping {}: {e}", inner.display());
                false
            }
        }
    };

    if removed {
        on_event(&Event::RemovedDir {
            path: inner,
            planned: dry_run,
        });
        report.record(action(FlattenActionKind::RemoveDir, inner, None));
    } else {
        on_event(&Event::KeptDir(inner));
        report.record(action(FlattenActionKind::KeepDir, inner, None));
    }
}

fn has_non_file_entries(dir: &Path) -> bool {
    fs::read_dir(dir).map_or(true, |entries| {
        entries
            .filter_map(std::result::Result::ok)
            .any(|e| !e.file_type().is_ok_and(|ft| ft.is_file()))
    })
}

fn action(kind: FlattenActionKind, from: &Path, to: Option<&Path>) -> FlattenAction {
    FlattenAction {
        kind,
        from: from.to_path_buf(),
        to: to.map(Path::to_path_buf),
        error: None,
    }
}

fn record_error<F>(
    report: &mut FlattenReport,
    path: &Path,
    to: Option<&Path>,
    error: &EngineError,
    on_event: &F,
) where
    F: Fn(&Event<'_>),
{
    log::debug!("{error}");
    on_event(&Event::Failed { path, error });
    let mut entry = action(FlattenActionKind::Error, path, to);
    entry.error = Some(error.to_string());
    report.record(entry);
}
