// src/presentation.rs
use crate::error::Result;
use asset_tidy_engine::progress::Event;
use asset_tidy_engine::stats::{ConvertReport, FlattenReport, PurgeReport};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// One progress line per event.
#[must_use]
pub fn format_event(event: &Event<'_>) -> String {
    match event {
        Event::Processing(path) => format!("Processing: {}", path.display()),
        Event::Converted { target, .. } => format!("  ✔ Converted: {}", target.display()),
        Event::Skipped { target, .. } => format!("  ↷ Already exists: {}", target.display()),
        Event::Failed { path, error } => format!("  ✗ Error with {}: {error}", path.display()),
        Event::Deleted(path) => format!("  🗑 Deleted: {}", path.display()),
        Event::WouldDelete(path) => format!("  would delete: {}", path.display()),
        Event::Kept { path, reason } => format!("  kept {} ({reason})", path.display()),
        Event::Collapsing { outer, inner } => {
            format!("Collapsing {} into {}", inner.display(), outer.display())
        }
        Event::Moved { from, to, planned } => format!(
            "  {} {} -> {}",
            if *planned { "would move" } else { "moved" },
            from.display(),
            to.display()
        ),
        Event::Conflict { from, to } => format!(
            "  ! not moving {}: {} already exists",
            from.display(),
            to.display()
        ),
        Event::RemovedDir { path, planned } => format!(
            "  {} {}",
            if *planned { "would remove" } else { "removed" },
            path.display()
        ),
        Event::KeptDir(path) => format!("  kept folder {} (not empty)", path.display()),
    }
}

#[must_use]
pub fn convert_header(root: &Path) -> String {
    format!("Searching for images in: {}", root.display())
}

#[must_use]
pub fn purge_header(root: &Path, extensions: &[String]) -> String {
    let list = extensions
        .iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Deleting {list} files in: {}", root.display())
}

#[must_use]
pub fn flatten_header(root: &Path) -> String {
    format!("Looking for self-nested folders in: {}", root.display())
}

#[must_use]
pub fn convert_summary(report: &ConvertReport) -> String {
    let mut out = String::from("---\n");
    let _ = writeln!(out, "Total images found: {}", report.found);
    let _ = writeln!(out, "Converted: {}", report.converted);
    if report.skipped > 0 {
        let _ = writeln!(out, "Skipped: {}", report.skipped);
    }
    let _ = writeln!(out, "Errors: {}", report.failed);
    if report.found == 0 {
        out.push_str("No JPG, JPEG or PNG images were found under the given path.\n");
    }
    out
}

#[must_use]
pub fn purge_summary(report: &PurgeReport) -> String {
    let mut out = String::new();
    if report.dry_run {
        let _ = writeln!(out, "Would delete: {}", report.deleted);
    } else {
        let _ = writeln!(out, "Total deleted: {}", report.deleted);
    }
    if report.kept > 0 {
        let _ = writeln!(out, "Kept: {}", report.kept);
    }
    if report.failed > 0 {
        let _ = writeln!(out, "Errors: {}", report.failed);
    }
    if report.deleted == 0 && !report.dry_run {
        out.push_str("No files were deleted in any subfolder.\n");
    }
    out
}

#[must_use]
pub fn flatten_summary(report: &FlattenReport) -> String {
    let mut out = String::from("---\n");
    let _ = writeln!(
        out,
        "{}: {} nested folders, {} files moved, {} conflicts, {} folders removed, {} errors.",
        if report.dry_run {
            "Flatten plan"
        } else {
            "Flatten complete"
        },
        report.collapsed,
        report.files_moved,
        report.conflicts,
        report.dirs_removed,
        report.errors
    );
    out
}

/// Pretty JSON of any report.
///
/// # Errors
/// Returns an error if serialisation fails.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
