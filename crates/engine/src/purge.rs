use crate::config::Config;
use crate::convert::{colliding_owner, sanitize_options, target_owners, webp_target};
use crate::error::{EngineError, Result};
use crate::filesystem::collect_files;
use crate::path_security::sanitize_root;
use crate::progress::Event;
use crate::stats::{FileOutcome, FileStatus, PurgeReport, RunInfo};
use std::path::Path;

/// Delete the matched originals under the configured root.
///
/// Callers must have confirmation before calling this. Only files accepted by
/// the matcher are ever removed.
///
/// # Errors
///
/// Returns an error only when the root is invalid.
pub fn purge_tree<F>(config: &Config, on_event: F) -> Result<PurgeReport>
where
    F: Fn(&Event<'_>),
{
    sanitize_root(&config.walk.root, &sanitize_options(config))?;
    let files = collect_files(&config.walk, &config.matcher)?;
    let options = &config.purge;

    let mut report = PurgeReport::new(RunInfo::start(config.walk.root.clone()), options.dry_run);

    let owners = target_owners(&files);

    for path in &files {
        let keep_reason = if !options.require_webp {
            None
        } else if !webp_target(path).is_file() {
            Some("no .webp counterpart")
        } else if colliding_owner(&owners, path).is_some() {
            Some(".webp belongs to another image")
        } else {
            None
        };

        let outcome = if let Some(reason) = keep_reason {
            on_event(&Event::Kept { path, reason });
            FileOutcome::new(path.clone(), FileStatus::Kept)
        } else if options.dry_run {
            // Counted as deleted; the report's `dry_run` flag marks it as a plan.
            on_event(&Event::WouldDelete(path));
            FileOutcome::new(path.clone(), FileStatus::Deleted)
        } else {
            delete_one(path, &on_event)
        };
        report.record(outcome);
    }
    report.run.finish();

    log::debug!(
        "purge finished: found={} deleted={} kept={} failed={}",
        report.found,
        report.deleted,
        report.kept,
        report.failed
    );
    Ok(report)
}

fn delete_one<F>(path: &Path, on_event: &F) -> FileOutcome
where
    F: Fn(&Event<'_>),
{
    match std::fs::remove_file(path) {
        Ok(()) => {
            on_event(&Event::Deleted(path));
            FileOutcome::new(path.to_path_buf(), FileStatus::Deleted)
        }
        Err(source) => {
            let error = EngineError::FileRemove {
                path: path.to_path_buf(),
                source,
            };
            log::debug!("{error}");
            on_event(&Event::Failed { path, error: &error });
            FileOutcome::new(path.to_path_buf(), FileStatus::Failed).with_error(error)
        }
    }
}
