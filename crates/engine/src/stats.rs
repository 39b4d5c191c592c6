use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Converted,
    Skipped,
    Deleted,
    Kept,
    Failed,
}

/// What happened to one matched file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    #[must_use]
    pub const fn new(source: PathBuf, status: FileStatus) -> Self {
        Self {
            source,
            target: None,
            status,
            error: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: PathBuf) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// Timing shared by every report.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub root: PathBuf,
    pub started_at: DateTime<Local>,
    pub elapsed_ms: u128,
}

impl RunInfo {
    #[must_use]
    pub fn start(root: PathBuf) -> Self {
        Self {
            root,
            started_at: Local::now(),
            elapsed_ms: 0,
        }
    }

    pub fn finish(&mut self) {
        let elapsed = Local::now().signed_duration_since(self.started_at);
        self.elapsed_ms = u128::try_from(elapsed.num_milliseconds()).unwrap_or(0);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    pub run: RunInfo,
    pub found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
}

impl ConvertReport {
    #[must_use]
    pub const fn new(run: RunInfo) -> Self {
        Self {
            run,
            found: 0,
            converted: 0,
            skipped: 0,
            failed: 0,
            files: Vec::new(),
        }
    }

    /// Outcomes that are not conversion results are logged and ignored.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome.status {
            FileStatus::Converted => self.converted += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed => self.failed += 1,
            FileStatus::Deleted | FileStatus::Kept => {
                log::warn!(
                    "ignoring {:?} outcome for {} in a conversion report",
                    outcome.status,
                    outcome.source.display()
                );
                return;
            }
        }
        self.found += 1;
        self.files.push(outcome);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurgeReport {
    pub run: RunInfo,
    pub dry_run: bool,
    pub found: usize,
    pub deleted: usize,
    pub kept: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
}

impl PurgeReport {
    #[must_use]
    pub const fn new(run: RunInfo, dry_run: bool) -> Self {
        Self {
            run,
            dry_run,
            found: 0,
            deleted: 0,
            kept: 0,
            failed: 0,
            files: Vec::new(),
        }
    }

    /// Conversion outcomes are logged and ignored.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome.status {
            FileStatus::Deleted => self.deleted += 1,
            FileStatus::Kept | FileStatus::Skipped => self.kept += 1,
            FileStatus::Failed => self.failed += 1,
            FileStatus::Converted => {
                log::warn!(
                    "ignoring converted outcome for {} in a purge report",
                    outcome.source.display()
                );
                return;
            }
        }
        self.found += 1;
        self.files.push(outcome);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlattenActionKind {
    MoveFile,
    Conflict,
    RemoveDir,
    KeepDir,
    Error,
}

/// One step taken (or planned, in dry-run mode) by the flattener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlattenAction {
    pub kind: FlattenActionKind,
    pub from: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlattenReport {
    pub run: RunInfo,
    pub dry_run: bool,
    pub dirs_scanned: usize,
    /// Nested same-name directories found.
    pub collapsed: usize,
    pub files_moved: usize,
    pub conflicts: usize,
    pub dirs_removed: usize,
    pub errors: usize,
    pub actions: Vec<FlattenAction>,
}

impl FlattenReport {
    #[must_use]
    pub const fn new(run: RunInfo, dry_run: bool) -> Self {
        Self {
            run,
            dry_run,
            dirs_scanned: 0,
            collapsed: 0,
            files_moved: 0,
            conflicts: 0,
            dirs_removed: 0,
            errors: 0,
            actions: Vec::new(),
        }
    }

    pub fn record(&mut self, action: FlattenAction) {
        match action.kind {
            FlattenActionKind::MoveFile => self.files_moved += 1,
            FlattenActionKind::Conflict => self.conflicts += 1,
            FlattenActionKind::RemoveDir => self.dirs_removed += 1,
            FlattenActionKind::KeepDir => {}
            FlattenActionKind::Error => self.errors += 1,
        }
        self.actions.push(action);
    }
}
