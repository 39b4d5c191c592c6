use crate::error::EngineError;
use std::path::Path;

/// Per-entry notifications emitted while a run is in progress.
///
/// The engine never prints; front ends render these however they like.
#[derive(Debug)]
pub enum Event<'a> {
    Processing(&'a Path),
    Converted { source: &'a Path, target: &'a Path },
    Skipped { source: &'a Path, target: &'a Path },
    Failed { path: &'a Path, error: &'a EngineError },
    Deleted(&'a Path),
    WouldDelete(&'a Path),
    Kept { path: &'a Path, reason: &'static str },
    Collapsing { outer: &'a Path, inner: &'a Path },
    Moved { from: &'a Path, to: &'a Path, planned: bool },
    Conflict { from: &'a Path, to: &'a Path },
    RemovedDir { path: &'a Path, planned: bool },
    KeptDir(&'a Path),
}

/// Callback that ignores every event.
pub fn silent(_: &Event<'_>) {}
