use crate::config::{MatchOptions, WalkOptions};
use crate::error::Result;
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};

/// Build a walker over `root` honouring the walk options.
///
/// Ignore files are off unless `git_ignore` is set, so by default every
/// entry below the root is visited.
fn walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .require_git(false)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
        .sort_by_file_name(std::ffi::OsStr::cmp);
    builder
}

/// Entries the walker failed on are logged and dropped.
fn entries(builder: &WalkBuilder) -> impl Iterator<Item = DirEntry> {
    builder.build().filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("skipping unreadable entry: {e}");
            None
        }
    })
}

/// Recursive listing of regular files under the root that pass `matcher`.
///
/// Order is deterministic: depth-first, siblings sorted by file name.
///
/// # Errors
/// Currently infallible once the walker is built; kept fallible so callers
/// treat walking like every other engine step.
pub fn collect_files(options: &WalkOptions, matcher: &MatchOptions) -> Result<Vec<PathBuf>> {
    let builder = walker(&options.root, options);
    let files = entries(&builder)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(DirEntry::into_path)
        .filter(|path| matcher.matches(path))
        .collect::<Vec<_>>();

    log::debug!(
        "collected {} matching files under {}",
        files.len(),
        options.root.display()
    );
    Ok(files)
}

/// All directories under `root` (inclusive), deepest first.
///
/// # Errors
/// See [`collect_files`].
pub fn collect_dirs(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let builder = walker(root, options);
    let mut dirs: Vec<(usize, PathBuf)> = entries(&builder)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_dir()))
        .map(|entry| (entry.depth(), entry.into_path()))
        .collect();

    // Stable sort keeps the walk order among directories of equal depth.
    dirs.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(dirs.into_iter().map(|(_, p)| p).collect())
}

/// Regular files directly inside `dir`, sorted by name.
///
/// # Errors
/// Returns `EngineError::FileRead` if the directory cannot be listed.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = std::fs::read_dir(dir).map_err(|source| crate::error::EngineError::FileRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| crate::error::EngineError::FileRead {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_ok_and(|ft| ft.is_file()) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
