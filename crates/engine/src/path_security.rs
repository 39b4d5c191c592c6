// crates/engine/src/path_security.rs
//! Path checks applied before the engine touches a tree.
//!
//! Every run starts from a single root directory. The root is validated and
//! canonicalised once, and every file the flattener moves must stay inside
//! the directory it was found in.
//!
//! # Example
//!
//! ```rust,ignore
//! use asset_tidy_engine::path_security::{sanitize_root, PathSanitizeOptions};
//! use std::path::Path;
//!
//! let root = sanitize_root(Path::new("./src/assets"), &PathSanitizeOptions::default())?;
//! assert!(root.canonical.is_absolute());
//! ```

use crate::error::{EngineError, Result};
use std::path::{Component, Path, PathBuf};

/// Options for root validation.
#[derive(Debug, Clone)]
pub struct PathSanitizeOptions {
    /// Accept a root that is itself a symbolic link.
    ///
    /// When `false` (default), symlinked roots are rejected.
    pub allow_symlinks: bool,

    /// Maximum number of normal components in the given path.
    ///
    /// Default: 256 levels.
    pub max_depth: usize,

    /// Reject paths containing null bytes.
    pub reject_null_bytes: bool,
}

impl Default for PathSanitizeOptions {
    fn default() -> Self {
        Self {
            allow_symlinks: false,
            max_depth: 256,
            reject_null_bytes: true,
        }
    }
}

impl PathSanitizeOptions {
    /// Allow symlinked roots (used with `--follow`).
    #[must_use]
    pub const fn with_symlinks(mut self) -> Self {
        self.allow_symlinks = true;
        self
    }
}

/// A validated root directory.
#[derive(Debug, Clone)]
pub struct SanitizedPath {
    /// Absolute, resolved path.
    pub canonical: PathBuf,
    pub was_symlink: bool,
}

/// Validate a root directory and resolve it.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains null bytes
/// - The path exceeds maximum depth
/// - The path is a symlink and symlinks are not allowed
/// - The path cannot be canonicalized (doesn't exist, permission denied, etc.)
/// - The path is not a directory
pub fn sanitize_root(path: &Path, options: &PathSanitizeOptions) -> Result<SanitizedPath> {
    if options.reject_null_bytes && path.to_string_lossy().contains('\0') {
        return Err(EngineError::Config("Path contains null bytes".into()));
    }

    let depth = count_path_depth(path);
    if depth > options.max_depth {
        return Err(EngineError::Config(format!(
            "Path exceeds maximum depth of {} (found {})",
            options.max_depth, depth
        )));
    }

    let was_symlink = path.is_symlink();
    if was_symlink && !options.allow_symlinks {
        return Err(EngineError::Config(format!(
            "Symbolic links are not allowed: {}",
            path.display()
        )));
    }

    let canonical = path.canonicalize().map_err(|e| {
        EngineError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to canonicalize path '{}': {}", path.display(), e),
        ))
    })?;

    if !canonical.is_dir() {
        return Err(EngineError::Config(format!(
            "Not a directory: {}",
            path.display()
        )));
    }

    Ok(SanitizedPath {
        canonical,
        was_symlink,
    })
}

/// Lexical containment check: `candidate` resolves to `root` or below it.
///
/// Does not access the filesystem; `..` components are folded first.
#[must_use]
pub fn is_within(root: &Path, candidate: &Path) -> bool {
    let (Some(root), Some(candidate)) = (normalize(root), normalize(candidate)) else {
        return false;
    };
    candidate.starts_with(root)
}

/// Fold `.` and `..` components. Returns `None` when `..` would climb above
/// the first component.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut normal_depth = 0usize;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normal_depth == 0 {
                    return None;
                }
                normal_depth -= 1;
                out.pop();
            }
            Component::Normal(part) => {
                normal_depth += 1;
                out.push(part);
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

fn count_path_depth(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}
