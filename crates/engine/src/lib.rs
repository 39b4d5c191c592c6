// crates/engine/src/lib.rs
//! Engine behind `asset_tidy`.
//!
//! Three operations run over a single root directory:
//!
//! - [`convert_tree`]: JPEG/PNG files to lossy WebP next to the originals
//! - [`purge_tree`]: delete the matched originals
//! - [`flatten_tree`]: fold `dir/dir/` nestings back into `dir/`
//!
//! Every operation walks the tree once, handles each entry independently and
//! returns a report with counters. Per-entry failures end up in the report;
//! only an unusable root is returned as an error.

pub mod config;
pub mod convert;
pub mod error;
pub mod filesystem;
pub mod flatten;
pub mod options;
pub mod path_security;
pub mod progress;
pub mod purge;
pub mod stats;

pub use crate::convert::convert_tree;
pub use crate::flatten::flatten_tree;
pub use crate::purge::purge_tree;
