use crate::options::{DEFAULT_EXTENSIONS, DEFAULT_QUALITY, normalize_extension};
use derive_builder::Builder;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub root: PathBuf,
    #[builder(default = "true")]
    pub hidden: bool,
    #[builder(default)]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            hidden: true,
            git_ignore: false,
            max_depth: None,
            follow_links: false,
        }
    }
}

/// Which files count as source images.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct MatchOptions {
    #[builder(default = "default_extensions()")]
    pub extensions: Vec<String>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl MatchOptions {
    /// Case-insensitive extension match.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = normalize_extension(ext);
        self.extensions.iter().any(|e| *e == ext)
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct ConvertOptions {
    #[builder(default = "DEFAULT_QUALITY")]
    pub quality: f32,
    #[builder(default)]
    pub keep_alpha: bool,
    #[builder(default)]
    pub skip_existing: bool,
    /// 1 runs sequentially, 0 uses every core.
    #[builder(default = "1")]
    pub jobs: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            keep_alpha: false,
            skip_existing: false,
            jobs: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct PurgeOptions {
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default)]
    pub require_webp: bool,
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct FlattenOptions {
    #[builder(default)]
    pub dry_run: bool,
    /// Also fold namesakes of the root folder itself into the root.
    #[builder(default)]
    pub include_root: bool,
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default)]
    pub matcher: MatchOptions,
    #[builder(default)]
    pub convert: ConvertOptions,
    #[builder(default)]
    pub purge: PurgeOptions,
    #[builder(default)]
    pub flatten: FlattenOptions,
}

impl Config {
    /// Default configuration rooted at `root`.
    #[must_use]
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            walk: WalkOptions {
                root: root.into(),
                ..WalkOptions::default()
            },
            ..Self::default()
        }
    }
}
