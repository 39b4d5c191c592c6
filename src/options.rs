use clap::ValueEnum;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Progress lines and a plain-text summary
    #[default]
    Text,
    /// The full report as pretty-printed JSON, no progress lines
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn shows_progress(self) -> bool {
        matches!(self, Self::Text)
    }
}
