use crate::config::{Config, ConvertOptions};
use crate::error::{EngineError, Result};
use crate::filesystem::collect_files;
use crate::path_security::{PathSanitizeOptions, sanitize_root};
use crate::progress::Event;
use crate::stats::{ConvertReport, FileOutcome, FileStatus, RunInfo};
use image::{DynamicImage, GenericImageView, ImageReader};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Largest width or height libwebp accepts.
pub const WEBP_MAX_DIMENSION: u32 = 16_383;

/// `photo.JPG` -> `photo.webp`, in the same directory.
#[must_use]
pub fn webp_target(source: &Path) -> PathBuf {
    source.with_extension("webp")
}

/// The first file in walk order that maps to each `.webp` target.
///
/// `a.jpg` and `a.png` share `a.webp`; only the first of them owns it.
pub(crate) fn target_owners(files: &[PathBuf]) -> HashMap<PathBuf, &Path> {
    let mut owners = HashMap::with_capacity(files.len());
    for file in files {
        owners.entry(webp_target(file)).or_insert(file.as_path());
    }
    owners
}

/// Another file that already owns the `.webp` target of `path`, if any.
pub(crate) fn colliding_owner<'a>(
    owners: &HashMap<PathBuf, &'a Path>,
    path: &Path,
) -> Option<&'a Path> {
    owners
        .get(&webp_target(path))
        .copied()
        .filter(|owner| *owner != path)
}

/// Convert every matched image under the configured root.
///
/// Per-file failures are recorded in the report and never abort the run.
///
/// # Errors
///
/// Returns an error only when the root is invalid or the worker pool cannot
/// be created.
pub fn convert_tree<F>(config: &Config, on_event: F) -> Result<ConvertReport>
where
    F: Fn(&Event<'_>) + Sync,
{
    sanitize_root(&config.walk.root, &sanitize_options(config))?;
    let files = collect_files(&config.walk, &config.matcher)?;
    let options = &config.convert;

    let owners = target_owners(&files);

    let mut report = ConvertReport::new(RunInfo::start(config.walk.root.clone()));

    let outcomes: Vec<FileOutcome> = if options.jobs == 1 {
        files
            .iter()
            .map(|path| convert_one(path, colliding_owner(&owners, path), options, &on_event))
            .collect()
    } else {
        let threads = if options.jobs == 0 {
            num_cpus::get()
        } else {
            options.jobs
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| {
            files
                .par_iter()
                .map(|path| convert_one(path, colliding_owner(&owners, path), options, &on_event))
                .collect()
        })
    };

    for outcome in outcomes {
        report.record(outcome);
    }
    report.run.finish();

    log::debug!(
        "convert finished: found={} converted={} skipped={} failed={}",
        report.found,
        report.converted,
        report.skipped,
        report.failed
    );
    Ok(report)
}

pub(crate) fn sanitize_options(config: &Config) -> PathSanitizeOptions {
    let options = PathSanitizeOptions::default();
    if config.walk.follow_links {
        options.with_symlinks()
    } else {
        options
    }
}

/// `owner` is set when an earlier file already claims the same `.webp`; the
/// file then fails instead of overwriting that output.
fn convert_one<F>(
    source: &Path,
    owner: Option<&Path>,
    options: &ConvertOptions,
    on_event: &F,
) -> FileOutcome
where
    F: Fn(&Event<'_>),
{
    on_event(&Event::Processing(source));
    let target = webp_target(source);

    if let Some(owner) = owner {
        let error = EngineError::TargetCollision {
            path: source.to_path_buf(),
            target,
            owner: owner.to_path_buf(),
        };
        log::debug!("{error}");
        on_event(&Event::Failed {
            path: source,
            error: &error,
        });
        return FileOutcome::new(source.to_path_buf(), FileStatus::Failed).with_error(error);
    }

    if options.skip_existing && target.is_file() {
        on_event(&Event::Skipped {
            source,
            target: &target,
        });
        return FileOutcome::new(source.to_path_buf(), FileStatus::Skipped).with_target(target);
    }

    match convert_file(source, &target, options) {
        Ok(()) => {
            on_event(&Event::Converted {
                source,
                target: &target,
            });
            FileOutcome::new(source.to_path_buf(), FileStatus::Converted).with_target(target)
        }
        Err(error) => {
            log::debug!("failed to convert {}: {error}", source.display());
            on_event(&Event::Failed {
                path: source,
                error: &error,
            });
            FileOutcome::new(source.to_path_buf(), FileStatus::Failed).with_error(error)
        }
    }
}

/// Decode `source` and write it as lossy WebP to `target`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or decoded, the encoder
/// rejects it, or the target cannot be written.
pub fn convert_file(source: &Path, target: &Path, options: &ConvertOptions) -> Result<()> {
    let image = decode(source)?;
    let bytes = encode_webp(&image, options)?;
    std::fs::write(target, bytes).map_err(|e| EngineError::FileWrite {
        path: target.to_path_buf(),
        source: e,
    })?;
    log::debug!("wrote {}", target.display());
    Ok(())
}

/// Format is sniffed from the content, not the extension.
fn decode(path: &Path) -> Result<DynamicImage> {
    let read_err = |e| EngineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    };
    let reader = ImageReader::open(path)
        .map_err(read_err)?
        .with_guessed_format()
        .map_err(read_err)?;
    Ok(reader.decode()?)
}

/// Encode as lossy WebP. Alpha is dropped unless `keep_alpha` is set and the
/// image has an alpha channel.
///
/// # Errors
///
/// Returns an error for images larger than libwebp supports or when the
/// encoder fails.
pub fn encode_webp(image: &DynamicImage, options: &ConvertOptions) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(EngineError::Dimensions { width, height });
    }

    let quality = options.quality.clamp(0.0, 100.0);
    let encoded = if options.keep_alpha && image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        encoder.encode_simple(false, quality).map(|m| m.to_vec())
    } else {
        let rgb = image.to_rgb8();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
        encoder.encode_simple(false, quality).map(|m| m.to_vec())
    };

    encoded.map_err(|e| EngineError::Encode(format!("{e:?}")))
}
