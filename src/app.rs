// src/app.rs
//! Runs one parsed command line against the engine.
//!
//! All user-facing text goes to the `output` writer so the whole flow can be
//! driven with in-memory buffers.

use crate::args::{Args, Command, ConvertArgs, FlattenArgs, GlobalOptions, PurgeArgs};
use crate::config::{Config, interactive_config};
use crate::error::{AppError, Result};
use crate::options::OutputFormat;
use crate::{presentation, prompt};
use asset_tidy_engine::progress::Event;
use asset_tidy_engine::stats::{ConvertReport, PurgeReport};
use asset_tidy_engine::{convert_tree, flatten_tree, purge_tree};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const FOLDER_PROMPT: &str = "Folder to convert (e.g. src/assets/images): ";
pub const DELETE_PROMPT: &str = "Delete original JPG/PNG files? (s/n): ";

/// What the caller needs to pick an exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Files or folders that could not be processed.
    pub failures: usize,
}

/// Serialises writes from the progress callback, which may run on worker threads.
struct Printer<'w, W: Write> {
    out: Mutex<&'w mut W>,
    format: OutputFormat,
    quiet: bool,
}

impl<'w, W: Write + Send> Printer<'w, W> {
    fn new(out: &'w mut W, global: &GlobalOptions) -> Self {
        Self {
            out: Mutex::new(out),
            format: global.format,
            quiet: global.quiet,
        }
    }

    fn lock(&self) -> MutexGuard<'_, &'w mut W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    const fn text(&self) -> bool {
        self.format.shows_progress()
    }

    fn progress(&self, text: &str) -> Result<()> {
        if self.text() && !self.quiet {
            writeln!(self.lock(), "{text}")?;
        }
        Ok(())
    }

    fn event(&self, event: &Event<'_>) {
        if self.text() && !self.quiet {
            let _ = writeln!(self.lock(), "{}", presentation::format_event(event));
        }
    }

    fn summary(&self, text: &str) -> Result<()> {
        if self.text() {
            write!(self.lock(), "{text}")?;
        }
        Ok(())
    }

    fn json(&self, value: &serde_json::Value) -> Result<()> {
        writeln!(self.lock(), "{}", presentation::to_json(value)?)?;
        Ok(())
    }

    /// Questions go to stderr when stdout carries JSON.
    fn confirm<R: BufRead>(&self, input: &mut R, question: &str) -> Result<bool> {
        if self.text() {
            let mut out = self.lock();
            Ok(prompt::confirm(input, &mut **out, question)?)
        } else {
            Ok(prompt::confirm(input, &mut io::stderr().lock(), question)?)
        }
    }

    fn ask<R: BufRead>(&self, input: &mut R, question: &str) -> Result<Option<String>> {
        if self.text() {
            let mut out = self.lock();
            Ok(prompt::ask(input, &mut **out, question)?)
        } else {
            Ok(prompt::ask(input, &mut io::stderr().lock(), question)?)
        }
    }
}

/// Dispatch the parsed command line.
///
/// # Errors
///
/// Returns an error for fatal problems only: an unusable root folder, a
/// missing folder answer, or I/O failures on the terminal streams.
pub fn run<R, W>(args: &Args, input: &mut R, output: &mut W) -> Result<Outcome>
where
    R: BufRead,
    W: Write + Send,
{
    let printer = Printer::new(output, &args.global);
    match &args.command {
        Some(Command::Convert(convert)) => run_convert(convert, &printer, input),
        Some(Command::Purge(purge)) => run_purge(purge, &printer, input),
        Some(Command::Flatten(flatten)) => run_flatten(flatten, &printer),
        None => run_interactive(&printer, input),
    }
}

fn run_convert<R, W>(args: &ConvertArgs, printer: &Printer<'_, W>, input: &mut R) -> Result<Outcome>
where
    R: BufRead,
    W: Write + Send,
{
    let config = Config::try_from(args)?;
    let delete = if args.delete_originals {
        Some(args.yes)
    } else {
        None
    };
    convert_then_purge(&config, delete, printer, input)
}

/// `delete`: `None` never deletes, `Some(true)` deletes without asking,
/// `Some(false)` asks first.
fn convert_then_purge<R, W>(
    config: &Config,
    delete: Option<bool>,
    printer: &Printer<'_, W>,
    input: &mut R,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write + Send,
{
    let converted = convert(config, printer)?;
    let mut failures = converted.failed;

    let confirmed = match delete {
        None => false,
        Some(true) => true,
        Some(false) => printer.confirm(input, DELETE_PROMPT)?,
    };
    log::info!("delete originals confirmed: {confirmed}");

    let purged = if confirmed {
        let report = purge(config, printer)?;
        failures += report.failed;
        Some(report)
    } else {
        None
    };

    if !printer.text() {
        let value = match purged {
            Some(purged) => serde_json::json!({ "convert": converted, "purge": purged }),
            None => serde_json::json!({ "convert": converted }),
        };
        printer.json(&value)?;
    }
    Ok(Outcome { failures })
}

fn convert<W: Write + Send>(config: &Config, printer: &Printer<'_, W>) -> Result<ConvertReport> {
    printer.progress(&presentation::convert_header(&config.walk.root))?;
    let report = convert_tree(config, |event: &Event<'_>| printer.event(event))?;
    printer.summary(&presentation::convert_summary(&report))?;
    Ok(report)
}

fn purge<W: Write + Send>(config: &Config, printer: &Printer<'_, W>) -> Result<PurgeReport> {
    printer.progress(&presentation::purge_header(
        &config.walk.root,
        &config.matcher.extensions,
    ))?;
    let report = purge_tree(config, |event: &Event<'_>| printer.event(event))?;
    printer.summary(&presentation::purge_summary(&report))?;
    Ok(report)
}

fn run_purge<R, W>(args: &PurgeArgs, printer: &Printer<'_, W>, input: &mut R) -> Result<Outcome>
where
    R: BufRead,
    W: Write + Send,
{
    let config = Config::try_from(args)?;

    if !args.yes && !args.dry_run {
        let question = format!(
            "Delete all {} files under {}? (s/n): ",
            config.matcher.extensions.join("/"),
            args.path.display()
        );
        if !printer.confirm(input, &question)? {
            printer.progress("Nothing deleted.")?;
            return Ok(Outcome::default());
        }
    }

    let report = purge(&config, printer)?;
    if !printer.text() {
        printer.json(&serde_json::to_value(&report)?)?;
    }
    Ok(Outcome {
        failures: report.failed,
    })
}

fn run_flatten<W: Write + Send>(args: &FlattenArgs, printer: &Printer<'_, W>) -> Result<Outcome> {
    let config = Config::try_from(args)?;

    printer.progress(&presentation::flatten_header(&config.walk.root))?;
    let report = flatten_tree(&config, |event: &Event<'_>| printer.event(event))?;
    printer.summary(&presentation::flatten_summary(&report))?;

    if !printer.text() {
        printer.json(&serde_json::to_value(&report)?)?;
    }
    Ok(Outcome {
        failures: report.errors,
    })
}

fn run_interactive<R, W>(printer: &Printer<'_, W>, input: &mut R) -> Result<Outcome>
where
    R: BufRead,
    W: Write + Send,
{
    let folder = printer
        .ask(input, FOLDER_PROMPT)?
        .filter(|answer| !answer.is_empty())
        .ok_or(AppError::NoFolder)?;
    let folder = strip_quotes(&folder);
    log::info!("interactive run on {}", folder.display());

    convert_then_purge(&interactive_config(folder), Some(false), printer, input)
}

/// Paths pasted from a file manager often arrive quoted.
fn strip_quotes(answer: &str) -> PathBuf {
    let trimmed = answer
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| answer.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(answer);
    Path::new(trimmed).to_path_buf()
}
