//! Process-wide `tracing` setup.
//!
//! One registry with three parts: a reloadable level filter, a stdout layer
//! that can be muted while the screens are in use, and a file layer whose
//! target is chosen after startup. Runtime changes go through the functions
//! below once [`init_default_logging`] has run.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Local;
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging is not initialized")]
    NotInitialized,

    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot apply log filter: {0}")]
    Reload(String),

    #[error("cannot open log file '{}': {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ── record format ────────────────────────────────────────────────────────

/// `12:04:05.123  WARN carbon_http::client: message key=value`
///
/// The file layer also stamps the date since log files outlive a session.
struct CarbonFormat {
    with_date: bool,
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CarbonFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Local::now();
        let stamp = if self.with_date {
            now.format("%Y-%m-%d %H:%M:%S%.3f")
        } else {
            now.format("%H:%M:%S%.3f")
        };

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}:\x1b[0m ",
                level_color(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ── file target ──────────────────────────────────────────────────────────

type LogFile = Arc<Mutex<Option<File>>>;

fn lock(file: &LogFile) -> MutexGuard<'_, Option<File>> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer for the file layer; records are discarded while no file is open.
#[derive(Clone)]
struct FileTarget(LogFile);

struct FileTargetGuard<'a>(MutexGuard<'a, Option<File>>);

impl Write for FileTargetGuard<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for FileTarget {
    type Writer = FileTargetGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileTargetGuard(lock(&self.0))
    }
}

// ── runtime controls ─────────────────────────────────────────────────────

type ReloadFn = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

/// Type-erased reload handles plus the file slot, set once by
/// [`init_default_logging`].
struct Controls {
    level: ReloadFn,
    stdout: ReloadFn,
    file: LogFile,
}

static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn controls() -> Result<&'static Controls, LoggingError> {
    CONTROLS.get().ok_or(LoggingError::NotInitialized)
}

fn reload_fn<S>(handle: reload::Handle<EnvFilter, S>) -> ReloadFn
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| handle.reload(filter))
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

/// Replaces the level filter. Takes a bare level (`debug`) or any
/// `EnvFilter` directive (`carbon_http=trace,warn`).
pub fn set_log_level(directive: &str) -> Result<(), LoggingError> {
    let filter = parse_filter(directive)?;
    (controls()?.level)(filter).map_err(|e| LoggingError::Reload(e.to_string()))
}

/// Mutes or unmutes stdout records. The file layer is unaffected.
pub fn set_stdout_enabled(enabled: bool) -> Result<(), LoggingError> {
    // The level filter stays the ceiling; this gate only opens or closes.
    let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
    (controls()?.stdout)(gate).map_err(|e| LoggingError::Reload(e.to_string()))
}

/// Appends records to `path` from now on, closing any previous log file.
pub fn enable_file_logging(path: &Path) -> Result<(), LoggingError> {
    let controls = controls()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
    *lock(&controls.file) = Some(file);
    Ok(())
}

pub fn disable_file_logging() {
    if let Ok(controls) = controls() {
        *lock(&controls.file) = None;
    }
}

// ── setup ────────────────────────────────────────────────────────────────

/// Installs the global subscriber. Later calls are no-ops.
///
/// `RUST_LOG` takes precedence over `default_level`; an unparsable value of
/// either falls back to `warn`. Stdout is coloured only on a terminal and the
/// file layer stays idle until [`enable_file_logging`].
pub fn init_default_logging(default_level: &str) {
    let level = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let (level, level_handle) = reload::Layer::new(level);
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));
    let file: LogFile = Arc::new(Mutex::new(None));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(CarbonFormat { with_date: false })
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(CarbonFormat { with_date: true })
        .with_ansi(false)
        .with_writer(FileTarget(Arc::clone(&file)));

    let installed = tracing_subscriber::registry()
        .with(level)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();
    if installed.is_ok() {
        let _ = CONTROLS.set(Controls {
            level: reload_fn(level_handle),
            stdout: reload_fn(stdout_handle),
            file,
        });
    }
}

/// [`init_default_logging`] followed by the rest of the `[logging]` section.
pub fn init_from_config(config: &LoggingConfig) -> Result<(), LoggingError> {
    init_default_logging(&config.level);
    set_stdout_enabled(config.stdout)?;
    if let Some(path) = &config.file {
        enable_file_logging(path)?;
    }
    Ok(())
}
