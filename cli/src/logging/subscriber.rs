//! Tracing subscriber setup: console formatter, run-log layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path};

/// Tracing target for phase banners.
pub(super) const STAGE_TARGET: &str = "provision::stage";

/// Tracing target for dry-run actions.
pub(super) const DRY_RUN_TARGET: &str = "provision::dry_run";

/// How an event is rendered, decided by its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Column tag used in the run log.
    const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "STAGE",
            Self::DryRun => "DRY",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

/// Pulls the formatted `message` field out of an event.
#[derive(Default)]
struct Message(String);

impl tracing::field::Visit for Message {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut message = Message::default();
    event.record(&mut message);
    message.0
}

/// Plain-text run log at `$XDG_CACHE_HOME/provision/provision.log`.
///
/// Each line is `HH:MM:SS TAG   message`. The file is truncated at startup.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the run log and write its first line.
    ///
    /// Returns `None` if the cache directory or file is unavailable.
    pub(super) fn new() -> Option<Self> {
        let path = log_file_path()?;
        let version =
            option_env!("PROVISION_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let mut file = fs::File::create(&path).ok()?;
        writeln!(file, "# provision {version} started {} UTC", format_utc_datetime()).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let kind = Kind::of(event.metadata());
        let msg = message_of(event);
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{} {:<5} {msg}", format_utc_time(), kind.tag()).ok();
        }
    }
}

/// Console output: bold phase banners preceded by a blank line, bold red
/// warnings, red errors, and plain progress lines.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = message_of(event);
        match Kind::of(event.metadata()) {
            Kind::Stage => writeln!(writer, "\n\x1b[1m{msg}\x1b[0m"),
            Kind::Warn => writeln!(writer, "\x1b[31;1m{msg}\x1b[0m"),
            Kind::Error => writeln!(writer, "\x1b[31m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "[dry run] {msg}"),
            Kind::Info => writeln!(writer, "{msg}"),
            Kind::Debug => writeln!(writer, "\x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout (errors and warnings to stderr) at `INFO`,
/// or `DEBUG` when `verbose`. The run log always receives `DEBUG` and above.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new().map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
