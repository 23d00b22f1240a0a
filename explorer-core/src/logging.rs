//! src/logging.rs
//! ============================================================================
//! Tracing setup: one daily-rolling, non-blocking file layer with a compact
//! sequence-numbered line format. The terminal belongs to the UI, so nothing
//! is written to stderr.

use std::{
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::{Context, Result};
use tracing::Metadata;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    filter::Directive,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

static SEQ: AtomicU64 = AtomicU64::new(1);

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`. Keep the guard alive until exit
    /// or buffered lines are lost.
    pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
        std::fs::create_dir_all(&config.dir).with_context(|| {
            format!("Failed to create log directory: {}", config.dir.display())
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(config.file_prefix.as_str())
            .filename_suffix("log")
            .max_log_files(10)
            .build(&config.dir)
            .context("Failed to create file appender")?;

        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        let filter = EnvFilter::from_default_env().add_directive(
            Directive::from_str(&config.level).context("Invalid log level in config")?,
        );

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(non_blocking)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        Ok(guard)
    }
}

/// Custom formatter: `[SEQ] LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        // monotonically-increasing sequence number
        let seq: u64 = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
