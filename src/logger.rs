use core::fmt::{Debug, Write};

use core::sync::atomic::{AtomicBool, Ordering};

use libc::{write, STDERR_FILENO};
use tracing::{Event, Level, Subscriber};
use tracing_core::field::{Field, Visit};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::config::{config, LOG_ENV_VAR};

// Formats events straight onto stderr without touching the heap, so it is
// safe to log from inside an allocation hook.
struct NoAllocLogger;

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for NoAllocLogger {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut writer = LowLevelWriter;

        let color = match *event.metadata().level() {
            Level::TRACE => "\x1b[36m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let reset = "\x1b[0m";

        let _ = write!(
            writer,
            "[{color}{}{reset}] {}: ",
            event.metadata().level(),
            event.metadata().target()
        );
        event.record(&mut FieldWriter { writer: &mut writer });
        let _ = writer.write_str("\n");
    }
}

struct FieldWriter<'w, W> {
    writer: &'w mut W,
}

impl<W: Write> Visit for FieldWriter<'_, W> {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            let _ = write!(self.writer, "{value:?}");
        } else {
            let _ = write!(self.writer, " {}={value:?}", field.name());
        }
    }
}

// Direct low-level `stderr` writer using `libc::write`
struct LowLevelWriter;

impl Write for LowLevelWriter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        unsafe {
            write(STDERR_FILENO, s.as_ptr() as *const _, s.len());
        }
        Ok(())
    }
}

static LOGGING_STARTED: AtomicBool = AtomicBool::new(false);

// Only the first caller gets `true`. Everyone else returns at once, even while
// the winner is still installing; their early events are simply dropped.
fn claim(started: &AtomicBool) -> bool {
    !started.load(Ordering::Relaxed) && !started.swap(true, Ordering::AcqRel)
}

/// Installs the stderr logger at the configured level.
///
/// Runs once per process and never waits on another thread. Does nothing
/// when logging is off or when the host already installed a global
/// subscriber.
pub fn init_logging() {
    if !claim(&LOGGING_STARTED) {
        return;
    }

    let config = config();
    if config.log_level != tracing_subscriber::filter::LevelFilter::OFF {
        let subscriber = tracing_subscriber::Registry::default()
            .with(NoAllocLogger.with_filter(config.log_level));
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            return;
        }
    }

    if let Some(rejected) = &config.rejected_log_level {
        tracing::warn!("ignoring {LOG_ENV_VAR}={rejected:?}, not a log level");
    }
}
