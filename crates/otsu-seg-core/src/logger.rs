//! Process-wide logging for the `otsu-seg` binaries and tests.
//!
//! `init_with_level` installs a `log` backend that writes one line per record
//! to stderr:
//!
//! ```text
//! +0.012s INFO  pipeline: plan: Single { level: 125, background: Dark }
//! ```
//!
//! The offset counts from installation. The target is shortened to its last
//! module segment. Calling `init_with_level` again only changes the level.
//!
//! With the `tracing` feature, `init_tracing` installs a `tracing-subscriber`
//! formatter that also reports span timings for segmentation runs.

use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

struct RunLog {
    origin: Instant,
}

static RUN_LOG: OnceLock<RunLog> = OnceLock::new();

fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn render(since_start: Duration, record: &Record<'_>) -> String {
    format!(
        "+{:.3}s {:<5} {}: {}",
        since_start.as_secs_f64(),
        record.level(),
        short_target(record.target()),
        record.args()
    )
}

impl Log for RunLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = render(self.origin.elapsed(), record);
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Route `log` records to stderr at `level` and below.
///
/// Fails when a different logger was installed before the first call.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut first = false;
    let run_log = RUN_LOG.get_or_init(|| {
        first = true;
        RunLog {
            origin: Instant::now(),
        }
    });
    if first {
        log::set_logger(run_log)?;
    }
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// `json` switches to flattened JSON events for machine consumption.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let installed = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.with_timer(fmt::time::Uptime::default()).finish().try_init()
    };
    if installed.is_err() {
        log::debug!("tracing subscriber already installed");
    }
}
