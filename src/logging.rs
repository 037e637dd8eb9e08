use crate::types::Error;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Install the log sinks: everything at DEBUG into an append-only file for
/// audit, INFO and up mirrored to the console. Each line is a complete
/// record, so interleaved writes from concurrent invocations stay readable.
pub fn init(path: impl AsRef<Path>) -> Result<(), Error> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(LevelFilter::INFO),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
