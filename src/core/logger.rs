use std::path::PathBuf;

use flexi_logger::{
    filter::{self, LogLineFilter},
    Age, Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_RETENTION: usize = 31;

/// Drops lines emitted by the HTTP stack, only the client's own lines are kept.
pub struct IgnoreHttpStack;

impl IgnoreHttpStack {
    fn is_ignored(module_path: &str) -> bool {
        ["reqwest", "hyper", "hyper_util", "h2", "rustls"]
            .iter()
            .any(|p| module_path.starts_with(p))
    }
}

impl LogLineFilter for IgnoreHttpStack {
    fn write(
        &self,
        now: &mut flexi_logger::DeferredNow,
        record: &log::Record,
        log_line_writer: &dyn filter::LogLineWriter,
    ) -> std::io::Result<()> {
        let path = record.module_path().unwrap_or_default();

        if IgnoreHttpStack::is_ignored(path) {
            return Ok(());
        }

        log_line_writer.write(now, record)
    }
}

/// Starts the file logger, rotated daily under `<data_directory>/logs`, warnings are duplicated to
/// stderr. The returned handle must be kept alive for the whole run.
pub fn init(
    level: &str,
    data_directory: &str,
    retention: usize,
) -> Result<LoggerHandle, Box<dyn std::error::Error + Send + Sync>> {
    let directory = PathBuf::from(data_directory).join("logs");

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(directory)
                .basename("ispend"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(retention),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .format(flexi_logger::detailed_format)
        .filter(Box::new(IgnoreHttpStack))
        .write_mode(WriteMode::Async)
        .start()?;

    Ok(handle)
}
