//! Plain-text alert reports
//!
//! A report is one line per alert (`"{file}: {message}"`) or per failed file
//! (`"{file}: ERROR - {error}"`), written to a timestamped file that is
//! removed again after a retention delay.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::result::{FileOutcome, FileReport};

/// Default lifetime of a report file
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(300);

pub fn render_lines(reports: &[FileReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        match &report.outcome {
            FileOutcome::Alerts { alerts } => {
                lines.extend(
                    alerts
                        .iter()
                        .map(|alert| format!("{}: {}", report.file, alert.message)),
                );
            }
            FileOutcome::Error { error } => {
                lines.push(format!("{}: ERROR - {}", report.file, error));
            }
        }
    }
    lines
}

/// `{base}_{YYYYmmdd_HHMMSS}.{ext}` for the current local time
pub fn timestamped_filename(base: &str, ext: &str) -> String {
    filename_at(base, ext, Local::now())
}

fn filename_at(base: &str, ext: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.{}", base, at.format("%Y%m%d_%H%M%S"), ext)
}

/// Write the rendered report into `dir` and return its path
pub fn write_report(dir: &Path, reports: &[FileReport]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(timestamped_filename("alerts", "txt"));

    let mut file = fs::File::create(&path)?;
    for line in render_lines(reports) {
        writeln!(file, "{}", line)?;
    }
    file.sync_all()?;

    info!(path = %path.display(), files = reports.len(), "report written");
    Ok(path)
}

/// Delete `path` after `delay` on a detached thread
///
/// A file that is already gone is not an error.
pub fn schedule_removal(path: PathBuf, delay: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(delay);
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "report removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %path.display(), error = %err, "report removal failed"),
        }
    })
}
