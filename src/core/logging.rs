//! Process tracing setup and the append-only notification failure log

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Safe to call more than once,
/// later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format! {
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                }
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Line oriented log of failed calls to the notification service.
#[derive(Clone, Debug)]
pub struct NotificationLog {
    path: PathBuf,
}

impl NotificationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[<timestamp>] <message>` to the log file.
    ///
    /// Never fails. Problems creating the directory or writing the line
    /// are reported through tracing and otherwise ignored.
    pub fn log(&self, message: &str) {
        tracing::warn!("{}", message);

        if let Err(e) = self.append(message) {
            tracing::warn!(
                "Unable to write notification log {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn append(&self, message: &str) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let line = format!(
            "[{}] {}\n",
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            message
        );
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_the_directory_and_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("notifications.log");
        let log = NotificationLog::new(&path);

        log.log("first");
        log.log("second");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] first"));
        assert!(lines[1].ends_with("] second"));
        assert!(contents.ends_with('\n'));

        // The bracketed prefix is an RFC 3339 timestamp
        let stamp = &lines[0][1..lines[0].find(']').unwrap()];
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn it_does_not_panic_when_the_directory_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let log = NotificationLog::new(blocker.join("notifications.log"));

        log.log("goes nowhere");

        assert!(!blocker.join("notifications.log").exists());
    }
}
