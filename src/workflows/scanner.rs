use super::archive::ArchiveLayout;
use super::reference_dates::{DateBucket, ReferenceDate, ReferenceDates};
use super::report::ScanReport;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Lowercased suffix a file name needs to be considered a photo.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// What to do when an entry under the source tree cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorStrategy {
    /// Abort the walk and discard everything collected so far.
    #[default]
    FailFast,
    /// Log the entry, record it as skipped, keep walking.
    Continue,
}

impl ErrorStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::Continue => "continue",
        }
    }
}

impl FromStr for ErrorStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "abort" => Ok(Self::FailFast),
            "continue" | "skip" => Ok(Self::Continue),
            other => Err(format!(
                "unknown error strategy '{other}' (expected 'fail-fast' or 'continue')"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub on_error: ErrorStrategy,
    /// Visit directory entries in file-name order so results are reproducible.
    pub sorted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("walk aborted at {}: {source}", .path.display())]
    WalkAborted {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoMatch {
    pub path: PathBuf,
    pub bucket: DateBucket,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub matches: Vec<PhotoMatch>,
    pub skipped: Vec<SkippedEntry>,
}

/// Walks a source tree and collects photos named after one of the reference dates.
#[derive(Debug)]
pub struct PhotoScanner<'a> {
    dates: &'a ReferenceDates,
    options: ScanOptions,
}

impl<'a> PhotoScanner<'a> {
    pub fn new(dates: &'a ReferenceDates, options: ScanOptions) -> Self {
        Self { dates, options }
    }

    pub fn scan(&self, layout: &ArchiveLayout) -> Result<ScanReport, ScanError> {
        let outcome = self.scan_dir(layout.source_dir())?;
        Ok(ScanReport::new(layout, self.dates, self.options, outcome))
    }

    /// Reference date a file name belongs to, if any. Matching is on the
    /// lowercased name, which must end in `.jpg` and start with the date.
    pub fn classify(&self, file_name: &str) -> Option<&'a ReferenceDate> {
        let file_name = file_name.to_lowercase();
        if !file_name.ends_with(IMAGE_EXTENSION) {
            return None;
        }
        self.dates.match_prefix(&file_name)
    }

    pub fn scan_dir(&self, root: &Path) -> Result<ScanOutcome, ScanError> {
        let prefixes: Vec<&str> = self.dates.prefixes().collect();
        info!(source = %root.display(), ?prefixes, "searching for dated photos");

        let mut walker = WalkDir::new(root);
        if self.options.sorted {
            walker = walker.sort_by_file_name();
        }

        let mut outcome = ScanOutcome::default();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    self.on_access_error(&mut outcome, path, io::Error::from(err))?;
                    continue;
                }
            };

            let path = entry.path();
            // Symlinks are resolved the way a stat would; dangling ones count as access failures.
            let metadata = match fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    self.on_access_error(&mut outcome, path.to_path_buf(), err)?;
                    continue;
                }
            };
            if metadata.is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            debug!(file = %file_name, "checking file");
            if let Some(reference) = self.classify(&file_name) {
                info!(path = %path.display(), bucket = reference.bucket.label(), "matched photo");
                outcome.matches.push(PhotoMatch {
                    path: path.to_path_buf(),
                    bucket: reference.bucket,
                    date: reference.date,
                });
            }
        }

        info!(
            matches = outcome.matches.len(),
            skipped = outcome.skipped.len(),
            "scan finished"
        );
        Ok(outcome)
    }

    fn on_access_error(
        &self,
        outcome: &mut ScanOutcome,
        path: PathBuf,
        err: io::Error,
    ) -> Result<(), ScanError> {
        match self.options.on_error {
            ErrorStrategy::FailFast => Err(ScanError::WalkAborted { path, source: err }),
            ErrorStrategy::Continue => {
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                outcome.skipped.push(SkippedEntry {
                    path,
                    reason: err.to_string(),
                });
                Ok(())
            }
        }
    }
}
