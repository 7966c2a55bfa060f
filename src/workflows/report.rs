use super::archive::ArchiveLayout;
use super::reference_dates::{DateBucket, ReferenceDate, ReferenceDates};
use super::scanner::{ErrorStrategy, PhotoMatch, ScanOptions, ScanOutcome, SkippedEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCountEntry {
    pub bucket: DateBucket,
    pub bucket_label: String,
    pub date: NaiveDate,
    pub matches: usize,
}

/// Everything one scan found, ready to render or hand to a relocation step.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub today: NaiveDate,
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub on_error: ErrorStrategy,
    pub reference_dates: Vec<ReferenceDate>,
    pub bucket_counts: Vec<BucketCountEntry>,
    pub matches: Vec<PhotoMatch>,
    pub skipped: Vec<SkippedEntry>,
}

impl ScanReport {
    pub fn new(
        layout: &ArchiveLayout,
        dates: &ReferenceDates,
        options: ScanOptions,
        outcome: ScanOutcome,
    ) -> Self {
        let ScanOutcome { matches, skipped } = outcome;

        let bucket_counts = dates
            .entries()
            .iter()
            .map(|reference| BucketCountEntry {
                bucket: reference.bucket,
                bucket_label: reference.bucket.label().to_string(),
                date: reference.date,
                matches: matches
                    .iter()
                    .filter(|found| found.bucket == reference.bucket)
                    .count(),
            })
            .collect();

        Self {
            today: dates.today(),
            source_dir: layout.source_dir().to_path_buf(),
            destination_dir: layout.destination_dir().to_path_buf(),
            on_error: options.on_error,
            reference_dates: dates.entries().to_vec(),
            bucket_counts,
            matches,
            skipped,
        }
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.matches.iter().map(|found| found.path.as_path()).collect()
    }

    pub fn matches_in(&self, bucket: DateBucket) -> impl Iterator<Item = &PhotoMatch> {
        self.matches
            .iter()
            .filter(move |found| found.bucket == bucket)
    }
}
