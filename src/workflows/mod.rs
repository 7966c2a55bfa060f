pub mod archive;
pub mod iso_week;
pub mod reference_dates;
pub mod report;
pub mod scanner;

pub use archive::{ArchiveError, ArchiveLayout};
pub use iso_week::{first_day_of_iso_week, start_of_iso_week, weeks_in_iso_year};
pub use reference_dates::{DateBucket, ReferenceDate, ReferenceDateError, ReferenceDates};
pub use report::{BucketCountEntry, ScanReport};
pub use scanner::{
    ErrorStrategy, PhotoMatch, PhotoScanner, ScanError, ScanOptions, ScanOutcome, SkippedEntry,
    IMAGE_EXTENSION,
};
