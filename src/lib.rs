//! Finds photos in an archive tree whose file names start with an
//! anniversary-style reference date (today, a week ago, a year ago, ...),
//! so they can be moved into a rotating album.

mod cli;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
