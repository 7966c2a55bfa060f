use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("source directory {} is missing or not a directory: {source}", .path.display())]
    SourceMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not create destination directory {}: {source}", .path.display())]
    DestinationCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Verified pair of archive directories. Holding one means the source was a
/// readable directory and the destination existed (or was created) as a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    source_dir: PathBuf,
    destination_dir: PathBuf,
}

impl ArchiveLayout {
    pub fn init(
        source_dir: impl AsRef<Path>,
        destination_dir: impl AsRef<Path>,
    ) -> Result<Self, ArchiveError> {
        let source_dir = source_dir.as_ref().to_path_buf();
        let destination_dir = destination_dir.as_ref().to_path_buf();

        ensure_source(&source_dir)?;
        ensure_destination(&destination_dir)?;

        Ok(Self {
            source_dir,
            destination_dir,
        })
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }
}

fn ensure_source(path: &Path) -> Result<(), ArchiveError> {
    let metadata = fs::metadata(path).map_err(|source| ArchiveError::SourceMissing {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(ArchiveError::SourceMissing {
            path: path.to_path_buf(),
            source: io::Error::other("path exists but is not a directory"),
        });
    }

    Ok(())
}

fn ensure_destination(path: &Path) -> Result<(), ArchiveError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ArchiveError::DestinationCreateFailed {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        }),
        Err(_) => {
            fs::create_dir_all(path).map_err(|source| ArchiveError::DestinationCreateFailed {
                path: path.to_path_buf(),
                source,
            })?;
            info!(destination = %path.display(), "created destination directory");
            Ok(())
        }
    }
}
