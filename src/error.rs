use std::io;
use std::path::PathBuf;

/// Errors raised while stamping a version into the build artifacts.
///
/// None of these are recovered from: the run stops at the first one and
/// files already patched stay patched.
#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("Metadata file '{}' already exists", .0.display())]
    MetadataExists(PathBuf),
    #[error("Failed to write metadata file '{}': {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read target file '{}': {source}", .path.display())]
    ReadTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write target file '{}': {source}", .path.display())]
    WriteTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{field} '{value}' is not a number")]
    InvalidComponent { field: &'static str, value: String },
    #[error("Build number does not fit in 64 bits")]
    BuildNumberOverflow,
}

pub type Result<T> = std::result::Result<T, StampError>;
