//! The `version` metadata file read by the packaging scripts.
//!
//! Consumers parse it by column, so labels and padding are fixed.

use crate::error::{Result, StampError};
use crate::version::VersionSpec;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Name of the metadata file when no other is configured.
pub const METADATA_FILE_NAME: &str = "version";

/// Renders the full metadata text for `version`.
pub fn render(version: &VersionSpec) -> String {
    let dotted = version.dotted();
    format!(
        "AppVersion         {}\n\
         AppVersionStrMajor {}\n\
         AppVersionStrSmall {}\n\
         AppVersionStr      {}\n\
         BetaChannel        0\n\
         AlphaVersion       0\n\
         AppVersionOriginal {}\n",
        version.build_number(),
        version.major_minor(),
        dotted,
        dotted,
        dotted
    )
}

/// Creates `path` and writes the metadata into it.
///
/// Fails with [`StampError::MetadataExists`] without touching the file when
/// it is already there.
pub fn create(path: &Path, version: &VersionSpec) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(StampError::MetadataExists(path.to_path_buf()));
        }
        Err(source) => return Err(StampError::Metadata { path: path.to_path_buf(), source }),
    };

    file.write_all(render(version).as_bytes())
        .map_err(|source| StampError::Metadata { path: path.to_path_buf(), source })?;
    info!("Wrote metadata file {}", path.display());
    Ok(())
}

/// Deletes a metadata file left over from an earlier run. Returns whether a
/// file was removed.
pub fn remove_stale(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Removed stale metadata file {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StampError::Metadata { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{BuildNumberStrategy, VersionComponents};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn spec() -> VersionSpec {
        let components = VersionComponents::new("1", "2", "3", "45").unwrap();
        VersionSpec::new(components, &BuildNumberStrategy::ZeroPadded).unwrap()
    }

    #[test]
    fn test_render_layout() {
        assert_eq!(
            render(&spec()),
            "AppVersion         0010020345\n\
             AppVersionStrMajor 1.2\n\
             AppVersionStrSmall 1.2.3.45\n\
             AppVersionStr      1.2.3.45\n\
             BetaChannel        0\n\
             AlphaVersion       0\n\
             AppVersionOriginal 1.2.3.45\n"
        );
    }

    #[test]
    fn test_values_start_in_same_column() {
        let rendered = render(&spec());
        for line in rendered.lines() {
            assert_eq!(&line[18..19], " ", "{}", line);
            assert_ne!(&line[19..20], " ", "{}", line);
        }
    }

    #[test]
    fn test_version_strings_agree() {
        let rendered = render(&spec());
        let values: Vec<&str> = rendered
            .lines()
            .filter(|line| {
                line.starts_with("AppVersionStrSmall")
                    || line.starts_with("AppVersionStr ")
                    || line.starts_with("AppVersionOriginal")
            })
            .map(|line| line[19..].trim())
            .collect();
        assert_eq!(values, vec!["1.2.3.45", "1.2.3.45", "1.2.3.45"]);
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(METADATA_FILE_NAME);
        fs::write(&path, "keep me").unwrap();

        assert!(matches!(create(&path, &spec()), Err(StampError::MetadataExists(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_remove_then_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(METADATA_FILE_NAME);
        assert!(!remove_stale(&path).unwrap());

        fs::write(&path, "old").unwrap();
        assert!(remove_stale(&path).unwrap());
        create(&path, &spec()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render(&spec()));
    }
}
