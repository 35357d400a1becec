//! Tagged-line patching of text files.
//!
//! A target file is patched by replacing every line that contains a literal
//! tag with `tag + replacement`. Matching is plain substring containment, not
//! anchored at the start of the line.

use crate::error::{Result, StampError};
use crate::version::VersionSpec;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// One literal substitution: in `path`, every line containing `prefix`
/// becomes `prefix + replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    pub path: PathBuf,
    pub prefix: String,
    pub replacement: String,
}

/// Result of patching a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub content: String,
    pub replaced: usize,
}

/// Replaces every line of `content` containing `prefix`.
///
/// Untouched lines are copied byte for byte. A replaced line keeps a `\r\n`
/// terminator if it had one and gets `\n` otherwise, also when it was the
/// unterminated last line.
pub fn patch_lines(content: &str, prefix: &str, replacement: &str) -> Patched {
    let mut out = String::with_capacity(content.len() + replacement.len());
    let mut replaced = 0;

    for line in content.split_inclusive('\n') {
        if line.contains(prefix) {
            out.push_str(prefix);
            out.push_str(replacement);
            out.push_str(if line.ends_with("\r\n") { "\r\n" } else { "\n" });
            replaced += 1;
        } else {
            out.push_str(line);
        }
    }

    Patched { content: out, replaced }
}

/// Reads the whole target, patches it and writes it back in place.
/// Returns how many lines were replaced.
pub fn patch_file(target: &PatchTarget) -> Result<usize> {
    let content = fs::read_to_string(&target.path)
        .map_err(|source| StampError::ReadTarget { path: target.path.clone(), source })?;

    let patched = patch_lines(&content, &target.prefix, &target.replacement);
    fs::write(&target.path, patched.content)
        .map_err(|source| StampError::WriteTarget { path: target.path.clone(), source })?;

    debug!(
        "Patched {} line(s) tagged {:?} in {}",
        patched.replaced,
        target.prefix,
        target.path.display()
    );
    Ok(patched.replaced)
}

/// Files that receive version lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFile {
    Header,
    PrimaryRc,
    UpdaterRc,
}

/// What a target line is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    /// `1.2.3.4";`
    HeaderString,
    /// `<build number>;`
    HeaderNumber,
    /// `1,2,3,4`
    ResourceNumber,
    /// `1.2.3.4"`
    ResourceString,
}

impl Field {
    fn render(self, version: &VersionSpec) -> String {
        match self {
            Field::HeaderString => format!("{}\";", version.dotted()),
            Field::HeaderNumber => format!("{};", version.build_number()),
            Field::ResourceNumber => version.comma_separated(),
            Field::ResourceString => format!("{}\"", version.dotted()),
        }
    }
}

const FILE_VERSION_VALUE: &str = "            VALUE \"FileVersion\", \"";
const PRODUCT_VERSION_VALUE: &str = "            VALUE \"ProductVersion\", \"";

/// Every patch applied in a run, in the order it is applied.
const TARGETS: &[(TargetFile, &str, Field)] = &[
    (TargetFile::Header, "constexpr auto AppVersionStr = \"", Field::HeaderString),
    (TargetFile::Header, "constexpr auto AppVersion = ", Field::HeaderNumber),
    (TargetFile::PrimaryRc, " FILEVERSION ", Field::ResourceNumber),
    (TargetFile::PrimaryRc, " PRODUCTVERSION ", Field::ResourceNumber),
    (TargetFile::UpdaterRc, " FILEVERSION ", Field::ResourceNumber),
    (TargetFile::UpdaterRc, " PRODUCTVERSION ", Field::ResourceNumber),
    (TargetFile::PrimaryRc, FILE_VERSION_VALUE, Field::ResourceString),
    (TargetFile::UpdaterRc, FILE_VERSION_VALUE, Field::ResourceString),
    (TargetFile::PrimaryRc, PRODUCT_VERSION_VALUE, Field::ResourceString),
    (TargetFile::UpdaterRc, PRODUCT_VERSION_VALUE, Field::ResourceString),
];

/// Builds the concrete patch list for `version`, resolving each target file
/// through `locate`.
pub fn patch_targets<F>(version: &VersionSpec, locate: F) -> Vec<PatchTarget>
where
    F: Fn(TargetFile) -> PathBuf,
{
    TARGETS
        .iter()
        .map(|&(file, prefix, field)| PatchTarget {
            path: locate(file),
            prefix: prefix.to_string(),
            replacement: field.render(version),
        })
        .collect()
}

/// Applies `targets` one after another and stops at the first failure.
/// Already patched files are left as they are.
pub fn apply_all(targets: &[PatchTarget]) -> Result<Vec<usize>> {
    targets.iter().map(patch_file).collect()
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
    fn test_no_match_leaves_content_untouched() {
        let content = "alpha\nbeta\r\ngamma";
        let patched = patch_lines(content, "delta", "x");
        assert_eq!(patched.replaced, 0);
        assert_eq!(patched.content, content);
    }

    #[test]
    fn test_single_match_replaces_only_that_line() {
        let content = "#pragma once\nconstexpr auto AppVersion = 1;\nconstexpr auto Other = 2;\n";
        let patched = patch_lines(content, "constexpr auto AppVersion = ", "0010020345;");
        assert_eq!(patched.replaced, 1);
        assert_eq!(
            patched.content,
            "#pragma once\nconstexpr auto AppVersion = 0010020345;\nconstexpr auto Other = 2;\n"
        );
        assert_eq!(patched.content.lines().count(), content.lines().count());
    }

    #[test]
    fn test_match_is_substring_not_anchored() {
        let content = "xx FILEVERSION 9,9,9,9 // old\n";
        let patched = patch_lines(content, " FILEVERSION ", "1,2,3,45");
        assert_eq!(patched.content, " FILEVERSION 1,2,3,45\n");
    }

    #[test]
    fn test_every_matching_line_is_replaced() {
        let content = "a TAG 1\nb\nc TAG 2\n";
        let patched = patch_lines(content, "TAG ", "v");
        assert_eq!(patched.replaced, 2);
        assert_eq!(patched.content, "TAG v\nb\nTAG v\n");
    }

    #[test]
    fn test_crlf_terminator_is_kept() {
        let content = "BEGIN\r\n PRODUCTVERSION 0,0,0,0\r\nEND\r\n";
        let patched = patch_lines(content, " PRODUCTVERSION ", "1,2,3,45");
        assert_eq!(patched.content, "BEGIN\r\n PRODUCTVERSION 1,2,3,45\r\nEND\r\n");
    }

    #[test]
    fn test_unterminated_last_line_gains_newline() {
        let patched = patch_lines("first\nTAG old", "TAG ", "new");
        assert_eq!(patched.content, "first\nTAG new\n");
    }

    #[test]
    fn test_patching_twice_is_idempotent() {
        let content = " FILEVERSION 0,0,0,0\n other\n";
        let once = patch_lines(content, " FILEVERSION ", "1,2,3,45");
        let twice = patch_lines(&once.content, " FILEVERSION ", "1,2,3,45");
        assert_eq!(once.content, twice.content);
    }

    #[test]
    fn test_targets_follow_fixed_order() {
        let targets = patch_targets(&spec(), |file| PathBuf::from(format!("{:?}", file)));
        assert_eq!(targets.len(), 10);

        let summary: Vec<(String, String)> = targets
            .iter()
            .map(|t| (t.path.display().to_string(), t.replacement.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Header".to_string(), "1.2.3.45\";".to_string()),
                ("Header".to_string(), "0010020345;".to_string()),
                ("PrimaryRc".to_string(), "1,2,3,45".to_string()),
                ("PrimaryRc".to_string(), "1,2,3,45".to_string()),
                ("UpdaterRc".to_string(), "1,2,3,45".to_string()),
                ("UpdaterRc".to_string(), "1,2,3,45".to_string()),
                ("PrimaryRc".to_string(), "1.2.3.45\"".to_string()),
                ("UpdaterRc".to_string(), "1.2.3.45\"".to_string()),
                ("PrimaryRc".to_string(), "1.2.3.45\"".to_string()),
                ("UpdaterRc".to_string(), "1.2.3.45\"".to_string()),
            ]
        );
        assert_eq!(targets[6].prefix, "            VALUE \"FileVersion\", \"");
        assert_eq!(targets[8].prefix, "            VALUE \"ProductVersion\", \"");
    }

    #[test]
    fn test_patch_file_missing_target() {
        let dir = tempdir().unwrap();
        let target = PatchTarget {
            path: dir.path().join("missing.rc"),
            prefix: " FILEVERSION ".to_string(),
            replacement: "1,2,3,45".to_string(),
        };
        assert!(matches!(patch_file(&target), Err(StampError::ReadTarget { .. })));
        assert!(!target.path.exists());
    }

    #[test]
    fn test_patch_file_rewrites_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("version.h");
        fs::write(&path, "constexpr auto AppVersionStr = \"0.0.0.0\";\n").unwrap();

        let target = PatchTarget {
            path: path.clone(),
            prefix: "constexpr auto AppVersionStr = \"".to_string(),
            replacement: "1.2.3.45\";".to_string(),
        };
        assert_eq!(patch_file(&target).unwrap(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "constexpr auto AppVersionStr = \"1.2.3.45\";\n"
        );
    }
}
