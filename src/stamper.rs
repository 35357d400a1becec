//! Applies one [`VersionSpec`] to every artifact.

use crate::config::{BuildNumberConfig, StampPaths};
use crate::error::Result;
use crate::metadata;
use crate::patch::{self, PatchTarget, TargetFile};
use crate::prompt::{self, Prompt};
use crate::version::VersionSpec;
use log::{info, warn};
use std::path::PathBuf;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampReport {
    pub metadata: PathBuf,
    /// Each applied patch with the number of lines it replaced.
    pub patches: Vec<(PatchTarget, usize)>,
}

impl StampReport {
    /// Patches whose tag was not found in their file.
    pub fn unmatched(&self) -> impl Iterator<Item = &PatchTarget> {
        self.patches.iter().filter(|(_, replaced)| *replaced == 0).map(|(target, _)| target)
    }
}

pub struct Stamper {
    paths: StampPaths,
}

impl Stamper {
    pub fn new(paths: StampPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &StampPaths {
        &self.paths
    }

    /// Removes the metadata file of a previous run so that [`Stamper::stamp`]
    /// can create it again.
    pub fn prepare(&self) -> Result<()> {
        metadata::remove_stale(&self.paths.metadata)?;
        Ok(())
    }

    /// The patch list for `version`, in application order.
    pub fn targets(&self, version: &VersionSpec) -> Vec<PatchTarget> {
        patch::patch_targets(version, |file| match file {
            TargetFile::Header => self.paths.header.clone(),
            TargetFile::PrimaryRc => self.paths.primary_rc.clone(),
            TargetFile::UpdaterRc => self.paths.updater_rc.clone(),
        })
    }

    /// Writes the metadata file, then patches the header and both resource
    /// files. Stops at the first error without undoing earlier writes.
    pub fn stamp(&self, version: &VersionSpec) -> Result<StampReport> {
        info!("Stamping version {} (build {})", version, version.build_number());
        metadata::create(&self.paths.metadata, version)?;

        let targets = self.targets(version);
        let counts = patch::apply_all(&targets)?;
        let report = StampReport {
            metadata: self.paths.metadata.clone(),
            patches: targets.into_iter().zip(counts).collect(),
        };

        for target in report.unmatched() {
            warn!("No line tagged {:?} found in {}", target.prefix, target.path.display());
        }
        info!("Patched {} target(s)", report.patches.len());
        Ok(report)
    }

    /// Asks for the version, prints it for confirmation, then replaces the
    /// metadata file and patches every target. Nothing on disk changes until
    /// all answers are accepted.
    pub fn run(
        &self,
        input: &mut dyn Prompt,
        build_number: &BuildNumberConfig,
    ) -> anyhow::Result<StampReport> {
        let version = prompt::read_version(input, build_number)?;
        println!("{}", version);
        println!("Build number: {}", version.build_number());

        self.prepare()?;
        Ok(self.stamp(&version)?)
    }
}
