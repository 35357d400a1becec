//! Interactive collection of the version components.

use crate::config::BuildNumberConfig;
use crate::version::{
    numeric, BuildNumberScheme, BuildNumberStrategy, VersionComponents, VersionSpec,
};
use anyhow::{Result, anyhow};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Source of answers to the version questions.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Reads answers from the terminal.
pub struct TerminalPrompt {
    editor: DefaultEditor,
}

impl TerminalPrompt {
    pub fn new() -> Result<Self> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        match self.editor.readline(question) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(anyhow!("Interrupted, nothing was changed")),
            Err(ReadlineError::Eof) => Err(anyhow!("Input closed, nothing was changed")),
            Err(err) => Err(err.into()),
        }
    }
}

/// Asks for major, minor, patch and the materialgram version, plus a build
/// number suffix when the prefixed scheme is configured, and builds the
/// resulting [`VersionSpec`].
pub fn read_version(
    prompt: &mut dyn Prompt,
    build_number: &BuildNumberConfig,
) -> Result<VersionSpec> {
    let major = prompt.ask("Enter your major version: ")?;
    let minor = prompt.ask("Minor: ")?;
    let patch = prompt.ask("Patch: ")?;
    let material = prompt.ask("materialgram version: ")?;
    let components = VersionComponents::new(&major, &minor, &patch, &material)?;

    let strategy = match build_number.scheme {
        BuildNumberScheme::ZeroPadded => BuildNumberStrategy::ZeroPadded,
        BuildNumberScheme::Arithmetic => BuildNumberStrategy::Arithmetic,
        BuildNumberScheme::Prefixed => {
            let suffix = numeric("Build number", &prompt.ask("Build number: ")?)?;
            BuildNumberStrategy::Prefixed { prefix: build_number.prefix.clone(), suffix }
        }
    };

    Ok(VersionSpec::new(components, &strategy)?)
}
