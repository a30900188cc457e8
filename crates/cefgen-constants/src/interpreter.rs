//! Version of the interpreter the extension is being built for.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{GenerateError, Result};

/// Prints `major.minor` on both Python 2 and Python 3.
const VERSION_SCRIPT: &str = "import sys; print('%d.%d' % sys.version_info[:2])";

/// Major and minor version of a Python interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
}

impl InterpreterVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse `"3.11"`. Surrounding whitespace and a trailing patch component
    /// (`"2.7.18"`) are accepted.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || GenerateError::InterpreterOutput(text.to_string());
        let mut parts = text.trim().split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        Ok(Self { major, minor })
    }

    /// Major followed by minor, e.g. `"27"` or `"311"`.
    pub fn tag(&self) -> String {
        format!("{}{}", self.major, self.minor)
    }

    /// Name of the compiled extension module for this interpreter,
    /// e.g. `cefpython_py27`.
    pub fn extension_module_name(&self, prefix: &str) -> String {
        format!("{}_py{}", prefix, self.tag())
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Source of the interpreter version.
pub trait InterpreterProbe {
    fn version(&self) -> Result<InterpreterVersion>;
}

/// Asks a Python executable for its version.
#[derive(Debug, Clone)]
pub struct PythonInterpreter {
    pub program: PathBuf,
}

impl PythonInterpreter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PythonInterpreter {
    fn default() -> Self {
        Self::new("python")
    }
}

impl InterpreterProbe for PythonInterpreter {
    fn version(&self) -> Result<InterpreterVersion> {
        let output = Command::new(&self.program)
            .arg("-c")
            .arg(VERSION_SCRIPT)
            .output()
            .map_err(|source| GenerateError::InterpreterLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GenerateError::InterpreterFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let version = InterpreterVersion::parse(&String::from_utf8_lossy(&output.stdout))?;
        log::debug!("{} reports Python {}", self.program.display(), version);
        Ok(version)
    }
}

/// A preconfigured version; the interpreter is never launched.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterpreter(pub InterpreterVersion);

impl InterpreterProbe for FixedInterpreter {
    fn version(&self) -> Result<InterpreterVersion> {
        Ok(self.0)
    }
}
