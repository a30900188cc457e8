//! The constants artifact and its on-disk form.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{GenerateError, Result};
use crate::platform::DEFAULT_PLATFORM_FALLBACK;

pub const UNAME_SYSNAME: &str = "UNAME_SYSNAME";
pub const CEF_VERSION: &str = "CEF_VERSION";
pub const PY_MAJOR_VERSION: &str = "PY_MAJOR_VERSION";

/// CEF API generation targeted by this build.
pub const DEFAULT_PRODUCT_VERSION: u32 = 3;

/// A literal value in the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantValue {
    Str(String),
    Int(u32),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(value) => write!(f, "{}", value),
            ConstantValue::Str(value) => {
                f.write_str("\"")?;
                for ch in value.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

/// How the artifact is rendered, and the fixed product version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub product_version: u32,
    /// Named in the header comment.
    pub generator_name: String,
    /// Declaration keyword; `DEF` yields a Cython `.pxi` include.
    pub directive: String,
    pub platform_fallback: String,
}

impl GeneratorOptions {
    /// Reject header names and directives that would break the
    /// one-statement-per-line layout.
    pub fn validate(&self) -> Result<()> {
        if self.generator_name.chars().any(char::is_control) {
            return Err(GenerateError::InvalidOption {
                field: "generator_name",
                value: self.generator_name.clone(),
            });
        }
        let directive_ok = !self.directive.is_empty()
            && self
                .directive
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !directive_ok {
            return Err(GenerateError::InvalidOption {
                field: "directive",
                value: self.directive.clone(),
            });
        }
        Ok(())
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            product_version: DEFAULT_PRODUCT_VERSION,
            generator_name: "cefgen".to_string(),
            directive: "DECLARE".to_string(),
            platform_fallback: DEFAULT_PLATFORM_FALLBACK.to_string(),
        }
    }
}

/// Platform and version facts baked into the downstream compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConstants {
    pub platform_name: String,
    pub product_version: u32,
    pub host_language_major_version: u32,
}

impl BuildConstants {
    /// Keys and values in artifact order.
    pub fn entries(&self) -> [(&'static str, ConstantValue); 3] {
        [
            (UNAME_SYSNAME, ConstantValue::Str(self.platform_name.clone())),
            (CEF_VERSION, ConstantValue::Int(self.product_version)),
            (
                PY_MAJOR_VERSION,
                ConstantValue::Int(self.host_language_major_version),
            ),
        ]
    }

    pub fn get(&self, key: &str) -> Option<ConstantValue> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// Full file contents: header comment, then one declaration per entry.
    pub fn render(&self, options: &GeneratorOptions) -> String {
        let mut out = format!("# This file was generated by {}\n", options.generator_name);
        for (key, value) in self.entries() {
            out.push_str(&format!("{} {} = {}\n", options.directive, key, value));
        }
        out
    }
}

/// Write the rendered artifact to `destination`, replacing anything there.
///
/// Contents go to a temporary file next to the destination which is then
/// renamed over it, so readers never observe a partial file. The parent
/// directory must already exist.
pub fn write_constants(
    constants: &BuildConstants,
    options: &GeneratorOptions,
    destination: &Path,
) -> Result<()> {
    options.validate()?;
    let contents = constants.render(options);
    let parent = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file =
        NamedTempFile::new_in(parent).map_err(|e| GenerateError::io(destination, e))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| GenerateError::io(destination, e))?;

    // A replaced file keeps its mode; new files get the usual 0644 rather
    // than the temp file's 0600.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = match std::fs::metadata(destination) {
            Ok(meta) if meta.is_file() => meta.permissions(),
            _ => std::fs::Permissions::from_mode(0o644),
        };
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| GenerateError::io(destination, e))?;
    }

    file.persist(destination)
        .map_err(|e| GenerateError::io(destination, e.error))?;
    log::info!("wrote {} ({} bytes)", destination.display(), contents.len());
    Ok(())
}
