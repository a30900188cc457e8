//! cefgen configuration
//!
//! Settings are read from `cefgen.toml`, with environment variables taking
//! precedence so CI jobs can retarget a build without editing the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "cefgen.toml";

/// Errors from loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CefgenConfig {
    /// Artifact output settings
    pub generator: GeneratorConfig,
    /// Interpreter the extension is built for
    pub python: PythonConfig,
    /// Host platform overrides
    pub platform: PlatformConfig,
}

/// Artifact output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Destination of the constants include
    pub output: PathBuf,
    /// CEF API generation written as `CEF_VERSION`
    pub product_version: u32,
    /// Build step named in the header comment
    pub name: String,
    /// Declaration keyword (`DECLARE`, or `DEF` for Cython)
    pub directive: String,
    /// Written as `UNAME_SYSNAME` when the host reports no platform
    pub platform_fallback: Option<String>,
}

/// Interpreter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PythonConfig {
    /// Executable queried for its version
    pub executable: PathBuf,
    /// Skip querying the executable and use this major version
    pub major_version: Option<u32>,
    /// Minor version paired with `major_version` (default 0)
    pub minor_version: Option<u32>,
}

/// Platform configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PlatformConfig {
    /// Use this name instead of asking the host
    pub name: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("cython_includes/compile_time_constants.pxi"),
            product_version: 3,
            name: "cefgen".to_string(),
            directive: "DECLARE".to_string(),
            platform_fallback: None,
        }
    }
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("python"),
            major_version: None,
            minor_version: None,
        }
    }
}

impl CefgenConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `cefgen.toml` from the current directory, or defaults if there
    /// is no such file
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_or_default_from(CONFIG_FILE)
    }

    /// Load `path`, falling back to defaults only when the file does not
    /// exist. Unreadable or malformed files are errors.
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Merge configuration with process environment variables
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    /// Merge configuration with variables from `lookup`
    ///
    /// Present variables override file values; numbers that fail to parse
    /// are ignored.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Generator settings
        if let Some(output) = lookup("CEFGEN_OUTPUT") {
            self.generator.output = PathBuf::from(output);
        }
        if let Some(val) = lookup("CEFGEN_CEF_VERSION") {
            if let Ok(version) = val.trim().parse::<u32>() {
                self.generator.product_version = version;
            }
        }
        if let Some(name) = lookup("CEFGEN_GENERATOR_NAME") {
            self.generator.name = name;
        }
        if let Some(directive) = lookup("CEFGEN_DIRECTIVE") {
            self.generator.directive = directive;
        }
        if let Some(fallback) = lookup("CEFGEN_PLATFORM_FALLBACK") {
            self.generator.platform_fallback = Some(fallback);
        }

        // Interpreter settings
        if let Some(python) = lookup("CEFGEN_PYTHON") {
            self.python.executable = PathBuf::from(python);
        }
        if let Some(val) = lookup("CEFGEN_PY_MAJOR_VERSION") {
            if let Ok(major) = val.trim().parse::<u32>() {
                self.python.major_version = Some(major);
            }
        }
        if let Some(val) = lookup("CEFGEN_PY_MINOR_VERSION") {
            if let Ok(minor) = val.trim().parse::<u32>() {
                self.python.minor_version = Some(minor);
            }
        }

        // Platform settings
        if let Some(name) = lookup("CEFGEN_PLATFORM") {
            self.platform.name = Some(name);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from cefgen.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_or_default()?;
        config.merge_with_env();
        Ok(config)
    }
}
