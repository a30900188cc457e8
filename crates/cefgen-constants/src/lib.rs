//! Compile-time constants for the CEF Python extension build.
//!
//! The Cython sources are compiled ahead of time and cannot detect the host
//! themselves, so the build writes a small include file first:
//!
//! ```text
//! # This file was generated by cefgen
//! DECLARE UNAME_SYSNAME = "Linux"
//! DECLARE CEF_VERSION = 3
//! DECLARE PY_MAJOR_VERSION = 3
//! ```
//!
//! [`ConstantsGenerator`] inspects the host through a [`PlatformResolver`] and
//! an [`InterpreterProbe`], and [`write_constants`] replaces the destination
//! in a single atomic write.

mod constants;
mod error;
mod generator;
mod interpreter;
mod platform;

pub use constants::{
    BuildConstants, CEF_VERSION, ConstantValue, DEFAULT_PRODUCT_VERSION, GeneratorOptions,
    PY_MAJOR_VERSION, UNAME_SYSNAME, write_constants,
};
pub use error::{GenerateError, Result};
pub use generator::ConstantsGenerator;
pub use interpreter::{FixedInterpreter, InterpreterProbe, InterpreterVersion, PythonInterpreter};
pub use platform::{
    DEFAULT_PLATFORM_FALLBACK, FixedPlatform, HostPlatform, PlatformResolver,
    resolve_platform_name,
};
