//! Environment inspection and artifact generation.

use std::path::Path;

use crate::constants::{BuildConstants, GeneratorOptions, write_constants};
use crate::error::Result;
use crate::interpreter::InterpreterProbe;
use crate::platform::{PlatformResolver, resolve_platform_name};

/// Builds [`BuildConstants`] from the live environment and writes them out.
///
/// Every call inspects the environment afresh; nothing is cached.
pub struct ConstantsGenerator {
    options: GeneratorOptions,
    platform: Box<dyn PlatformResolver>,
    interpreter: Box<dyn InterpreterProbe>,
}

impl ConstantsGenerator {
    pub fn new(
        options: GeneratorOptions,
        platform: Box<dyn PlatformResolver>,
        interpreter: Box<dyn InterpreterProbe>,
    ) -> Self {
        Self {
            options,
            platform,
            interpreter,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Inspect the environment without writing anything.
    pub fn collect(&self) -> Result<BuildConstants> {
        self.options.validate()?;
        let platform_name =
            resolve_platform_name(self.platform.as_ref(), &self.options.platform_fallback);
        let version = self.interpreter.version()?;
        log::debug!("platform {:?}, interpreter {}", platform_name, version);

        Ok(BuildConstants {
            platform_name,
            product_version: self.options.product_version,
            host_language_major_version: version.major,
        })
    }

    /// Collect the constants and write them to `destination`, fully
    /// replacing any previous contents.
    pub fn generate(&self, destination: &Path) -> Result<BuildConstants> {
        let constants = self.collect()?;
        write_constants(&constants, &self.options, destination)?;
        Ok(constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use crate::interpreter::{FixedInterpreter, InterpreterVersion};
    use crate::platform::FixedPlatform;

    struct BrokenInterpreter;

    impl InterpreterProbe for BrokenInterpreter {
        fn version(&self) -> Result<InterpreterVersion> {
            Err(GenerateError::InterpreterOutput("garbage".to_string()))
        }
    }

    #[test]
    fn collect_uses_configured_product_version() {
        let options = GeneratorOptions {
            product_version: 1,
            ..GeneratorOptions::default()
        };
        let generator = ConstantsGenerator::new(
            options,
            Box::new(FixedPlatform::new("Windows")),
            Box::new(FixedInterpreter(InterpreterVersion::new(2, 7))),
        );
        let constants = generator.collect().unwrap();
        assert_eq!(constants.platform_name, "Windows");
        assert_eq!(constants.product_version, 1);
        assert_eq!(constants.host_language_major_version, 2);
    }

    #[test]
    fn interpreter_errors_propagate() {
        let generator = ConstantsGenerator::new(
            GeneratorOptions::default(),
            Box::new(FixedPlatform::new("Linux")),
            Box::new(BrokenInterpreter),
        );
        assert!(matches!(
            generator.collect(),
            Err(GenerateError::InterpreterOutput(_))
        ));
    }
}
