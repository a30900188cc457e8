use anyhow::{Context, Result};
use cefgen_config::CefgenConfig;
use cefgen_constants::{
    ConstantsGenerator, DEFAULT_PLATFORM_FALLBACK, FixedInterpreter, FixedPlatform,
    GeneratorOptions, HostPlatform, InterpreterProbe, InterpreterVersion, PlatformResolver,
    PythonInterpreter,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generates the compile-time constants include for the CEF Python extension.
#[derive(Parser, Debug)]
#[command(name = "cefgen", version, about)]
struct Cli {
    /// Configuration file (defaults to ./cefgen.toml when present)
    #[arg(long, global = true, env = "CEFGEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the constants file
    Generate {
        /// Destination file; its directory must already exist
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// CEF API generation to target
        #[arg(long)]
        cef_version: Option<u32>,
        /// Python executable to query for its version
        #[arg(long)]
        python: Option<PathBuf>,
    },
    /// Print the constants without writing them
    Show,
    /// Print the extension module name for the target interpreter
    ModuleName {
        #[arg(long, default_value = "cefpython")]
        prefix: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<CefgenConfig> {
    let mut config = match path {
        Some(path) => CefgenConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CefgenConfig::load_or_default().context("loading cefgen.toml")?,
    };
    config.merge_with_env();
    Ok(config)
}

fn interpreter(config: &CefgenConfig) -> Box<dyn InterpreterProbe> {
    match config.python.major_version {
        Some(major) => Box::new(FixedInterpreter(InterpreterVersion::new(
            major,
            config.python.minor_version.unwrap_or(0),
        ))),
        None => Box::new(PythonInterpreter::new(&config.python.executable)),
    }
}

fn generator(config: &CefgenConfig) -> ConstantsGenerator {
    let options = GeneratorOptions {
        product_version: config.generator.product_version,
        generator_name: config.generator.name.clone(),
        directive: config.generator.directive.clone(),
        platform_fallback: config
            .generator
            .platform_fallback
            .clone()
            .unwrap_or_else(|| DEFAULT_PLATFORM_FALLBACK.to_string()),
    };
    let platform: Box<dyn PlatformResolver> = match &config.platform.name {
        Some(name) => Box::new(FixedPlatform::new(name.clone())),
        None => Box::new(HostPlatform),
    };
    ConstantsGenerator::new(options, platform, interpreter(config))
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    log::debug!("configuration: {:?}", config);

    match cli.command {
        Command::Generate {
            output,
            cef_version,
            python,
        } => {
            if let Some(output) = output {
                config.generator.output = output;
            }
            if let Some(version) = cef_version {
                config.generator.product_version = version;
            }
            if let Some(python) = python {
                config.python.executable = python;
                config.python.major_version = None;
            }

            let destination = &config.generator.output;
            println!("Generating: {}", destination.display());
            generator(&config)
                .generate(destination)
                .with_context(|| format!("generating {}", destination.display()))?;
        }
        Command::Show => {
            let generator = generator(&config);
            let constants = generator.collect()?;
            print!("{}", constants.render(generator.options()));
        }
        Command::ModuleName { prefix } => {
            let version = interpreter(&config).version()?;
            println!("{}", version.extension_module_name(&prefix));
        }
    }

    Ok(())
}
