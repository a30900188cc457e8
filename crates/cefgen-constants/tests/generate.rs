use anyhow::Result;
use cefgen_constants::{
    ConstantsGenerator, DEFAULT_PLATFORM_FALLBACK, FixedInterpreter, FixedPlatform, GenerateError,
    GeneratorOptions, InterpreterVersion,
};
use std::fs;

fn generator(platform: FixedPlatform, major: u32, product_version: u32) -> ConstantsGenerator {
    let options = GeneratorOptions {
        product_version,
        platform_fallback: "Unknown".to_string(),
        ..GeneratorOptions::default()
    };
    ConstantsGenerator::new(
        options,
        Box::new(platform),
        Box::new(FixedInterpreter(InterpreterVersion::new(major, 0))),
    )
}

fn declarations(text: &str) -> Vec<&str> {
    text.lines().filter(|l| l.starts_with("DECLARE ")).collect()
}

#[test]
fn linux_python3_artifact() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("compile_time_constants.pxi");

    generator(FixedPlatform::new("Linux"), 3, 3).generate(&path)?;
    let text = fs::read_to_string(&path)?;

    assert!(text.starts_with("# This file was generated by cefgen\n"));
    assert_eq!(
        declarations(&text),
        [
            "DECLARE UNAME_SYSNAME = \"Linux\"",
            "DECLARE CEF_VERSION = 3",
            "DECLARE PY_MAJOR_VERSION = 3",
        ]
    );
    Ok(())
}

#[test]
fn product_version_ignores_host() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("constants.pxi");

    for (platform, major) in [("Linux", 3), ("Darwin", 2), ("Windows", 3)] {
        let constants = generator(FixedPlatform::new(platform), major, 3).generate(&path)?;
        assert_eq!(constants.product_version, 3);
        assert!(fs::read_to_string(&path)?.contains("DECLARE CEF_VERSION = 3\n"));
    }
    Ok(())
}

#[test]
fn unreported_platform_uses_fallback() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("constants.pxi");

    let constants = generator(FixedPlatform::unreported(), 3, 3).generate(&path)?;
    assert_eq!(constants.platform_name, "Unknown");
    assert!(fs::read_to_string(&path)?.contains("DECLARE UNAME_SYSNAME = \"Unknown\"\n"));

    let constants = generator(FixedPlatform::new(""), 3, 3).generate(&path)?;
    assert_eq!(constants.platform_name, "Unknown");
    Ok(())
}

#[test]
fn second_run_fully_overwrites_first() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("constants.pxi");
    fs::write(&path, "stale content that is much longer than the generated file\n".repeat(20))?;

    generator(FixedPlatform::new("Linux"), 2, 1).generate(&path)?;
    generator(FixedPlatform::new("Linux"), 3, 3).generate(&path)?;
    let text = fs::read_to_string(&path)?;

    assert!(!text.contains("stale"));
    assert!(!text.contains("CEF_VERSION = 1"));
    assert!(!text.contains("PY_MAJOR_VERSION = 2"));
    assert_eq!(declarations(&text).len(), 3);
    assert_eq!(text.lines().count(), 4);
    Ok(())
}

#[test]
fn missing_parent_directory_is_an_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("not-created");
    let path = missing.join("constants.pxi");

    let err = generator(FixedPlatform::new("Linux"), 3, 3)
        .generate(&path)
        .unwrap_err();

    assert!(matches!(err, GenerateError::Io { .. }));
    assert!(!missing.exists());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn failed_write_leaves_no_temporary_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // A directory in the way makes the final rename fail.
    let path = dir.path().join("occupied");
    fs::create_dir(&path)?;

    let result = generator(FixedPlatform::new("Linux"), 3, 3).generate(&path);
    assert!(matches!(result, Err(GenerateError::Io { .. })));

    let leftovers: Vec<_> = fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name() != "occupied")
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
    Ok(())
}

#[test]
fn blank_configured_fallback_still_writes_a_platform() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("constants.pxi");
    let options = GeneratorOptions {
        platform_fallback: String::new(),
        ..GeneratorOptions::default()
    };
    let generator = ConstantsGenerator::new(
        options,
        Box::new(FixedPlatform::unreported()),
        Box::new(FixedInterpreter(InterpreterVersion::new(3, 0))),
    );

    let constants = generator.generate(&path)?;
    assert_eq!(constants.platform_name, DEFAULT_PLATFORM_FALLBACK);
    assert!(!fs::read_to_string(&path)?.contains("UNAME_SYSNAME = \"\""));
    Ok(())
}

#[test]
fn platform_name_cannot_add_declarations() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("constants.pxi");

    generator(FixedPlatform::new("Linux\nDECLARE CEF_VERSION = 9"), 3, 3).generate(&path)?;
    let text = fs::read_to_string(&path)?;

    assert_eq!(
        declarations(&text),
        [
            "DECLARE UNAME_SYSNAME = \"Linux\\nDECLARE CEF_VERSION = 9\"",
            "DECLARE CEF_VERSION = 3",
            "DECLARE PY_MAJOR_VERSION = 3",
        ]
    );
    Ok(())
}
