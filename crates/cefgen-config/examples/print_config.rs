/// Example program to print the loaded configuration
///
/// Run with: cargo run -p cefgen-config --example print_config

fn main() {
    let config = match cefgen_config::CefgenConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("=== cefgen Configuration ===\n");

    println!("Generator Settings:");
    println!("  Output: {}", config.generator.output.display());
    println!("  Product Version: {}", config.generator.product_version);
    println!("  Name: {}", config.generator.name);
    println!("  Directive: {}", config.generator.directive);
    println!("  Platform Fallback: {:?}", config.generator.platform_fallback);
    println!();

    println!("Python Settings:");
    println!("  Executable: {}", config.python.executable.display());
    println!("  Major Version: {:?}", config.python.major_version);
    println!("  Minor Version: {:?}", config.python.minor_version);
    println!();

    println!("Platform Settings:");
    println!("  Name: {:?}", config.platform.name);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
