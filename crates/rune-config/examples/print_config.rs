/// Example program to print the loaded motion configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    let config = rune_config::MotionConfig::load();

    println!("=== Rune Motion Configuration ===\n");

    println!("Registry Settings:");
    println!("  Id Prefix: {}", config.registry.id_prefix);
    println!();

    println!("Vendor Settings:");
    println!("  Force Prefix: {:?}", config.vendor.force_prefix);
    println!();

    println!("Animation Defaults:");
    println!("  Duration: {}ms", config.defaults.duration_ms);
    println!("  Easing: {}", config.defaults.easing);
    println!("  Delay: {}ms", config.defaults.delay_ms);
    println!("  Auto Play: {}", config.defaults.auto_play);
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
