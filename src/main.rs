//! `rune-motion`: print the `@keyframes` stylesheet the registry generates.
//!
//! ```text
//! rune-motion [--config=<rune.toml>] [--json=<keyframes.json>]... [preset]...
//! ```
//!
//! Each `--json` file is registered under its file stem. With neither presets
//! nor JSON files, every preset in the catalog is printed.

use anyhow::{Context, Result, bail};
use rune_config::MotionConfig;
use rune_motion_core::{EffectCatalog, HeadlessDocument, KeyframeDescription, KeyframeRegistry};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    json_files: Vec<PathBuf>,
    presets: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            args.config = Some(PathBuf::from(path));
        } else if let Some(path) = arg.strip_prefix("--json=") {
            args.json_files.push(PathBuf::from(path));
        } else if arg.starts_with("--") {
            bail!("unknown option '{arg}'");
        } else {
            args.presets.push(arg);
        }
    }
    Ok(args)
}

fn load_config(path: Option<&Path>) -> Result<MotionConfig> {
    let mut config = match path {
        Some(path) => MotionConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MotionConfig::load_or_default(),
    };
    config.merge_with_env();
    Ok(config)
}

fn define_json(registry: &KeyframeRegistry, path: &Path) -> Result<()> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("no usable file name in {}", path.display()))?;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading keyframes {}", path.display()))?;
    let keyframes = KeyframeDescription::from_json_str(&json)
        .with_context(|| format!("parsing keyframes {}", path.display()))?;

    log::info!("defining '{}' from {}", name, path.display());
    registry.define(name, &keyframes);
    Ok(())
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;
    let document = Rc::new(HeadlessDocument::new());
    let registry = KeyframeRegistry::from_config(document.clone(), &config);

    for path in &args.json_files {
        define_json(&registry, path)?;
    }

    let presets: Vec<String> = if args.presets.is_empty() && args.json_files.is_empty() {
        EffectCatalog::names().map(str::to_string).collect()
    } else {
        args.presets.clone()
    };
    for name in &presets {
        match EffectCatalog::get(name) {
            Some(keyframes) => registry.define(name, &keyframes),
            None => bail!(
                "unknown preset '{name}' (available: {})",
                EffectCatalog::names().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    log::info!("generated {} keyframe rules", registry.len());
    for name in registry.names() {
        if let Some(identifier) = registry.resolve(&name) {
            println!("/* {name} -> {identifier} */");
        }
    }
    println!("{}", document.stylesheet_text());
    Ok(())
}
