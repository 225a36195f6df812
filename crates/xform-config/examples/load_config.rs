//! Basic usage example for xform-config

use std::error::Error;
use std::fs;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use xform_config::{ConfigResolver, ConfigureOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Lay out a small project: one inline entry, one indirected entry.
    let project = tempfile::tempdir()?;
    let root = project.path();
    fs::create_dir_all(root.join("config"))?;
    fs::create_dir_all(root.join("src"))?;
    fs::write(
        root.join("package.json"),
        r#"{
  "name": "demo-app",
  "inlinify": {"extensions": [".txt", ".md"]},
  "unbundle": "./config/unbundle.json"
}"#,
    )?;
    fs::write(root.join("config/unbundle.json"), r#"{"mode": "strict"}"#)?;
    let entry = root.join("src/index.js");
    fs::write(&entry, "// entry\n")?;

    // Inline configuration comes straight from the manifest.
    let inlinify = ConfigResolver::new("inlinify");
    let data = inlinify.load(&entry)?;
    println!("inlinify config: {:?}", data.config);
    println!("inlinify config dir: {:?}", data.config_dir);

    // Indirected configuration is loaded from the named file, and the
    // config dir moves with it.
    let unbundle = ConfigResolver::new("unbundle");
    let data = unbundle.load(&entry)?;
    println!("\nunbundle config: {:?}", data.config);
    println!("unbundle config dir: {:?}", data.config_dir);
    println!("unbundle config file: {:?}", data.config_file);

    // Supplied configuration bypasses the filesystem.
    let manual = unbundle.configure(
        serde_json::json!({"mode": "loose"}),
        ConfigureOptions::default(),
    );
    let data = manual.load("does/not/exist.js")?;
    println!("\nsupplied config: {:?}", data.config);

    Ok(())
}
