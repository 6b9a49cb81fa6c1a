//! The `classlink init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("classlink.toml").exists() {
        println!("classlink.toml already exists, skipping.");
    } else {
        std::fs::write("classlink.toml", SAMPLE_CONFIG)?;
        println!("Created classlink.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit classlink.toml to set your class name");
    println!("  2. Run: classlink session");
    println!("  3. Or try the sample class: classlink report grades --demo");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# classlink configuration

# Heading shown on the dashboard. ${VAR} references are expanded.
class_name = "Class Management Dashboard"

# Start every session with the sample class loaded.
seed_demo = false

# Report output when --format is not given: text, table, markdown or json.
default_format = "text"

# Where dashboard files (svg, html) are written.
output_dir = "./classlink-out"
"#;
