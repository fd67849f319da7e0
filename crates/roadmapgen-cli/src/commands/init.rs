//! The `roadmapgen init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("roadmapgen.toml").exists() {
        println!("roadmapgen.toml already exists, skipping.");
    } else {
        std::fs::write("roadmapgen.toml", SAMPLE_CONFIG)?;
        println!("Created roadmapgen.toml");
    }

    println!("\nNext steps:");
    println!("  1. Put exported submission histories (.txt) in each track's input_dir");
    println!("  2. Run: roadmapgen validate");
    println!("  3. Run: roadmapgen generate");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# roadmapgen configuration

output_dir = "."
url_base = "https://leetcode.com/problems/"
days_per_month = 30
problems_per_day = 3
parallelism = 4

[[tracks]]
name = "advanced"
input_dir = "."
output = "roadmap_data.json"
convention = "calendar"
month_order = ["April", "May", "June", "July", "August"]

[[tracks]]
name = "intermediate"
input_dir = "intermediate_roadmap_pdfs"
output = "intermediate_roadmap_data.json"
convention = "numbered"
month_order = ["Month 1", "Month 2", "Month 3"]
display_labels = ["Month 1", "Month 2", "Month 3"]
"#;
