//! The `roadmapgen validate` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use roadmapgen_core::config::load_config_from;
use roadmapgen_core::extract::{discover_documents, ExtractorSet};
use roadmapgen_core::parser::LineParser;

pub fn execute(track: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let tracks = super::select_tracks(&config, track.as_deref())?;
    let extractors = ExtractorSet::builtin();
    let parser = LineParser::new();

    let mut total_warnings = 0;

    for track in &tracks {
        let mapper = track.month_mapper()?;
        println!(
            "Track: {} ({} months, input {})",
            track.name,
            mapper.len(),
            track.input_dir.display()
        );

        let paths = match discover_documents(&track.input_dir, &extractors) {
            Ok(paths) => paths,
            Err(e) => {
                println!("  WARNING: cannot read input directory: {e}");
                total_warnings += 1;
                continue;
            }
        };
        if paths.is_empty() {
            println!("  WARNING: no documents found");
            total_warnings += 1;
        }

        for path in &paths {
            let month = track.convention.month_key(path);
            let mapped = match mapper.map(&month) {
                Ok(display) => display.to_string(),
                Err(_) => {
                    total_warnings += 1;
                    "UNMAPPED".to_string()
                }
            };
            println!("  {} [{month} -> {mapped}]", path.display());

            let document = match extractors.extract(path, month) {
                Ok(document) => document,
                Err(e) => {
                    println!("    WARNING: {e}");
                    total_warnings += 1;
                    continue;
                }
            };

            let mut per_matcher: BTreeMap<&str, usize> = BTreeMap::new();
            let mut solved = 0;
            for parsed in document.lines().filter_map(|line| parser.parse_line(&line)) {
                *per_matcher.entry(parsed.matcher).or_default() += 1;
                if parsed.is_solved() {
                    solved += 1;
                }
            }

            let matched: usize = per_matcher.values().sum();
            println!("    {matched} lines matched, {solved} accepted");
            for (matcher, count) in &per_matcher {
                println!("      {matcher}: {count}");
            }
            if matched == 0 {
                println!("    WARNING: no line matched any known format");
                total_warnings += 1;
            }
        }
    }

    if total_warnings == 0 {
        println!("Configuration and inputs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
