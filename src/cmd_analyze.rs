//! `latte analyze` handler.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use latte_config::{Config, ConfigLoader};
use latte_oac::{analyze_dump, Oac, ReportError};

pub(crate) struct AnalyzeArgs {
    pub dump: PathBuf,
    pub package: String,
    pub screenshot: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub format: String,
}

/// Analyze one capture and print the per-condition counts.
pub(crate) fn run(config: &Config, args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dump = fs::read_to_string(&args.dump)?;
    let out_dir = args
        .out
        .unwrap_or_else(|| PathBuf::from(ConfigLoader::expand_path(&config.output.dir)));

    info!("Analyzing {} for {}", args.dump.display(), args.package);
    let (analysis, written) = analyze_dump(
        &dump,
        &args.package,
        args.screenshot.as_deref(),
        &out_dir,
        config,
    );

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&analysis.report.count_map())?;
            println!("{}", json);
        }
        _ => {
            println!("{:<28} {}", "CONDITION", "NODES");
            println!("{}", "-".repeat(36));
            for oac in Oac::ALL {
                println!("{:<28} {}", oac.name(), analysis.report.count(oac));
            }
            println!("{}", "-".repeat(36));
            println!(
                "{} nodes, {} flagged",
                analysis.tree.len(),
                analysis.report.flagged_count()
            );
        }
    }

    match written {
        Ok(artifacts) => {
            for path in artifacts.paths() {
                info!("Artifact {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            if let ReportError::Partial { written, .. } = &e {
                warn!("Only {} artifact(s) written", written.len());
            }
            Err(e.into())
        }
    }
}
