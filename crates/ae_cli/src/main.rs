//! Inheritance Planner CLI
//!
//! 시트 CSV + 플래너 설정(YAML) → 최적 소스 조합 리포트

use ae_core::{PlannerConfig, ReverseIndex};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod report;
mod sheet;

#[derive(Parser)]
#[command(name = "ae_cli")]
#[command(about = "Plan inheritance sources from an exported sheet", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the best anchor + source selection
    Plan {
        /// Sheet export (CSV with Inheritance Name, Level, Acquired By, Rarity)
        #[arg(long)]
        sheet: PathBuf,

        /// Planner config (YAML); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Selection cap, anchor included
        #[arg(long)]
        max_sources: Option<usize>,

        /// Pin this anchor (ignored when targets are set)
        #[arg(long)]
        anchor: Option<String>,

        /// Restrict anchors to these characters (repeatable)
        #[arg(long = "target")]
        targets: Vec<String>,

        /// Seed for the random anchor draw
        #[arg(long)]
        seed: Option<u64>,

        /// Evaluate anchors in parallel
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// Print the result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the reverse index (source → inheritances) as JSON
    Index {
        /// Sheet export (CSV)
        #[arg(long)]
        sheet: PathBuf,

        /// Planner config (YAML) providing the category catalog
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Plan { sheet, config, max_sources, anchor, targets, seed, parallel, json } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(max_sources) = max_sources {
                cfg.max_sources = max_sources;
            }
            if anchor.is_some() {
                cfg.anchor = anchor;
            }
            if !targets.is_empty() {
                cfg.target_anchors = targets;
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            cfg.parallel |= parallel;

            run_plan(&sheet, &cfg, json)?;
        }

        Commands::Index { sheet, config } => {
            let cfg = load_config(config.as_deref())?;
            let (records, _) = sheet::load_records(&sheet)?;
            let index = ReverseIndex::build(&records, &cfg.category_catalog());
            let entries: Vec<_> = index.iter().collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(PlannerConfig::default()),
    }
}

fn run_plan(sheet_path: &Path, cfg: &PlannerConfig, json: bool) -> Result<()> {
    let (records, stats) = sheet::load_records(sheet_path)?;
    if stats.level_fallbacks > 0 {
        log::warn!("{} row(s) had an unreadable level and were treated as level 0", stats.level_fallbacks);
    }

    let outcome = ae_core::plan(&records, cfg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report::JsonReport::new(&outcome.result))?);
    } else {
        print!("{}", report::render_text(&outcome.result, |source| outcome.category_of(source)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
    }

    #[test]
    fn test_demo_sheet_plans_with_sampled_anchor() -> Result<()> {
        let cfg = load_config(Some(demo("planner.yaml").as_path()))?;
        let (records, stats) = sheet::load_records(&demo("inheritance.csv"))?;
        assert_eq!(stats.skipped_max_level, 1);

        let first = ae_core::plan(&records, &cfg)?.result;
        let second = ae_core::plan(&records, &cfg)?.result;

        // fixed seed: same draw, same result
        assert_eq!(first, second);
        assert!(first.sources.len() + 1 <= cfg.max_sources);
        if let Some(anchor) = &first.anchor {
            assert!(cfg.owned_characters.contains(anchor));
        }
        Ok(())
    }

    #[test]
    fn test_default_config_without_file() -> Result<()> {
        let cfg = load_config(None)?;
        assert_eq!(cfg, PlannerConfig::default());
        Ok(())
    }

    #[test]
    fn test_cli_parses_plan_flags() {
        let cli = Cli::parse_from([
            "ae_cli", "plan", "--sheet", "s.csv", "--target", "Hero", "--target", "Rogue",
            "--max-sources", "7", "--json",
        ]);
        match cli.command {
            Commands::Plan { targets, max_sources, json, parallel, .. } => {
                assert_eq!(targets, vec!["Hero".to_string(), "Rogue".to_string()]);
                assert_eq!(max_sources, Some(7));
                assert!(json);
                assert!(!parallel);
            }
            Commands::Index { .. } => panic!("expected plan"),
        }
    }
}
