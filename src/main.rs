//! Resume scanner: keyword-based resume and job description compatibility tool

mod augment;
mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;

use augment::{NoopAugmenter, SkillAugmenter};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, ScannerError};
use input::load_document;
use log::{error, info};
use output::{save_report_to_file, suggest_filename, ReportGenerator, ScanReport};
use processing::{analyzer::MISSING_INPUT_MESSAGE, CategoryTaxonomy, Scanner};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            detailed,
            format,
            save,
            no_augment,
        } => {
            info!("Starting resume scan");

            // Parse output format, falling back to the configured default
            let output_format = match &format {
                Some(name) => {
                    cli::parse_output_format(name).map_err(ScannerError::InvalidInput)?
                }
                None => config.output.format,
            };

            println!("🚀 Resume scan");
            println!("📄 Resume: {}", resume.display());
            match &job {
                Some(path) => println!("💼 Job Description: {}", path.display()),
                None => println!("💼 Job Description: (inline text)"),
            }
            println!("🔧 Output Format: {:?}", output_format);
            if no_augment {
                println!("⚠️  Skill augmentation disabled");
            }

            // Read the job description
            let job_description = match (job, job_text) {
                (Some(path), _) => tokio::fs::read_to_string(&path).await.map_err(|e| {
                    ScannerError::InvalidInput(format!(
                        "Failed to read job description {}: {}",
                        path.display(),
                        e
                    ))
                })?,
                (None, Some(text)) => text,
                (None, None) => {
                    return Err(ScannerError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()))
                }
            };

            // Load the resume
            println!("\n📂 Loading resume...");
            let document = load_document(&resume).await?;

            // Build the scanner
            let augmenter: Arc<dyn SkillAugmenter> = if no_augment {
                Arc::new(NoopAugmenter)
            } else {
                augment::from_config(&config.augmenter)?
            };
            let scanner = Scanner::new(&config, augmenter)?;

            // Run the scan
            println!("🔍 Scanning...");
            let outcome = scanner
                .scan(&document.bytes, document.kind, &job_description)
                .await?;
            println!("✅ Scan complete in {}ms\n", outcome.processing_time_ms);

            // Render the report
            let report = ScanReport::from_scan(outcome, &resume.to_string_lossy());
            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            // Save to disk when requested
            if let Some(path) = save {
                let target = if path.is_dir() {
                    path.join(suggest_filename(
                        &output_format,
                        &resume.to_string_lossy(),
                        true,
                    ))
                } else {
                    path
                };
                save_report_to_file(&rendered, &target)?;
                println!("💾 Report saved to {}", target.display());
            }
        }

        Commands::Taxonomy { category } => {
            let taxonomy = match &config.taxonomy_file {
                Some(path) => CategoryTaxonomy::from_toml_file(path)?,
                None => CategoryTaxonomy::builtin(),
            };

            if let Some(name) = &category {
                if !taxonomy.iter().any(|(cat, _)| cat == name) {
                    return Err(ScannerError::InvalidInput(format!(
                        "Unknown category: {}",
                        name
                    )));
                }
            }

            println!("📚 Category taxonomy ({} categories)\n", taxonomy.len());
            for (name, terms) in taxonomy.iter() {
                if let Some(filter) = &category {
                    if name != filter {
                        continue;
                    }
                }
                println!("{} ({} terms)", name, terms.len());
                println!("  {}\n", terms.join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current configuration:\n");
                match &config.taxonomy_file {
                    Some(path) => println!("Taxonomy file: {}", path.display()),
                    None => println!("Taxonomy file: (builtin)"),
                }
                println!("\nScoring:");
                println!("  Keyword weight: {}", config.scoring.keyword_weight);
                println!("  Category weight: {}", config.scoring.category_weight);
                println!(
                    "  Missing section penalty: {}",
                    config.scoring.missing_section_penalty
                );
                println!("  Issue penalty: {}", config.scoring.issue_penalty);
                println!("\nAugmenter:");
                println!("  Endpoint: {}", config.augmenter.endpoint);
                let key_status = if config.augmenter.resolve_api_key().is_some() {
                    "configured"
                } else {
                    "not set"
                };
                println!("  API key: {}", key_status);
                println!("  Timeout: {}s", config.augmenter.timeout_secs);
                println!("  Result limit: {}", config.augmenter.result_limit);
                println!(
                    "  Cache: {}",
                    if config.augmenter.enable_cache {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("✅ Configuration reset to defaults");
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}
