use clap::Parser;
use dialoguer::{Input, Select};
use resume_analyzer::{analyze, cli, client, config, error};
use resume_analyzer_common::{
    listing_entries, render_result, ResumeListing, SubmissionState, EMPTY_LISTING_MESSAGE,
};
use cli::{Cli, Commands};
use client::AnalysisClient;
use config::Config;
use error::{ResumeAnalyzerError, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // エラーはDisplayの1行だけを出す
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.command {
        Commands::Config { .. } => Config::load_or_default(),
        _ => Config::load()?,
    };

    match cli.command {
        Commands::List => {
            let client = AnalysisClient::new(config.service_config(cli.base_url.as_deref())?)?;
            let listing = fetch_listing_or_empty(&client).await;

            if listing.is_empty() {
                println!("{}", EMPTY_LISTING_MESSAGE);
            } else {
                for entry in listing_entries(&listing, client.config()) {
                    println!("{}\t{}", entry.name, entry.download_url);
                }
            }
        }

        Commands::Analyze { file, timeout } => {
            let mut service = config.service_config(cli.base_url.as_deref())?;
            if let Some(secs) = timeout {
                service = service.with_timeout(Duration::from_secs(secs.max(1)));
            }
            let client = AnalysisClient::new(service)?;

            let path = match file {
                Some(path) => path,
                None => PathBuf::from(
                    Input::<String>::new()
                        .with_prompt("Resume file (PDF, DOCX, or TXT)")
                        .interact_text()?,
                ),
            };

            let cancel = async {
                if tokio::signal::ctrl_c().await.is_err() {
                    // シグナルを待てない環境では取消しない
                    std::future::pending::<()>().await;
                }
            };

            match analyze::run_analysis(&client, &path, cancel).await? {
                SubmissionState::Succeeded(result) => {
                    print!("{}", render_result(&result));
                }
                SubmissionState::Failed(message) => {
                    return Err(ResumeAnalyzerError::Analysis(message));
                }
                SubmissionState::Idle | SubmissionState::Submitting(_) => {
                    println!("Cancelled.");
                }
            }
        }

        Commands::Download { filename, output } => {
            let client = AnalysisClient::new(config.service_config(cli.base_url.as_deref())?)?;

            let filename = match filename {
                Some(name) => name,
                None => {
                    let listing = fetch_listing_or_empty(&client).await;
                    if listing.is_empty() {
                        println!("{}", EMPTY_LISTING_MESSAGE);
                        return Ok(());
                    }
                    let index = Select::new()
                        .with_prompt("Select a resume to download")
                        .items(&listing.files)
                        .default(0)
                        .interact()?;
                    listing.files[index].clone()
                }
            };

            let saved = client.download(&filename, &output).await?;
            println!("Saved: {}", saved.display());
        }

        Commands::Config { set_base_url, set_timeout, show } => {
            let mut changed = false;

            if let Some(url) = set_base_url {
                config.set_base_url(&url)?;
                changed = true;
            }

            if let Some(secs) = set_timeout {
                config.set_timeout(secs)?;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("Configuration saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Settings:");
                println!("  Base URL: {}", config.base_url);
                println!("  Timeout: {}s", config.timeout_seconds);
                if let Ok(url) = std::env::var(config::BASE_URL_ENV) {
                    println!("  ({} overrides base URL: {})", config::BASE_URL_ENV, url);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("resume_analyzer={0},resume_analyzer_common={0}", default_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 一覧取得の失敗はログに出して空一覧として扱う
async fn fetch_listing_or_empty(client: &AnalysisClient) -> ResumeListing {
    match client.fetch_listing().await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch resumes");
            ResumeListing::default()
        }
    }
}
