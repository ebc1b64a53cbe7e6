mod export;
mod run;


use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;
use ytcs_sentiment::{ModelSettings, SentimentModel};
use ytcs_youtube::YoutubeClient;

use crate::run::{RunError, RunReport};

const PROMPT: &str = "Enter a YouTube video URL: ";

#[derive(Debug, Parser)]
#[command(name = "ytcs", version)]
#[command(about = "Fetch a YouTube video's comments, label their sentiment, and save them as CSV")]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let config = ytcs_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = YoutubeClient::with_base_url(
        &config.youtube_api_key,
        config.request_timeout_secs,
        &config.youtube_base_url,
    )?;

    let classifier = match SentimentModel::load(&ModelSettings::from_app_config(&config))
        .await
        .map_err(RunError::from)
    {
        Ok(classifier) => classifier,
        Err(e) => {
            tracing::error!(error = %e, "sentiment model unavailable");
            println!("{e}");
            return Ok(());
        }
    };

    let url = prompt_url().await?;
    match run::run(&client, &classifier, &url, &config.output_dir).await {
        Ok(report) => print_report(&report),
        Err(e) => {
            tracing::error!(error = ?e, "run aborted");
            println!("{e}");
        }
    }

    Ok(())
}

async fn prompt_url() -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(PROMPT.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line.trim().to_string())
}

fn print_report(report: &RunReport) {
    println!(
        "Comments with sentiment analysis saved to: {}",
        report.path.display()
    );
    if report.placeholder_title {
        println!("Note: the video title could not be retrieved; a placeholder name was used.");
    }
    if report.unknown_labels > 0 {
        println!(
            "Note: {} of {} comments could not be classified and are labeled \"unknown\".",
            report.unknown_labels, report.rows
        );
    }
}
