//! Altos command-line tool - list, download and unpack weekly rental snapshots

use altos_client::altos::{
    date_of_last_friday, deflate_in_background, parse_date, sync_snapshot, AltosClient,
    Endpoints,
};
use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "altos", version, about = "Altos Research weekly rental data client")]
struct Cli {
    /// Altos username (defaults to ALTOS_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Altos password (defaults to ALTOS_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the date of the last Friday before today (or before --from)
    LastFriday {
        #[arg(long)]
        from: Option<String>,
    },
    /// Print the download URL for a snapshot date
    Url { date: String },
    /// Print the available files as JSON
    List,
    /// Print the date of the newest available file
    Latest,
    /// Download a URL to a local path
    Download {
        url: String,
        dest: PathBuf,
        /// Send the request without credentials
        #[arg(long)]
        no_auth: bool,
    },
    /// Decompress a downloaded .gz file next to itself
    Decompress { path: PathBuf },
    /// Download and decompress a snapshot (the newest one by default)
    Sync {
        #[arg(long)]
        date: Option<String>,
        /// Target directory (defaults to ALTOS_DOWNLOAD_DIR or ./data)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Delete the .gz file once decompressed
        #[arg(long)]
        remove_compressed: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env(&cli);

    // anyhow prints the error chain on exit
    run(cli.command, &config).await
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::LastFriday { from } => {
            let friday = match from {
                Some(from) => {
                    let start = parse_date(&from)?.and_time(NaiveTime::MIN).and_utc();
                    date_of_last_friday(Some(start.fixed_offset()))
                }
                None => date_of_last_friday(None),
            };
            println!("{}", friday);
        }
        Command::Url { date } => {
            println!("{}", Endpoints::default().file_url(&date)?);
        }
        Command::List => {
            let files = config.client()?.list_files().await?;
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
        Command::Latest => {
            println!("{}", config.client()?.latest_file_date().await?);
        }
        Command::Download { url, dest, no_auth } => {
            let written = config
                .client()?
                .download_file(&url, &dest, !no_auth)
                .await
                .with_context(|| format!("Failed to download {}", url))?;
            info!("✓ Saved {} bytes to {:?}", written, dest);
        }
        Command::Decompress { path } => {
            let out = deflate_in_background(path).await?;
            println!("{}", out.display());
        }
        Command::Sync {
            date,
            dir,
            remove_compressed,
        } => {
            let dir = dir.unwrap_or_else(|| config.download_dir.clone());
            let client = config.client()?;
            let out = sync_snapshot(&client, date.as_deref(), &dir, remove_compressed).await?;
            println!("{}", out.display());
        }
    }

    Ok(())
}

/// Configuration loaded from the command line and environment variables
#[derive(Clone)]
struct Config {
    username: String, // empty = ALTOS_USERNAME
    password: String,
    download_dir: PathBuf,
}

impl Config {
    fn from_env(cli: &Cli) -> Self {
        Config {
            username: cli.username.clone().unwrap_or_default(),

            password: cli
                .password
                .clone()
                .or_else(|| env::var("ALTOS_PASSWORD").ok())
                .unwrap_or_default(),

            download_dir: env::var("ALTOS_DOWNLOAD_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
        }
    }

    fn client(&self) -> Result<AltosClient> {
        AltosClient::from_credentials(&self.username, &self.password)
            .context("Failed to configure Altos client")
    }
}
