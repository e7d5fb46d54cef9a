//! IAR CLI: command-line client for the IAR uploader API.
//!
//! Set IAR_API_URL (or API_URL) to point at the server; defaults to http://localhost:3000.

use anyhow::Context;
use clap::{Parser, Subcommand};
use iar_api_client::ApiClient;
use iar_cli::{check_submittable, init_tracing, load_preview, render_table};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iar", about = "IAR monitoring CSV uploader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server can reach the destination database
    Status,
    /// Show how a CSV file will be parsed, without uploading it
    Preview {
        /// Path to the CSV file
        file: PathBuf,
        /// Ask the server to parse the file instead of parsing it locally
        #[arg(long)]
        remote: bool,
        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
        /// Maximum number of rows to print (all rows by default)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Upload a CSV file; all rows are inserted or none
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },
}

const MAX_CELL_WIDTH: usize = 40;

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = ApiClient::from_env()
        .context("Failed to create API client. Set IAR_API_URL (or API_URL)")?;

    match cli.command {
        Commands::Status => {
            let status = client.db_status().await?;
            if status.ok {
                println!(
                    "{}",
                    status.message.as_deref().unwrap_or("Database connection successful.")
                );
            } else {
                anyhow::bail!(
                    "{}",
                    status.error.as_deref().unwrap_or("Database connection failed.")
                );
            }
        }
        Commands::Preview {
            file,
            remote,
            json,
            limit,
        } => {
            let preview = if remote {
                client.preview_csv(&file).await?
            } else {
                load_preview(&file)?
            };

            if json {
                print_json(&preview)?;
            } else {
                println!("Selected: {}", preview.file_meta());
                if let Some(message) = preview.state.message() {
                    anyhow::bail!("{}", message);
                }
                let shown = limit.unwrap_or(preview.row_count).min(preview.row_count);
                println!("Showing {} of {} row(s).", shown, preview.row_count);
                print!("{}", render_table(&preview, limit, MAX_CELL_WIDTH));
            }
        }
        Commands::Upload { file } => {
            let status = client.db_status().await?;
            let preview = load_preview(&file)?;
            println!("Selected: {}", preview.file_meta());
            check_submittable(&status, &preview)?;

            tracing::info!(file = %file.display(), rows = preview.row_count, "Uploading CSV");
            let response = client
                .upload_csv(&file)
                .await
                .map_err(|e| anyhow::anyhow!("Upload failed: {}", e))?;
            println!("Upload complete. Inserted {} rows.", response.inserted);
        }
    }

    Ok(())
}
