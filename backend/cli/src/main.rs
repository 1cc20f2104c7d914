mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use labelcheck_core::{verify, DeclaredLabel};
use labelcheck_gateway::{start_server, GatewayState};
use labelcheck_understanding::GoogleVisionOcr;

use config::Config;

#[derive(Parser)]
#[command(name = "labelcheck")]
#[command(about = "Checks declared alcohol label attributes against OCR text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the verification HTTP API
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query a running server's health endpoint
    Status,
    /// Verify declared attributes against an already-extracted text file
    Check {
        /// File holding the recognized label text
        #[arg(long)]
        text: PathBuf,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long = "class", default_value = "")]
        product_class: String,
        /// Percent alcohol by volume
        #[arg(long, default_value_t = 0.0)]
        abv: f64,
        /// Net contents, e.g. "750 mL"
        #[arg(long, default_value = "")]
        net: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logger(&logging::LoggerConfig {
        service: "labelcheck",
        level: &config.log_level,
        log_dir: config.log_dir.as_deref(),
        json_console: config.log_json,
    });

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("labelcheck is not running on port {}", config.port);
                }
            }
        }
        Commands::Check {
            text,
            brand,
            product_class,
            abv,
            net,
        } => {
            let extracted = tokio::fs::read_to_string(&text)
                .await
                .with_context(|| format!("Failed to read {}", text.display()))?;
            let declared = DeclaredLabel {
                brand_name: brand,
                product_class,
                alcohol_content: abv,
                net_contents: net,
            };
            let report = verify(&extracted, &declared);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.overall_match {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let mut ocr = GoogleVisionOcr::new(config.google_vision_api_key.clone().unwrap_or_default());
    if let Some(endpoint) = &config.google_vision_endpoint {
        info!(endpoint = %endpoint, "Using custom Google Vision endpoint");
        ocr = ocr.with_endpoint(endpoint);
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, config.port))?;

    info!(
        port = config.port,
        bind = %config.bind_address,
        max_upload_bytes = config.max_upload_bytes,
        "Starting labelcheck"
    );

    let state = GatewayState::new(Arc::new(ocr), config.upload_dir, config.max_upload_bytes);
    start_server(addr, state).await
}
