//! # Facture CLI
//!
//! Command-line interface for the invoice builder.
//!
//! ## Usage
//!
//! ```bash
//! # Serve the form UI and JSON API
//! facture serve --listen 0.0.0.0:8080
//!
//! # Render the default invoice preview to a PNG
//! facture preview --out preview.png
//!
//! # Export an invoice snapshot to its PDF artifact
//! facture export --input invoice.json
//!
//! # Export to an explicit path
//! facture export --input invoice.json --out out.pdf
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use facture::{
    FactureError, Invoice,
    export::{artifact_filename, export_invoice},
    preview::render_preview,
    server::{ServerConfig, serve},
};

/// Facture - invoice builder utility
#[derive(Parser, Debug)]
#[command(name = "facture")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the form frontend and JSON API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },

    /// Render an invoice preview to a PNG file
    Preview {
        /// Invoice snapshot JSON (defaults to the built-in demo invoice)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output PNG path
        #[arg(long, value_name = "FILE", default_value = "preview.png")]
        out: PathBuf,

        /// Supersampling scale factor
        #[arg(long, default_value = "1")]
        scale: usize,
    },

    /// Export an invoice to its single-page A4 PDF artifact
    Export {
        /// Invoice snapshot JSON (defaults to the built-in demo invoice)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output path (defaults to invoice-<invoice number>.pdf)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), FactureError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen } => {
            serve(ServerConfig {
                listen_addr: listen,
            })
            .await?;
        }

        Commands::Preview { input, out, scale } => {
            let invoice = load_invoice(input)?;
            let png = render_preview(&invoice, scale).to_png()?;
            std::fs::write(&out, png)?;
            info!(path = %out.display(), "preview written");
        }

        Commands::Export { input, out } => {
            let invoice = load_invoice(input)?;
            let artifact = export_invoice(&invoice)?;
            let out = out.unwrap_or_else(|| PathBuf::from(artifact_filename(&invoice)));
            std::fs::write(&out, &artifact.bytes)?;
            info!(path = %out.display(), bytes = artifact.bytes.len(), "invoice exported");
        }
    }

    Ok(())
}

/// Load an invoice snapshot from JSON, or fall back to the demo default.
/// The derived total is recomputed so a stale stored value never survives
/// the load.
fn load_invoice(path: Option<PathBuf>) -> Result<Invoice, FactureError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let mut invoice: Invoice = serde_json::from_str(&json)
                .map_err(|e| FactureError::InvalidInvoice(format!("{}: {}", path.display(), e)))?;
            invoice.recompute_total();
            Ok(invoice)
        }
        None => Ok(Invoice::default_snapshot()),
    }
}
