use std::path::PathBuf;

use anyhow::Context;
use bill_cli::commands::{self, PreviewArgs, TotalsArgs, TotalsReport};
use bill_cli::config::AppConfig;
use bill_cli::logging;
use bill_cli::preview::InvoicePreview;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// GST tax invoices with amounts in Indian-numbering words.
#[derive(Debug, Parser)]
#[command(name = "billswift", version)]
struct Cli {
    /// Settings file. Defaults to `billswift.toml` in the working directory
    /// when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or `EnvFilter` directive; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print an amount in words, e.g. `words 1266838`.
    Words {
        amount: String,
    },

    /// Print CGST, SGST and the grand total for a subtotal.
    Totals {
        /// Taxable subtotal.
        #[arg(long)]
        amount: Option<String>,

        /// CGST rate in percent (default from config).
        #[arg(long)]
        cgst: Option<String>,

        /// SGST rate in percent (default from config).
        #[arg(long)]
        sgst: Option<String>,

        /// Line items CSV whose due-now amounts replace the subtotal.
        #[arg(long)]
        items: Option<PathBuf>,
    },

    /// Print the invoice as it would be issued.
    Preview {
        /// Invoice document (TOML). A fresh invoice is used when omitted.
        invoice: Option<PathBuf>,

        /// Replace the invoice's items with those in this CSV.
        #[arg(long)]
        items: Option<PathBuf>,

        /// Load a recent bill by number, e.g. `INV-1022`.
        #[arg(long)]
        load: Option<String>,

        /// Fail instead of warning when the invoice is incomplete.
        #[arg(long)]
        strict: bool,
    },

    /// List recent bills.
    Recent {
        /// Read the bills from this CSV file instead of the built-in list.
        #[arg(long)]
        import: Option<PathBuf>,

        /// Also write them to this CSV file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = AppConfig::load(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level, config.logging.file.as_deref())?;

    match &config_path {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("no config file; using defaults"),
    }
    debug!(rates = %commands::describe_rates(&config), "default rates");

    match cli.command {
        Command::Words { amount } => {
            println!("{}", commands::words(&amount)?);
        }
        Command::Totals {
            amount,
            cgst,
            sgst,
            items,
        } => {
            let args = TotalsArgs {
                amount,
                cgst,
                sgst,
                items,
            };
            let totals = commands::totals(&config, &args)?;
            println!("{}", TotalsReport(&totals));
        }
        Command::Preview {
            invoice,
            items,
            load,
            strict,
        } => {
            let args = PreviewArgs {
                invoice,
                items,
                load,
            };
            let form = commands::prepare_invoice(&config, &args, Local::now().date_naive())?;

            for problem in commands::check_invoice(&form, strict)? {
                debug!(%problem, "invoice incomplete");
                eprintln!("warning: {problem}");
            }

            println!(
                "{}",
                InvoicePreview::new(form.invoice(), &config.bank, config.merchant_name())
            );
        }
        Command::Recent { import, export } => {
            let listing = commands::recent(import.as_deref(), export.as_deref())
                .context("failed to list recent bills")?;
            println!("{listing}");
            if let Some(path) = export {
                eprintln!("exported to {}", path.display());
            }
        }
    }

    Ok(())
}
