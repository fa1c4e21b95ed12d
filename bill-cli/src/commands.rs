//! Subcommand bodies. Each returns the text to print so `main` stays a thin
//! dispatcher and the behaviour can be tested without a terminal.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bill_core::format::{format_inr, format_invoice_date, format_percent};
use bill_core::samples::{default_invoice, find_recent_bill, recent_bills};
use bill_core::{
    InvoiceEvent, InvoiceForm, InvoiceValidationError, NumericField, Totals, number_to_words,
    recompute_totals, validate_invoice,
};
use bill_data::{items_csv, load_invoice_from_file, read_recent_bills, write_recent_bills};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::{AppConfig, fill_issuer};

// ─── words ───────────────────────────────────────────────────────────────────

/// Amount in words. Accepts Indian or western digit grouping.
pub fn words(raw: &str) -> Result<String> {
    match NumericField::parse(raw) {
        NumericField::Value(value) => Ok(number_to_words(value)),
        _ => bail!("'{raw}' is not an amount"),
    }
}

// ─── totals ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct TotalsArgs {
    pub amount: Option<String>,
    pub cgst: Option<String>,
    pub sgst: Option<String>,
    pub items: Option<PathBuf>,
}

/// Derives totals from the given subtotal and rates. Rates not given come
/// from the config; items, when given, replace the subtotal.
pub fn totals(
    config: &AppConfig,
    args: &TotalsArgs,
) -> Result<Totals> {
    let amount = args.amount.as_deref().map(NumericField::parse).unwrap_or_default();
    let cgst = rate(args.cgst.as_deref(), config.rates.cgst_percent);
    let sgst = rate(args.sgst.as_deref(), config.rates.sgst_percent);

    let items = args
        .items
        .as_deref()
        .map(|path| {
            items_csv::load_from_file(path)
                .with_context(|| format!("failed to import items from {}", path.display()))
        })
        .transpose()?;

    Ok(recompute_totals(&amount, &cgst, &sgst, items.as_deref()))
}

fn rate(
    raw: Option<&str>,
    default: Decimal,
) -> NumericField {
    raw.map_or(NumericField::Value(default), NumericField::parse)
}

/// Aligned listing of derived totals.
pub struct TotalsReport<'a>(pub &'a Totals);

impl fmt::Display for TotalsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let totals = self.0;
        writeln!(f, "{:<14}{:>18}", "Subtotal", format_inr(totals.amount))?;
        writeln!(f, "{:<14}{:>18}", "CGST", format_inr(totals.cgst_amount))?;
        writeln!(f, "{:<14}{:>18}", "SGST", format_inr(totals.sgst_amount))?;
        writeln!(f, "{:<14}{:>18}", "Total", format_inr(totals.total_amount))?;
        writeln!(f, "Tax in words:   {}", totals.tax_amount_in_words)?;
        write!(f, "Total in words: {}", totals.total_amount_in_words)
    }
}

// ─── preview ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PreviewArgs {
    pub invoice: Option<PathBuf>,
    pub items: Option<PathBuf>,
    pub load: Option<String>,
}

/// Builds the form the preview prints: the document (or a fresh invoice
/// dated `today`), issuer gaps filled from config, then the item import and
/// recent-bill load applied as form edits.
pub fn prepare_invoice(
    config: &AppConfig,
    args: &PreviewArgs,
    today: NaiveDate,
) -> Result<InvoiceForm> {
    let mut invoice = match &args.invoice {
        Some(path) => load_invoice_from_file(path)
            .with_context(|| format!("failed to load invoice {}", path.display()))?,
        None => {
            let mut fresh = default_invoice(today);
            fresh.issuer = config.issuer.clone();
            fresh.cgst_percent = config.rates.cgst_percent.into();
            fresh.sgst_percent = config.rates.sgst_percent.into();
            fresh
        }
    };
    fill_issuer(&mut invoice.issuer, &config.issuer);

    let mut form = InvoiceForm::new(invoice);

    if let Some(path) = &args.items {
        let items = items_csv::load_from_file(path)
            .with_context(|| format!("failed to import items from {}", path.display()))?;
        if items.is_empty() {
            bail!("{} contains no items", path.display());
        }
        debug!(count = items.len(), "replacing items from CSV");
        let mut replaced = form.into_invoice();
        replaced.items = items;
        form = InvoiceForm::new(replaced);
    }

    if let Some(bill_no) = &args.load {
        let bill = find_recent_bill(bill_no)
            .with_context(|| format!("no recent bill numbered '{bill_no}'"))?;
        info!(bill_no = %bill.bill_no, "loading recent bill");
        form = form.apply(InvoiceEvent::LoadRecent(bill));
    }

    Ok(form)
}

/// Validation problems for a prepared form, empty when it is complete.
pub fn problems(form: &InvoiceForm) -> Vec<InvoiceValidationError> {
    validate_invoice(form.invoice()).err().unwrap_or_default()
}

/// Problems to print as warnings. With `strict`, any problem fails the
/// preview instead.
pub fn check_invoice(
    form: &InvoiceForm,
    strict: bool,
) -> Result<Vec<InvoiceValidationError>> {
    let problems = problems(form);
    if strict && !problems.is_empty() {
        let listing: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!("invoice has {} problem(s): {}", problems.len(), listing.join("; "));
    }
    Ok(problems)
}

// ─── recent ──────────────────────────────────────────────────────────────────

/// Lists the recent bills, read from `import` when given, optionally
/// exporting them to `export` as CSV.
pub fn recent(
    import: Option<&Path>,
    export: Option<&Path>,
) -> Result<String> {
    let bills = match import {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            let bills = read_recent_bills(BufReader::new(file))
                .with_context(|| format!("failed to read recent bills from {}", path.display()))?;
            debug!(path = %path.display(), count = bills.len(), "imported recent bills");
            bills
        }
        None => recent_bills(),
    };

    if let Some(path) = export {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_recent_bills(BufWriter::new(file), &bills)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), count = bills.len(), "exported recent bills");
    }

    let lines: Vec<String> = bills
        .iter()
        .map(|bill| {
            format!(
                "{:<10} {:<10} {:>16}  {}",
                bill.bill_no,
                format_invoice_date(&bill.date),
                format_inr(bill.total_amount),
                bill.bill_to
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// The default rates in effect, as logged at startup.
pub fn describe_rates(config: &AppConfig) -> String {
    format!(
        "CGST {}% + SGST {}%",
        format_percent(config.rates.cgst_percent),
        format_percent(config.rates.sgst_percent)
    )
}
