//! CSV export of a payoff projection

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use super::steps::PayoffProjection;

/// Card id used for the month-total rows
pub const TOTAL_ROW_ID: &str = "TOTAL";

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "CardId")]
    card_id: &'a str,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Payment")]
    payment: String,
    #[serde(rename = "Interest")]
    interest: String,
    #[serde(rename = "Principal")]
    principal: String,
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Write one row per card per month, followed by that month's total row
pub fn write_projection_csv<W: Write>(projection: &PayoffProjection, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for step in &projection.projections {
        for (card_id, figures) in &step.cards {
            csv_writer.serialize(ExportRow {
                month: step.month,
                date: &step.date,
                card_id,
                balance: money(figures.balance),
                payment: money(figures.payment),
                interest: money(figures.interest),
                principal: money(figures.principal),
            })?;
        }
        csv_writer.serialize(ExportRow {
            month: step.month,
            date: &step.date,
            card_id: TOTAL_ROW_ID,
            balance: money(step.total_balance),
            payment: money(step.total_payment),
            interest: money(step.total_interest),
            principal: money(step.total_principal),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the projection CSV to a file
pub fn export_projection<P: AsRef<Path>>(projection: &PayoffProjection, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_projection_csv(projection, file)
}
