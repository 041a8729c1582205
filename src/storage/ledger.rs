//! Transactions and balance-sheet items as CSV rows
//!
//! Each file holds one list. A missing file reads as an empty list so a fresh
//! data directory needs no seeding.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::budget::{BalanceItem, Transaction};
use crate::error::ProjectionResult;
use super::ensure_parent_dir;

fn load_rows<T: DeserializeOwned, R: Read>(reader: R) -> ProjectionResult<Vec<T>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let rows = rdr.deserialize::<T>().collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn save_rows<T: Serialize, W: Write>(writer: W, header: &[&str], rows: &[T]) -> ProjectionResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn load_file<T: DeserializeOwned>(path: &Path) -> ProjectionResult<Vec<T>> {
    if !path.exists() {
        log::debug!("No file at {}", path.display());
        return Ok(Vec::new());
    }
    let rows = load_rows(File::open(path)?)?;
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

const TRANSACTION_HEADER: [&str; 5] = ["date", "kind", "category", "amount", "description"];
const BALANCE_HEADER: [&str; 3] = ["Category", "Item", "Amount"];

/// Load transactions; rows with a negative amount or blank category are rejected
pub fn load_transactions<P: AsRef<Path>>(path: P) -> ProjectionResult<Vec<Transaction>> {
    load_file(path.as_ref())
}

pub fn load_transactions_from_reader<R: Read>(reader: R) -> ProjectionResult<Vec<Transaction>> {
    load_rows(reader)
}

pub fn save_transactions<P: AsRef<Path>>(path: P, transactions: &[Transaction]) -> ProjectionResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    save_transactions_to_writer(File::create(path)?, transactions)?;
    log::info!("Saved {} transactions to {}", transactions.len(), path.display());
    Ok(())
}

pub fn save_transactions_to_writer<W: Write>(writer: W, transactions: &[Transaction]) -> ProjectionResult<()> {
    save_rows(writer, &TRANSACTION_HEADER, transactions)
}

/// Load assets or liabilities as `Category,Item,Amount` rows
pub fn load_balance_items<P: AsRef<Path>>(path: P) -> ProjectionResult<Vec<BalanceItem>> {
    load_file(path.as_ref())
}

pub fn load_balance_items_from_reader<R: Read>(reader: R) -> ProjectionResult<Vec<BalanceItem>> {
    load_rows(reader)
}

pub fn save_balance_items<P: AsRef<Path>>(path: P, items: &[BalanceItem]) -> ProjectionResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    save_balance_items_to_writer(File::create(path)?, items)?;
    log::info!("Saved {} items to {}", items.len(), path.display());
    Ok(())
}

pub fn save_balance_items_to_writer<W: Write>(writer: W, items: &[BalanceItem]) -> ProjectionResult<()> {
    save_rows(writer, &BALANCE_HEADER, items)
}
