//! Budget allocations as `Category,Percentage` rows

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::budget::BudgetAllocation;
use crate::error::ProjectionResult;
use super::ensure_parent_dir;

#[derive(Debug, Serialize, Deserialize)]
struct AllocationRecord {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Percentage")]
    percentage: f64,
}

/// Load an allocation from a CSV file; `None` when the file is missing or has no rows
pub fn load_allocation<P: AsRef<Path>>(path: P) -> ProjectionResult<Option<BudgetAllocation>> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No allocation file at {}", path.display());
        return Ok(None);
    }
    let file = File::open(path)?;
    let allocation = load_allocation_from_reader(file)?;
    if let Some(allocation) = &allocation {
        log::info!("Loaded {} categories from {}", allocation.len(), path.display());
    }
    Ok(allocation)
}

/// Load an allocation from any CSV reader.
///
/// Rows breaking the allocation invariants fail with `AllocationInvalid`.
pub fn load_allocation_from_reader<R: Read>(reader: R) -> ProjectionResult<Option<BudgetAllocation>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records = rdr
        .deserialize::<AllocationRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    if records.is_empty() {
        return Ok(None);
    }

    let allocation = BudgetAllocation::new(records.into_iter().map(|r| (r.category, r.percentage)))
        .inspect_err(|e| log::warn!("Stored allocation rejected: {}", e))?;
    Ok(Some(allocation))
}

/// Replace the allocation file with `allocation`
pub fn save_allocation<P: AsRef<Path>>(path: P, allocation: &BudgetAllocation) -> ProjectionResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    save_allocation_to_writer(file, allocation)?;
    log::info!("Saved {} categories to {}", allocation.len(), path.display());
    Ok(())
}

/// Write an allocation as CSV, header included even when empty
pub fn save_allocation_to_writer<W: Write>(writer: W, allocation: &BudgetAllocation) -> ProjectionResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["Category", "Percentage"])?;
    for (category, percentage) in allocation.iter() {
        wtr.serialize(AllocationRecord {
            category: category.to_string(),
            percentage,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
