//! Flat CSV persistence for allocations, goal-planner inputs, transactions,
//! balance sheets and projection exports
//!
//! The engine never touches files; these helpers are the thin collaborator
//! that stores what the user entered and exports what the engine produced.

mod allocations;
mod goal_inputs;
mod export;
mod ledger;

use std::fs;
use std::path::Path;

use crate::error::ProjectionResult;

pub use allocations::{load_allocation, load_allocation_from_reader, save_allocation, save_allocation_to_writer};
pub use goal_inputs::{load_goal_inputs, load_goal_inputs_from_reader, save_goal_inputs, save_goal_inputs_to_writer};
pub use export::{write_timeline_csv, write_table_csv};
pub use ledger::{
    load_balance_items, load_balance_items_from_reader, load_transactions, load_transactions_from_reader,
    save_balance_items, save_balance_items_to_writer, save_transactions, save_transactions_to_writer,
};

/// Create the parent directory of `path` when missing
fn ensure_parent_dir(path: &Path) -> ProjectionResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
