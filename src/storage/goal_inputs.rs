//! Goal-planner scalars as a single CSV row

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{ProjectionError, ProjectionResult};
use crate::planning::GoalInputs;
use super::ensure_parent_dir;

/// Load saved goal-planner inputs; `None` when nothing was saved
pub fn load_goal_inputs<P: AsRef<Path>>(path: P) -> ProjectionResult<Option<GoalInputs>> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No goal inputs at {}", path.display());
        return Ok(None);
    }
    load_goal_inputs_from_reader(File::open(path)?)
}

/// Load goal-planner inputs from any CSV reader; negative or non-finite amounts are rejected
pub fn load_goal_inputs_from_reader<R: Read>(reader: R) -> ProjectionResult<Option<GoalInputs>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = rdr.deserialize::<GoalInputs>();
    let inputs = rows.next().transpose()?;
    if rows.next().is_some() {
        return Err(ProjectionError::Storage(
            "goal inputs file holds more than one row".into(),
        ));
    }
    if let Some(inputs) = &inputs {
        inputs
            .validate()
            .inspect_err(|e| log::warn!("Stored goal inputs rejected: {}", e))?;
    }
    Ok(inputs)
}

pub fn save_goal_inputs<P: AsRef<Path>>(path: P, inputs: &GoalInputs) -> ProjectionResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    save_goal_inputs_to_writer(File::create(path)?, inputs)?;
    log::info!("Saved goal inputs to {}", path.display());
    Ok(())
}

pub fn save_goal_inputs_to_writer<W: Write>(writer: W, inputs: &GoalInputs) -> ProjectionResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.serialize(inputs)?;
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_memory() {
        let inputs = GoalInputs::from_annual_income(10_000.0, 1_000_000.0, 90_000.0);
        let mut buf = Vec::new();
        save_goal_inputs_to_writer(&mut buf, &inputs).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("initial_amount,desired_amount,annual_income,monthly_income\n"));

        let loaded = load_goal_inputs_from_reader(buf.as_slice()).unwrap();
        assert_eq!(loaded, Some(inputs));
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(load_goal_inputs_from_reader("".as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_negative_amounts_rejected_on_load() {
        let data = "initial_amount,desired_amount,annual_income,monthly_income
-10,1000000,60000,5000
";
        let err = load_goal_inputs_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { field: "initial_amount", .. }));

        let data = "initial_amount,desired_amount,annual_income,monthly_income
0,1000000,60000,NaN
";
        assert!(load_goal_inputs_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_extra_rows_rejected() {
        let data = "initial_amount,desired_amount,annual_income,monthly_income\n1,2,3,4\n5,6,7,8\n";
        assert!(load_goal_inputs_from_reader(data.as_bytes()).is_err());
    }
}
