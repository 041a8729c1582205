//! CSV exports of engine output

use std::io::Write;

use crate::error::ProjectionResult;
use crate::planning::ProjectionTable;
use crate::projection::ProjectionSeries;

/// One row per simulated month
pub fn write_timeline_csv<W: Write>(writer: W, series: &ProjectionSeries) -> ProjectionResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in series {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per contribution, one column per horizon
pub fn write_table_csv<W: Write>(writer: W, table: &ProjectionTable) -> ProjectionResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["monthly_contribution".to_string()];
    header.extend(table.years.iter().map(|y| format!("{} years", y)));
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = vec![format!("{:.2}", row.monthly_contribution)];
        record.extend(row.values.iter().map(|v| format!("{:.2}", v)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::{build_projection_table, YearRangeSet};
    use crate::projection::ProjectionEngine;

    #[test]
    fn test_timeline_csv() {
        let engine = ProjectionEngine::default();
        let series = engine.simulate_timeline(1000.0, 100.0, 1, 0.0).unwrap();
        let mut buf = Vec::new();
        write_timeline_csv(&mut buf, &series).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "month,total_invested,total_amount,total_returns,monthly_return");
        assert_eq!(lines.len(), 14);
        assert!(lines[13].starts_with("12,2200.0,2200.0,0.0,0.0"));
    }

    #[test]
    fn test_table_csv() {
        let engine = ProjectionEngine::default();
        let years = YearRangeSet::new(vec![1, 2]).unwrap();
        let table = build_projection_table(&engine, 0.0, &[100.0], &years, 0.0).unwrap();
        let mut buf = Vec::new();
        write_table_csv(&mut buf, &table).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "monthly_contribution,1 years,2 years\n100.00,1200.00,2400.00\n");
    }
}
