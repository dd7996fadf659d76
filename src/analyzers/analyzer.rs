use crate::analyzers::aggregate::aggregate;
use crate::analyzers::types::Report;
use crate::error::PipelineError;
use crate::normalize::normalize;
use crate::record::RawRecord;
use chrono::Utc;
use tracing::info;

/// Runs normalize then aggregate over one raw batch.
///
/// Synchronous and free of I/O; the caller owns acquisition and presentation.
///
/// # Errors
///
/// Propagates [`PipelineError::MalformedYear`]; a single bad year aborts the
/// whole batch.
pub fn analyze(raw: &[RawRecord]) -> Result<Report, PipelineError> {
    let records = normalize(raw)?;
    let tables = aggregate(&records);

    info!(
        records = records.len(),
        years = tables.year_table.len(),
        crops = tables.crop_table.len(),
        "Aggregation complete"
    );

    Ok(Report {
        generated_at: Utc::now(),
        record_count: records.len(),
        tables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn test_analyze_empty_batch() {
        let report = analyze(&[]).unwrap();
        assert_eq!(report.record_count, 0);
        assert!(report.tables.is_empty());
    }

    #[test]
    fn test_analyze_rejects_malformed_year() {
        let batch = vec![
            RawRecord::new()
                .with(record::CROP_NAME, "Rice")
                .with(record::YEAR, "invalid")
                .with(record::PRODUCTION, "oops"),
        ];
        assert!(matches!(
            analyze(&batch),
            Err(PipelineError::MalformedYear { index: 0, .. })
        ));
    }

    #[test]
    fn test_analyze_counts_records() {
        let batch = vec![
            RawRecord::new()
                .with(record::CROP_NAME, "Rice")
                .with(record::YEAR, "2001-02")
                .with(record::AREA, "12.5"),
            RawRecord::new()
                .with(record::CROP_NAME, "Rice")
                .with(record::YEAR, "2002-03")
                .with(record::AREA, "7.5"),
        ];
        let report = analyze(&batch).unwrap();

        assert_eq!(report.record_count, 2);
        assert_eq!(report.tables.year_table.len(), 2);
        assert_eq!(report.tables.crop_table[0].avg_area, "10.000");
    }
}
