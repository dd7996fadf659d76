use agri_analytics::analyzers::analyzer::analyze;
use agri_analytics::analyzers::types::{CropTableRow, Report, YearTableRow};
use agri_analytics::error::PipelineError;
use agri_analytics::ingest::{FileSource, fetch_or_empty, source_for};
use agri_analytics::parser::{RecordFormat, parse_records};

fn crop_row(crop: &str, avg_yield: &str, avg_area: &str) -> CropTableRow {
    CropTableRow {
        crop: crop.to_string(),
        avg_yield: avg_yield.to_string(),
        avg_area: avg_area.to_string(),
    }
}

fn assert_sample_report(report: &Report) {
    assert_eq!(report.record_count, 6);
    assert_eq!(
        report.tables.year_table,
        vec![
            YearTableRow {
                year: "1950".to_string(),
                max_crop: "Rice".to_string(),
                max_production: 20_580_000.0,
                min_crop: "Jowar".to_string(),
                min_production: 5_500_000.0,
            },
            YearTableRow {
                year: "1951".to_string(),
                max_crop: "Rice".to_string(),
                max_production: 21_300_000.0,
                min_crop: "Jowar".to_string(),
                min_production: 0.0,
            },
        ]
    );
    assert_eq!(
        report.tables.crop_table,
        vec![
            crop_row("Rice", "691.000", "30320000.000"),
            crop_row("Wheat", "658.000", "9610000.000"),
            crop_row("Jowar", "176.500", "15530000.000"),
        ]
    );
}

#[test]
fn test_full_pipeline_json() {
    let bytes = include_bytes!("fixtures/sample_crops.json");
    let raw = parse_records(bytes, RecordFormat::Json).expect("Failed to parse batch");
    let report = analyze(&raw).expect("Failed to analyze batch");

    assert_sample_report(&report);
}

#[test]
fn test_full_pipeline_csv() {
    let bytes = include_bytes!("fixtures/sample_crops.csv");
    let raw = parse_records(bytes, RecordFormat::Csv).expect("Failed to parse batch");
    let report = analyze(&raw).expect("Failed to analyze batch");

    assert_sample_report(&report);
}

#[tokio::test]
async fn test_file_source_pipeline() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_crops.csv");
    let raw = fetch_or_empty(source_for(path, None).as_ref()).await;
    let report = analyze(&raw).unwrap();

    assert_sample_report(&report);
}

#[tokio::test]
async fn test_failed_ingestion_yields_empty_report() {
    let source = FileSource::new("/nonexistent/agri_analytics/data.json", RecordFormat::Json);
    let raw = fetch_or_empty(&source).await;
    let report = analyze(&raw).unwrap();

    assert_eq!(report.record_count, 0);
    assert!(report.tables.year_table.is_empty());
    assert!(report.tables.crop_table.is_empty());
}

#[test]
fn test_spec_scenario_rice_wheat() {
    let bytes = br#"[
        {"Crop Name": "Rice", "Year": "1950-51", "Crop Production (UOM:t(Tonnes))": "10"},
        {"Crop Name": "Rice", "Year": "1950-51", "Crop Production (UOM:t(Tonnes))": "5"},
        {"Crop Name": "Wheat", "Year": "1950-51", "Crop Production (UOM:t(Tonnes))": "20"}
    ]"#;
    let raw = parse_records(bytes, RecordFormat::Json).unwrap();
    let report = analyze(&raw).unwrap();

    assert_eq!(
        report.tables.year_table,
        vec![YearTableRow {
            year: "1950".to_string(),
            max_crop: "Wheat".to_string(),
            max_production: 20.0,
            min_crop: "Rice".to_string(),
            min_production: 5.0,
        }]
    );
    assert_eq!(
        report.tables.crop_table,
        vec![
            crop_row("Rice", "0.000", "0.000"),
            crop_row("Wheat", "0.000", "0.000"),
        ]
    );
}

#[test]
fn test_invalid_year_fails_whole_batch() {
    let bytes = br#"[
        {"Crop Name": "Rice", "Year": "1950-51", "Crop Production (UOM:t(Tonnes))": "abc"},
        {"Crop Name": "Wheat", "Year": "invalid", "Crop Production (UOM:t(Tonnes))": "20"}
    ]"#;
    let raw = parse_records(bytes, RecordFormat::Json).unwrap();

    match analyze(&raw) {
        Err(PipelineError::MalformedYear { index, value }) => {
            assert_eq!(index, 1);
            assert_eq!(value, "invalid");
        }
        Ok(_) => panic!("malformed year must not produce a report"),
    }
}
