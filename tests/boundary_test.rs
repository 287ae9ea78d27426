//! Boundary Tests for varlik-katalog
//!
//! Empty and degenerate inputs, resource limits and corrupted files.

use rust_xlsxwriter::*;
use std::io::Cursor;
use varlik_katalog::{
    ConversionError, ConverterBuilder, InputError, InputFormat, OutputFormat, OutputRecord,
};

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    const HEADERS: [&str; 4] = ["malzemeAdi", "sicilNo", "barKod", "birimFiyat"];

    fn write_headers(worksheet: &mut Worksheet) -> Result<(), XlsxError> {
        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }
        Ok(())
    }

    /// Generate a workbook with an empty sheet (no cells)
    pub fn generate_empty_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("EmptySheet")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet with the header row only
    pub fn generate_header_only() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_headers(worksheet)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet whose data rows are separated by blank rows
    pub fn generate_blank_rows() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_headers(worksheet)?;
        worksheet.write_string(1, 0, "A-B-İlk-9786050837933")?;
        worksheet.write_string(1, 1, "D-1")?;
        // rows 2-4 left blank
        worksheet.write_string(5, 0, "A-B-Son-9786050837940")?;
        worksheet.write_string(5, 1, "D-2")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate `rows` identical data rows
    pub fn generate_rows(rows: u32) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_headers(worksheet)?;
        for row in 1..=rows {
            worksheet.write_string(row, 0, "KİTAP-Roman-Başlık-9786050837933")?;
            worksheet.write_string(row, 1, &format!("D-{}", row))?;
            worksheet.write_number(row, 3, 10.0)?;
        }
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate `rows` data rows with a blank row after every fifth one
    pub fn generate_rows_with_gaps(rows: u32) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_headers(worksheet)?;
        let mut sheet_row = 1;
        for row in 1..=rows {
            worksheet.write_string(sheet_row, 0, "KİTAP-Roman-Başlık-9786050837933")?;
            worksheet.write_string(sheet_row, 1, &format!("D-{}", row))?;
            sheet_row += if row % 5 == 0 { 2 } else { 1 };
        }
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a cell with very long content (32,767 characters)
    pub fn generate_long_cell() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_headers(worksheet)?;
        let long_title = "Ç".repeat(32_767 - 14);
        worksheet.write_string(1, 0, &format!("{}-9786050837933", long_title))?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a header row with a gap and data under the gap
    pub fn generate_header_gap() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "malzemeAdi")?;
        worksheet.write_string(0, 1, "sicilNo")?;
        // C1 is empty
        worksheet.write_string(0, 3, "barKod")?;
        worksheet.write_string(0, 4, "birimFiyat")?;

        worksheet.write_string(1, 0, "A-Başlık")?;
        worksheet.write_string(1, 1, "D-1")?;
        worksheet.write_string(1, 2, "orphan")?;
        worksheet.write_string(1, 3, "B-1")?;
        worksheet.write_string(1, 4, "5")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a corrupted file (ZIP signature followed by garbage)
    pub fn generate_corrupted_file() -> Vec<u8> {
        let mut data = b"PK\x03\x04".to_vec();
        data.extend_from_slice(&[0xFF; 64]);
        data
    }
}

#[test]
fn test_empty_sheet() {
    let input = fixtures::generate_empty_sheet().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let mut output = Vec::new();
    let result = converter.convert(Cursor::new(input), &mut output);

    assert!(matches!(
        result,
        Err(ConversionError::Input(InputError::EmptyDataset))
    ));
    assert!(output.is_empty());
}

#[test]
fn test_header_only_sheet() {
    let input = fixtures::generate_header_only().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let records = converter.read_records(Cursor::new(input)).unwrap();
    assert!(records.is_empty());

    match converter.transform(&records) {
        Err(ConversionError::Input(InputError::EmptyDataset)) => {}
        other => panic!("Expected EmptyDataset, got {:?}", other),
    }
}

#[test]
fn test_empty_csv_input() {
    let converter = ConverterBuilder::new()
        .with_input_format(InputFormat::Csv)
        .build()
        .unwrap();

    let result = converter.convert_to_vec(Cursor::new(Vec::<u8>::new()));
    assert!(matches!(
        result,
        Err(ConversionError::Input(InputError::EmptyDataset))
    ));
}

#[test]
fn test_blank_rows_are_skipped() {
    let input = fixtures::generate_blank_rows().unwrap();
    let converter = ConverterBuilder::new()
        .with_output_format(OutputFormat::Json)
        .build()
        .unwrap();

    let output = converter.convert_to_vec(Cursor::new(input)).unwrap();
    let records: Vec<OutputRecord> = serde_json::from_slice(&output).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "İlk");
    assert_eq!(records[1].title, "Son");
    // Empty barKod and birimFiyat cells fall back to defaults
    assert_eq!(records[1].barcode, "");
    assert_eq!(records[1].price, "0.00");
}

#[test]
fn test_row_limit() {
    let input = fixtures::generate_rows(20).unwrap();

    let converter = ConverterBuilder::new().with_max_rows(20).build().unwrap();
    let records = converter.read_records(Cursor::new(input.clone())).unwrap();
    assert_eq!(records.len(), 20);

    let converter = ConverterBuilder::new().with_max_rows(19).build().unwrap();
    match converter.read_records(Cursor::new(input)) {
        Err(ConversionError::SecurityViolation(msg)) => assert!(msg.contains("19")),
        other => panic!("Expected SecurityViolation, got {:?}", other),
    }
}

#[test]
fn test_row_limit_counts_only_data_rows() {
    // 20 data rows spread over 23 sheet rows
    let input = fixtures::generate_rows_with_gaps(20).unwrap();
    let converter = ConverterBuilder::new().with_max_rows(20).build().unwrap();

    let records = converter.read_records(Cursor::new(input)).unwrap();
    assert_eq!(records.len(), 20);

    // The same rows as CSV, blank lines included, are accepted as well
    let mut csv_input = String::from("malzemeAdi,sicilNo,barKod,birimFiyat\n");
    for row in 1..=20 {
        csv_input.push_str(&format!("KİTAP-Roman-Başlık-9786050837933,D-{},,\n", row));
        if row % 5 == 0 {
            csv_input.push_str(",,,\n");
        }
    }
    let csv_converter = ConverterBuilder::new()
        .with_input_format(InputFormat::Csv)
        .with_max_rows(20)
        .build()
        .unwrap();
    let csv_records = csv_converter.read_records(Cursor::new(csv_input)).unwrap();
    assert_eq!(csv_records.len(), records.len());

    let converter = ConverterBuilder::new().with_max_rows(19).build().unwrap();
    let input = fixtures::generate_rows_with_gaps(20).unwrap();
    assert!(matches!(
        converter.read_records(Cursor::new(input)),
        Err(ConversionError::SecurityViolation(_))
    ));
}

#[test]
fn test_input_size_limit() {
    let input = fixtures::generate_rows(5).unwrap();
    let size = input.len() as u64;

    let converter = ConverterBuilder::new().with_max_input_size(size).build().unwrap();
    assert!(converter.read_records(Cursor::new(input.clone())).is_ok());

    let converter = ConverterBuilder::new()
        .with_max_input_size(size - 1)
        .build()
        .unwrap();
    assert!(matches!(
        converter.read_records(Cursor::new(input)),
        Err(ConversionError::SecurityViolation(_))
    ));
}

#[test]
fn test_many_rows_preserve_order() {
    let input = fixtures::generate_rows(500).unwrap();
    let converter = ConverterBuilder::new()
        .with_output_format(OutputFormat::Csv)
        .build()
        .unwrap();

    let output = converter.convert_to_vec(Cursor::new(input)).unwrap();
    let mut reader = csv::Reader::from_reader(output.as_slice());
    let registry: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[6].to_string())
        .collect();

    assert_eq!(registry.len(), 500);
    for (idx, value) in registry.iter().enumerate() {
        assert_eq!(value, &format!("D-{}", idx + 1));
    }
}

#[test]
fn test_very_long_cell_content() {
    let input = fixtures::generate_long_cell().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let records = converter.read_records(Cursor::new(input)).unwrap();
    let batch = converter.transform(&records).unwrap();

    // Without another '-' the ISBN branch has no title part
    assert_eq!(batch.records[0].isbn, "9786050837933");
    assert_eq!(batch.records[0].title, "");
    assert_eq!(batch.summary.without_title, 1);
}

#[test]
fn test_blank_header_column_is_ignored() {
    let input = fixtures::generate_header_gap().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let records = converter.read_records(Cursor::new(input)).unwrap();
    let columns: Vec<&str> = records[0].columns().collect();
    assert_eq!(columns.len(), 4);
    assert!(!columns.contains(&""));

    let batch = converter.transform(&records).unwrap();
    assert_eq!(batch.records[0].title, "Başlık");
    assert_eq!(batch.records[0].barcode, "B-1");
    assert_eq!(batch.records[0].price, "5.00");
}

#[test]
fn test_corrupted_file() {
    let input = fixtures::generate_corrupted_file();
    let converter = ConverterBuilder::new().build().unwrap();

    let result = converter.convert_to_vec(Cursor::new(input));
    assert!(matches!(result, Err(ConversionError::Parse(_))));
}

#[test]
fn test_unrecognized_bytes_fall_back_to_csv() {
    // Without a spreadsheet signature the input is read as CSV
    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_to_vec(Cursor::new("just some text\n"));

    assert!(matches!(
        result,
        Err(ConversionError::Input(InputError::EmptyDataset))
    ));
}
