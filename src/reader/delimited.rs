//! CSV Reader
//!
//! 1行目を見出しとするCSVを入力レコード列に変換する。すべての値は文字列として扱う。

use crate::error::ConversionError;
use crate::reader::assemble_record;
use crate::security::SecurityConfig;
use crate::types::{CellValue, InputRecord};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// CSVを読み込む
///
/// 列数が行ごとに異なっていても受け付けます（足りない列は空セル）。
pub(crate) fn read_csv(
    bytes: &[u8],
    delimiter: u8,
    security: &SecurityConfig,
) -> Result<Vec<InputRecord>, ConversionError> {
    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<Option<String>> = reader
        .headers()?
        .iter()
        .map(|h| Some(h.to_string()).filter(|h| !h.is_empty()))
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let values = row.iter().map(|field| {
            if field.is_empty() {
                CellValue::Empty
            } else {
                CellValue::from(field)
            }
        });

        let record = assemble_record(&headers, values);
        if record.is_blank() {
            continue;
        }
        records.push(record);
        security.check_row_count(records.len())?;
    }

    Ok(records)
}
