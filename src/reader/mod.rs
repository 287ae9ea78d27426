//! Reader Module
//!
//! 入力ファイル（スプレッドシートまたはCSV）を入力レコード列に変換する。
//! 読み込んだ内容の検証はエンジン側で行い、ここでは形の変換のみを担当します。

mod delimited;
mod workbook;

use tracing::info;

use crate::api::InputFormat;
use crate::builder::ConversionConfig;
use crate::error::ConversionError;
use crate::types::{CellValue, InputRecord};
use workbook::WorkbookReader;

/// ZIPシグネチャ（XLSX, XLSB, ODS）
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE複合ドキュメントのシグネチャ（XLS）
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// 実際に使用する読み込み方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Spreadsheet,
    Csv,
}

fn resolve_source(format: InputFormat, bytes: &[u8]) -> SourceKind {
    match format {
        InputFormat::Spreadsheet => SourceKind::Spreadsheet,
        InputFormat::Csv => SourceKind::Csv,
        InputFormat::Auto if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) => {
            SourceKind::Spreadsheet
        }
        InputFormat::Auto => SourceKind::Csv,
    }
}

/// 入力バイト列を設定に従って入力レコード列に変換する
pub(crate) fn read_dataset(
    bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<Vec<InputRecord>, ConversionError> {
    let records = match resolve_source(config.input_format, &bytes) {
        SourceKind::Spreadsheet => {
            let mut reader = WorkbookReader::open(bytes)?;
            let sheet = reader.select_sheet(&config.sheet_selector)?;
            info!(sheet = %sheet, "reading worksheet");
            reader.read_records(&sheet, &config.security)?
        }
        SourceKind::Csv => {
            info!(delimiter = %config.csv_delimiter, "reading CSV input");
            // build() で ASCII であることを検証済み
            delimited::read_csv(&bytes, config.csv_delimiter as u8, &config.security)?
        }
    };

    info!(rows = records.len(), "read input records");
    Ok(records)
}

/// 見出しと値の列から入力レコードを組み立てる
///
/// 見出しが`None`の列は読み飛ばし、値が足りない列は空セルにします。
pub(crate) fn assemble_record<I>(headers: &[Option<String>], values: I) -> InputRecord
where
    I: IntoIterator<Item = CellValue>,
{
    let mut values = values.into_iter();
    let mut record = InputRecord::new();

    for header in headers {
        let value = values.next().unwrap_or_default();
        if let Some(header) = header {
            record.insert(header.clone(), value);
        }
    }

    record
}
