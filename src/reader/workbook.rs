//! Workbook Reader
//!
//! calamineを使用して、ワークシートの1行目を見出しとする入力レコード列を抽出する。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDateTime, Timelike};
use std::io::Cursor;
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::error::ConversionError;
use crate::reader::assemble_record;
use crate::security::SecurityConfig;
use crate::types::{CellValue, InputRecord};

/// ワークブックリーダー
///
/// calamineのラッパーとして、XLSX/XLS/XLSB/ODSを同じ方法で扱います。
pub(crate) struct WorkbookReader {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookReader {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - 読み込みに成功した場合
    /// * `Err(ConversionError::Parse)` - calamineが形式を判定できない、または破損している場合
    pub fn open(bytes: Vec<u8>) -> Result<Self, ConversionError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシートを1枚選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(ConversionError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ConversionError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::First => all_sheet_names
                .into_iter()
                .next()
                .ok_or_else(|| ConversionError::Config("Workbook has no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = all_sheet_names.len();
                all_sheet_names.into_iter().nth(*index).ok_or_else(|| {
                    ConversionError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(ConversionError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートを読み込み、入力レコード列に変換する
    pub fn read_records(
        &mut self,
        sheet_name: &str,
        security: &SecurityConfig,
    ) -> Result<Vec<InputRecord>, ConversionError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        records_from_range(&range, security)
    }
}

/// セル範囲の1行目を見出し、以降の行をデータとして入力レコード列を作る
///
/// - 空の見出しセルの列は読み飛ばします
/// - 行の途中で終わっている場合、残りの列は空セルになります
/// - すべてのセルが空の行は読み飛ばします
/// - 同じ見出しが複数ある場合は右側の列が優先されます
pub(crate) fn records_from_range(
    range: &Range<Data>,
    security: &SecurityConfig,
) -> Result<Vec<InputRecord>, ConversionError> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!("worksheet is empty");
        return Ok(Vec::new());
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| Some(cell_value(cell).to_text()).filter(|h| !h.is_empty()))
        .collect();

    let mut records = Vec::new();
    let mut orphan_cells = 0usize;

    for row in rows {
        orphan_cells += row
            .iter()
            .enumerate()
            .filter(|(idx, cell)| headers.get(*idx).map_or(true, Option::is_none) && !is_blank(cell))
            .count();

        let values = row.iter().map(cell_value);
        let record = assemble_record(&headers, values);
        if record.is_blank() {
            continue;
        }
        records.push(record);
        security.check_row_count(records.len())?;
    }

    if orphan_cells > 0 {
        warn!(cells = orphan_cells, "ignored cells in columns without a header");
    }

    Ok(records)
}

fn is_blank(cell: &Data) -> bool {
    cell_value(cell).is_empty()
}

/// calamineのセル値を変換する
///
/// 日付セルは`YYYY-MM-DD`（時刻を含む場合は`YYYY-MM-DD HH:MM:SS`）の文字列、
/// エラーセルはエラー表記（`#N/A`など）の文字列になります。
pub(crate) fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Text(format_datetime(&datetime)),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

fn format_datetime(datetime: &NaiveDateTime) -> String {
    if datetime.hour() == 0 && datetime.minute() == 0 && datetime.second() == 0 {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
