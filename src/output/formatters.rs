//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

use crate::error::ConversionError;
use crate::types::OutputRecord;

/// XLSX形式のフォーマッター
pub struct XlsxFormatter<'a> {
    pub sheet_name: &'a str,
}

impl XlsxFormatter<'_> {
    pub fn render<W: Write>(
        &self,
        records: &[OutputRecord],
        writer: &mut W,
    ) -> Result<(), ConversionError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name)?;

        let header_format = Format::new().set_bold();
        for (col, header) in OutputRecord::HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        // ISBNやバーコードを数値に変換させないため、すべて文字列として書き込む
        for (row_idx, record) in records.iter().enumerate() {
            let row = row_idx as u32 + 1;
            for (col, value) in record.values().iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row, col as u16, *value)?;
                }
            }
        }

        worksheet.autofit();

        let buffer = workbook.save_to_buffer()?;
        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }
}

/// CSV形式のフォーマッター
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[OutputRecord],
        writer: &mut W,
    ) -> Result<(), ConversionError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(OutputRecord::HEADERS)?;
        for record in records {
            csv_writer.write_record(record.values())?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// JSON形式のフォーマッター
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[OutputRecord],
        writer: &mut W,
    ) -> Result<(), ConversionError> {
        serde_json::to_writer_pretty(&mut *writer, records)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Markdown形式のフォーマッター（プレビュー用）
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(
        &self,
        records: &[OutputRecord],
        writer: &mut W,
    ) -> Result<(), ConversionError> {
        let header: Vec<String> = OutputRecord::HEADERS.iter().map(|h| escape_markdown(h)).collect();
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| record.values().iter().map(|v| escape_markdown(v)).collect())
            .collect();

        // 1. 列幅の計算
        let col_widths = column_widths(&header, &rows);

        // 2. 見出し行と区切り行
        write_row(writer, &header, &col_widths)?;
        writeln!(writer, "{}", separator(&col_widths))?;

        // 3. データ行
        for row in &rows {
            write_row(writer, row, &col_widths)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// 1行を出力する
///
/// 全角文字を含むセルも揃うよう、表示幅に基づいて空白で埋めます。
fn write_row<W: Write>(
    writer: &mut W,
    cells: &[String],
    col_widths: &[usize],
) -> Result<(), ConversionError> {
    write!(writer, "|")?;
    for (cell, &width) in cells.iter().zip(col_widths) {
        let padding = width.saturating_sub(cell.width());
        write!(writer, " {}{} |", cell, " ".repeat(padding))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// 列ごとの最大表示幅（最小3文字）
fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width().max(3)).collect();
    for row in rows {
        for (col_idx, cell) in row.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(cell.width());
        }
    }
    widths
}

/// 見出しの区切り行を生成
fn separator(col_widths: &[usize]) -> String {
    let mut line = String::from("|");
    for &width in col_widths {
        // セルの前後のスペース（各1文字）+ セル幅分のハイフン
        line.push_str(&"-".repeat(width + 2));
        line.push('|');
    }
    line
}

/// Markdownテーブル内で意味を持つ文字をエスケープ
fn escape_markdown(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', "<br>")
}
