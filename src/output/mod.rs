//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::api::OutputFormat;
use crate::error::ConversionError;
use crate::types::OutputRecord;
use std::io::Write;

pub use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（XLSX, CSV, JSON, Markdown）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub enum OutputFormatter {
    Xlsx,
    Csv,
    Json,
    Markdown,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => OutputFormatter::Xlsx,
            OutputFormat::Csv => OutputFormatter::Csv,
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Markdown => OutputFormatter::Markdown,
        }
    }

    /// 出力レコード列を指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `records` - 出力するレコード（見出し行は自動で付与されます）
    /// * `writer` - 出力先のライター
    /// * `sheet_name` - ワークシート名（XLSX形式でのみ使用）
    pub fn render<W: Write>(
        &self,
        records: &[OutputRecord],
        writer: &mut W,
        sheet_name: &str,
    ) -> Result<(), ConversionError> {
        match self {
            OutputFormatter::Xlsx => XlsxFormatter { sheet_name }.render(records, writer),
            OutputFormatter::Csv => CsvFormatter.render(records, writer),
            OutputFormatter::Json => JsonFormatter.render(records, writer),
            OutputFormatter::Markdown => MarkdownFormatter.render(records, writer),
        }
    }
}
