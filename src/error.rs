//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// データセット全体に対する入力エラー
///
/// バッチ全体を中断させる唯一のエラー種別です。発生した場合、出力レコードは
/// 1件も生成されません。行単位の不正データ（ISBNが取れない、価格が数値で
/// ない等）はエラーではなく、既定値への劣化として扱われます。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 入力シートにデータ行が1件もない
    #[error("No data found in the input sheet")]
    EmptyDataset,

    /// 必須列が欠けている
    ///
    /// 欠けている列名を正規順（`malzemeAdi`, `sicilNo`, `barKod`, `birimFiyat`）で保持します。
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// varlik-katalogクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Parse`: スプレッドシートの解析エラー（calamine由来）
/// - `Csv`: CSVの読み書きエラー
/// - `Write`: XLSX出力エラー（rust_xlsxwriter由来）
/// - `Json`: JSON出力エラー
/// - `Config`: ビルダー設定の検証エラー
/// - `SecurityViolation`: 入力サイズ・行数の制限違反
/// - `Input`: データセットの検証エラー（空データ、必須列の欠落）
///
/// # 使用例
///
/// ```rust,no_run
/// use varlik_katalog::{ConversionError, ConverterBuilder, InputError};
/// use std::fs::File;
///
/// # fn main() -> Result<(), ConversionError> {
/// let converter = ConverterBuilder::new().build()?;
/// match converter.convert(File::open("fis.xlsx")?, File::create("katalog.xlsx")?) {
///     Err(ConversionError::Input(InputError::MissingColumns(cols))) => {
///         eprintln!("eksik sütunlar: {}", cols.join(", "));
///     }
///     other => {
///         other?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ConversionError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// CSVの読み込み・書き込み中に発生したエラー
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSXファイルの生成中に発生したエラー
    #[error("Failed to write XLSX output: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// JSONのシリアライズ中に発生したエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`、またはシート選択の解決時に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力サイズまたは行数の上限を超えたエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// データセットの検証エラー
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),
}
