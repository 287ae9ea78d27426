//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{InputFormat, OutputFormat, ParsePolicy, SheetSelector};
use crate::engine::{BatchDriver, BatchOutput, BatchSummary};
use crate::error::ConversionError;
use crate::output::OutputFormatter;
use crate::security::SecurityConfig;
use crate::types::{InputRecord, OutputRecord};
use std::io::{BufWriter, Read, Write};
use tracing::info;

/// ワークシート名の最大文字数（Excelの制限）
const MAX_SHEET_NAME_CHARS: usize = 31;

/// ワークシート名に使用できない文字
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 入力シート選択方式
    pub sheet_selector: SheetSelector,

    /// 資材名の分解方式
    pub parse_policy: ParsePolicy,

    /// 入力形式
    pub input_format: InputFormat,

    /// CSV入力の区切り文字
    pub csv_delimiter: char,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// 出力ワークシート名
    pub output_sheet_name: String,

    /// 入力サイズの制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            parse_policy: ParsePolicy::ContentValidated,
            input_format: InputFormat::Auto,
            csv_delimiter: ',',
            output_format: OutputFormat::Xlsx,
            output_sheet_name: "Sheet1".to_string(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use varlik_katalog::{ConverterBuilder, OutputFormat, ParsePolicy};
///
/// # fn main() -> Result<(), varlik_katalog::ConversionError> {
/// let converter = ConverterBuilder::new()
///     .with_parse_policy(ParsePolicy::Positional)
///     .with_output_format(OutputFormat::Csv)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 分解方式: 内容検証（末尾がISBNかどうかで判定）
    /// - 入力形式: 自動判定
    /// - CSV区切り文字: `,`
    /// - 出力フォーマット: XLSX（シート名`Sheet1`）
    /// - 入力サイズ上限: 100MiB / 1,048,575行
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    ///
    /// ```rust,no_run
    /// use varlik_katalog::{ConverterBuilder, SheetSelector};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Fiş".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// `malzemeAdi`からISBNと書名を取り出す方式を指定する
    pub fn with_parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.config.parse_policy = policy;
        self
    }

    /// 入力形式を指定する
    ///
    /// `InputFormat::Auto`の場合、先頭のシグネチャでスプレッドシートとCSVを判別します。
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.config.input_format = format;
        self
    }

    /// CSV入力の区切り文字を指定する
    ///
    /// # 制約
    ///
    /// * ASCII文字でなければならない
    /// * `"`、`\r`、`\n`は指定できない
    /// * 制約違反の場合、`build()`時に`ConversionError::Config`を返す
    pub fn with_csv_delimiter(mut self, delimiter: char) -> Self {
        self.config.csv_delimiter = delimiter;
        self
    }

    /// 出力フォーマットを指定する
    ///
    /// ```rust,no_run
    /// use varlik_katalog::{ConverterBuilder, OutputFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// XLSX出力のワークシート名を指定する
    pub fn with_output_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_sheet_name = name.into();
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 最大データ行数（ヘッダー行を除く）を指定する
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.config.security.max_rows = rows;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ConversionError::Config(String)`: 設定の検証に失敗した場合
    ///   * ワークシート名が空、31文字超、または使用できない文字を含む
    ///   * CSV区切り文字が不正
    ///   * サイズ上限・行数上限が0
    pub fn build(self) -> Result<Converter, ConversionError> {
        // 1. ワークシート名の検証
        let name = &self.config.output_sheet_name;
        if name.is_empty() {
            return Err(ConversionError::Config(
                "Output sheet name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_CHARS {
            return Err(ConversionError::Config(format!(
                "Output sheet name '{}' exceeds {} characters",
                name, MAX_SHEET_NAME_CHARS
            )));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
            return Err(ConversionError::Config(format!(
                "Output sheet name '{}' contains invalid character '{}'",
                name, c
            )));
        }

        // 2. 区切り文字の検証
        let delimiter = self.config.csv_delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\r' | '\n') {
            return Err(ConversionError::Config(format!(
                "Invalid CSV delimiter: {:?}",
                delimiter
            )));
        }

        // 3. 上限値の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(ConversionError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }
        if self.config.security.max_rows == 0 {
            return Err(ConversionError::Config(
                "Maximum row count must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// 読み込み・変換・書き出しの各段階を個別にも、まとめても実行できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use varlik_katalog::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), varlik_katalog::ConversionError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("varlik_islem_fisi.xlsx")?;
/// let output = File::create("katalog.xlsx")?;
/// let summary = converter.convert(input, output)?;
/// println!("{} records", summary.records);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// 入力を読み込み、入力レコード列に変換する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<InputRecord>)` - ヘッダー行を除くデータ行（空行は除外）
    /// * `Err(ConversionError::SecurityViolation)` - サイズまたは行数の上限を超えた場合
    /// * `Err(ConversionError::Parse | Csv)` - 入力を解析できない場合
    pub fn read_records<R: Read>(&self, input: R) -> Result<Vec<InputRecord>, ConversionError> {
        let bytes = self.config.security.read_limited(input)?;
        crate::reader::read_dataset(bytes, &self.config)
    }

    /// 入力レコード列を出力レコード列に変換する
    pub fn transform(&self, records: &[InputRecord]) -> Result<BatchOutput, ConversionError> {
        let output = BatchDriver::new(self.config.parse_policy).run(records)?;

        let summary = &output.summary;
        info!(
            records = summary.records,
            with_isbn = summary.with_isbn,
            without_title = summary.without_title,
            price_defaulted = summary.price_defaulted,
            "transformed records"
        );

        Ok(output)
    }

    /// 出力レコード列を設定されたフォーマットで書き出す
    pub fn write_records<W: Write>(
        &self,
        records: &[OutputRecord],
        output: W,
    ) -> Result<(), ConversionError> {
        let formatter = OutputFormatter::from_format(self.config.output_format);
        let mut writer = BufWriter::new(output);
        formatter.render(records, &mut writer, &self.config.output_sheet_name)?;
        writer.flush()?;
        Ok(())
    }

    /// 読み込みから書き出しまでを一括で実行する
    ///
    /// 検証に失敗した場合、出力には何も書き込まれません。
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<BatchSummary, ConversionError> {
        let records = self.read_records(input)?;
        let batch = self.transform(&records)?;
        self.write_records(&batch.records, output)?;
        Ok(batch.summary)
    }

    /// 変換結果をバイト列として返す
    pub fn convert_to_vec<R: Read>(&self, input: R) -> Result<Vec<u8>, ConversionError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;
        Ok(buffer)
    }

    /// 先頭`limit`件をMarkdownの表として返す
    ///
    /// 出力フォーマットの設定にかかわらず、常にMarkdownで描画します。
    pub fn preview(&self, records: &[OutputRecord], limit: usize) -> Result<String, ConversionError> {
        let shown = &records[..records.len().min(limit)];

        let mut buffer = Vec::new();
        OutputFormatter::Markdown.render(shown, &mut buffer, &self.config.output_sheet_name)?;

        String::from_utf8(buffer).map_err(|e| {
            ConversionError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
