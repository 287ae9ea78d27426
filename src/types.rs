//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 複合品目名の列（カテゴリ-サブカテゴリ-書名-ISBN）
pub const MALZEME_ADI: &str = "malzemeAdi";
/// 登録番号の列
pub const SICIL_NO: &str = "sicilNo";
/// バーコードの列
pub const BAR_KOD: &str = "barKod";
/// 単価の列（`,`が小数点）
pub const BIRIM_FIYAT: &str = "birimFiyat";

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 空セル
    #[default]
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// 空文字列のテキストも空として扱います。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 値を文字列として取得
    ///
    /// 数値は最短の往復可能表現（`12.5`, `8690000000000`）になります。
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            // -0.0 は "-0" と表示されるため正規化する
            CellValue::Number(n) if *n == 0.0 => "0".to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// 入力シートの1行（列名 → セル値）
///
/// リーダーが行ごとに生成し、エンジンが1回だけ読み取ります。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    cells: BTreeMap<String, CellValue>,
}

impl InputRecord {
    /// 空のレコードを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 列の値を設定し、同名の列があれば以前の値を返す
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        self.cells.insert(column.into(), value.into())
    }

    /// 列の値を取得
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// 列の値を文字列として取得（列がなければ空文字列）
    pub fn text(&self, column: &str) -> String {
        self.cells.get(column).map(CellValue::to_text).unwrap_or_default()
    }

    /// 列名の一覧
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// すべてのセルが空かどうか
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_empty)
    }
}

impl<K, V> FromIterator<(K, V)> for InputRecord
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = InputRecord::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// 目録取り込みシートの1行（固定9列）
///
/// フィールドの宣言順がそのまま出力列の順序になります（JSON・CSVのキー順も同じ）。
/// 著者・出版社・出版年・刷は元データに対応する列がないため、常に空です。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "ISBN")]
    pub isbn: String,

    #[serde(rename = "Eser Adı")]
    pub title: String,

    #[serde(rename = "Yazar")]
    pub author: String,

    #[serde(rename = "Yayınevi")]
    pub publisher: String,

    #[serde(rename = "Yayın Yılı")]
    pub publication_year: String,

    #[serde(rename = "Baskı")]
    pub print_run: String,

    /// `sicilNo`
    #[serde(rename = "Demirbaş No")]
    pub registry_no: String,

    /// `barKod`
    #[serde(rename = "Barkod")]
    pub barcode: String,

    /// 小数点以下2桁に正規化した単価
    #[serde(rename = "Fiyat")]
    pub price: String,
}

impl OutputRecord {
    /// 出力列の見出し（この順で出力される）
    pub const HEADERS: [&'static str; 9] = [
        "ISBN",
        "Eser Adı",
        "Yazar",
        "Yayınevi",
        "Yayın Yılı",
        "Baskı",
        "Demirbaş No",
        "Barkod",
        "Fiyat",
    ];

    /// 見出しと同じ順序の値
    pub fn values(&self) -> [&str; 9] {
        [
            &self.isbn,
            &self.title,
            &self.author,
            &self.publisher,
            &self.publication_year,
            &self.print_run,
            &self.registry_no,
            &self.barcode,
            &self.price,
        ]
    }
}
