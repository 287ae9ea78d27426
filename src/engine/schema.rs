//! Schema Validator
//!
//! データセット全体に対する前提条件（空でないこと、必須列がそろっていること）を検証する。

use crate::error::InputError;
use crate::types::{InputRecord, BAR_KOD, BIRIM_FIYAT, MALZEME_ADI, SICIL_NO};

/// 必須列（正規順）
pub const REQUIRED_COLUMNS: [&str; 4] = [MALZEME_ADI, SICIL_NO, BAR_KOD, BIRIM_FIYAT];

/// 列検証の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// 欠けている列（`REQUIRED_COLUMNS`の順）
    MissingColumns(Vec<String>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

/// 列名の集合に必須列がすべて含まれているかを検証する
///
/// # 使用例
///
/// ```rust
/// use varlik_katalog::{validate, Validation};
///
/// let result = validate(["malzemeAdi", "sicilNo", "barKod"]);
/// assert_eq!(result, Validation::MissingColumns(vec!["birimFiyat".to_string()]));
/// ```
pub fn validate<I, S>(columns: I) -> Validation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<S> = columns.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.iter().any(|c| c.as_ref() == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Validation::Valid
    } else {
        Validation::MissingColumns(missing)
    }
}

/// データセット全体の前提条件を検証する
///
/// 空チェックを列チェックより先に行います。列は先頭レコードから取得し、
/// 以降の行には触れません。
pub fn check_dataset(records: &[InputRecord]) -> Result<(), InputError> {
    let first = records.first().ok_or(InputError::EmptyDataset)?;

    match validate(first.columns()) {
        Validation::Valid => Ok(()),
        Validation::MissingColumns(missing) => Err(InputError::MissingColumns(missing)),
    }
}
