//! Security Module
//!
//! 入力の大きさに対する制限を実装するモジュール。
//! 巨大なファイルや行数の異常なシートでメモリを使い果たさないよう、
//! エンジンに渡す前に読み込み側で打ち切ります。

use std::io::Read;

use crate::error::ConversionError;

/// 入力ファイルの既定の最大サイズ（100MiB）
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 104_857_600;

/// 既定の最大データ行数（XLSXの最大行数からヘッダー行を除いた数）
pub(crate) const DEFAULT_MAX_ROWS: usize = 1_048_575;

/// セキュリティ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
    /// 最大データ行数（ヘッダー行を除く）
    pub max_rows: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_SIZE,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl SecurityConfig {
    /// 入力全体をメモリに読み込む
    ///
    /// 上限を1バイトでも超えた時点で読み込みを打ち切り、`SecurityViolation`を返します。
    pub fn read_limited<R: Read>(&self, input: R) -> Result<Vec<u8>, ConversionError> {
        let mut buffer = Vec::new();
        let bytes_read = input
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(ConversionError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }

    /// データ行数が上限以内かを検証する
    pub fn check_row_count(&self, rows: usize) -> Result<(), ConversionError> {
        if rows > self.max_rows {
            return Err(ConversionError::SecurityViolation(format!(
                "Row count exceeds maximum: {} rows (max: {} rows)",
                rows, self.max_rows
            )));
        }
        Ok(())
    }
}
