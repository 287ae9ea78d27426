//! Batch Driver
//!
//! データセット1件分の変換を、検証 → 写像 → 集約の順に1回で実行する。

use tracing::debug;

use crate::api::ParsePolicy;
use crate::engine::mapper::map_record;
use crate::engine::price::parse_price;
use crate::engine::schema::check_dataset;
use crate::error::InputError;
use crate::types::{InputRecord, OutputRecord, BIRIM_FIYAT};

/// バッチ処理の状態
///
/// `Idle → Validating → {Failed | Mapping} → Done`の順にのみ遷移します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Validating,
    Mapping,
    /// 完了（出力レコード数）
    Done(usize),
    /// データセットの検証に失敗した
    Failed(InputError),
}

impl BatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchState::Done(_) | BatchState::Failed(_))
    }
}

/// 変換結果の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// 出力レコード数（入力レコード数と常に等しい）
    pub records: usize,
    /// ISBNが取り出せたレコード数
    pub with_isbn: usize,
    /// 書名が空になったレコード数
    pub without_title: usize,
    /// 単価が解析できず`0.00`になったレコード数
    pub price_defaulted: usize,
}

/// 変換結果（出力レコードと集計）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutput {
    pub records: Vec<OutputRecord>,
    pub summary: BatchSummary,
}

/// バッチ変換の状態機械
///
/// 呼び出しごとに新しいインスタンスを作成します。状態は呼び出し間で共有されません。
///
/// # 使用例
///
/// ```rust
/// use varlik_katalog::{BatchDriver, BatchState, InputError, ParsePolicy};
///
/// let mut driver = BatchDriver::new(ParsePolicy::default());
/// assert_eq!(driver.state(), &BatchState::Idle);
///
/// let result = driver.run(&[]);
/// assert_eq!(result, Err(InputError::EmptyDataset));
/// assert_eq!(driver.state(), &BatchState::Failed(InputError::EmptyDataset));
/// ```
#[derive(Debug)]
pub struct BatchDriver {
    policy: ParsePolicy,
    state: BatchState,
}

impl BatchDriver {
    pub fn new(policy: ParsePolicy) -> Self {
        Self {
            policy,
            state: BatchState::Idle,
        }
    }

    /// 現在の状態
    pub fn state(&self) -> &BatchState {
        &self.state
    }

    /// データセットを検証し、全レコードを写像する
    ///
    /// 検証に失敗した場合は出力レコードを1件も返しません。検証を通過した
    /// 場合は、入力と同じ順序・同じ件数の出力レコードを返します。行単位の
    /// 不正データはエラーにならず、既定値に置き換えられます。
    pub fn run(&mut self, records: &[InputRecord]) -> Result<BatchOutput, InputError> {
        self.transition(BatchState::Validating);
        if let Err(error) = check_dataset(records) {
            self.transition(BatchState::Failed(error.clone()));
            return Err(error);
        }

        self.transition(BatchState::Mapping);
        let mut summary = BatchSummary::default();
        let mut output = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let mapped = map_record(record, self.policy);
            self.tally(index, record, &mapped, &mut summary);
            output.push(mapped);
        }

        self.transition(BatchState::Done(output.len()));
        Ok(BatchOutput {
            records: output,
            summary,
        })
    }

    fn tally(
        &self,
        index: usize,
        record: &InputRecord,
        mapped: &OutputRecord,
        summary: &mut BatchSummary,
    ) {
        summary.records += 1;

        if mapped.isbn.is_empty() {
            debug!(row = index + 1, "no ISBN found in malzemeAdi");
        } else {
            summary.with_isbn += 1;
        }

        if mapped.title.is_empty() {
            summary.without_title += 1;
        }

        let raw_price = record.text(BIRIM_FIYAT);
        if !raw_price.is_empty() && parse_price(&raw_price).is_none() {
            debug!(row = index + 1, price = %raw_price, "unparseable price replaced with 0.00");
            summary.price_defaulted += 1;
        }
    }

    fn transition(&mut self, next: BatchState) {
        debug!(from = ?self.state, to = ?next, "batch state transition");
        self.state = next;
    }
}

/// データセットを変換する
///
/// [`BatchDriver`]を1回だけ実行する簡易関数です。
pub fn transform(records: &[InputRecord], policy: ParsePolicy) -> Result<Vec<OutputRecord>, InputError> {
    BatchDriver::new(policy).run(records).map(|output| output.records)
}
