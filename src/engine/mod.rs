//! Transformation Engine
//!
//! 入力データセットの検証、`malzemeAdi`の解析、単価の正規化、固定9列への写像を行う。
//! すべて副作用のない同期処理で、入出力には関与しません。

mod composite;
mod driver;
mod mapper;
mod price;
mod schema;

pub use composite::{is_isbn, split_parts, CompositeName};
pub use driver::{transform, BatchDriver, BatchOutput, BatchState, BatchSummary};
pub use mapper::map_record;
pub use price::{normalize_price, parse_price};
pub use schema::{check_dataset, validate, Validation, REQUIRED_COLUMNS};
