//! Record Mapper
//!
//! 入力レコード1件を、固定9列の出力レコード1件に写像する純粋関数。

use crate::api::ParsePolicy;
use crate::engine::price::normalize_price;
use crate::types::{InputRecord, OutputRecord, BAR_KOD, BIRIM_FIYAT, MALZEME_ADI, SICIL_NO};

/// 入力レコードを出力レコードに変換する
///
/// `malzemeAdi`はISBNと書名に、`birimFiyat`は正規化された単価になります。
/// `sicilNo`と`barKod`はそのまま（なければ空文字列）コピーされます。
/// 著者・出版社・出版年・刷は常に空です。
///
/// # 使用例
///
/// ```rust
/// use varlik_katalog::{map_record, InputRecord, ParsePolicy};
///
/// let record: InputRecord = [
///     ("malzemeAdi", "KİTAP-Yerli-Saatleri Ayarlama Enstitüsü-9789759954719"),
///     ("sicilNo", "255.01.02/12"),
///     ("barKod", "8690000000017"),
///     ("birimFiyat", "45,90"),
/// ]
/// .into_iter()
/// .collect();
///
/// let output = map_record(&record, ParsePolicy::ContentValidated);
/// assert_eq!(output.isbn, "9789759954719");
/// assert_eq!(output.title, "Saatleri Ayarlama Enstitüsü");
/// assert_eq!(output.price, "45.90");
/// ```
pub fn map_record(record: &InputRecord, policy: ParsePolicy) -> OutputRecord {
    let name = policy.extract(&record.text(MALZEME_ADI));

    OutputRecord {
        isbn: name.isbn,
        title: name.title,
        registry_no: record.text(SICIL_NO),
        barcode: record.text(BAR_KOD),
        price: normalize_price(&record.text(BIRIM_FIYAT)),
        ..OutputRecord::default()
    }
}
