//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// `malzemeAdi`からISBNと書名を取り出す規則
///
/// `malzemeAdi`は「カテゴリ-サブカテゴリ-書名-ISBN」のように`-`で連結された
/// 複合文字列です。規則には2つの世代があり、どちらも明示的に選択できます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ParsePolicy {
    /// 位置のみで判定する旧規則
    ///
    /// 2つ以上の部分があれば、最後の部分をISBN、最後から2番目を書名とします。
    /// 内容は検証しません。部分が1つの場合はどちらも空になります。
    ///
    /// 例: `Category-Subcat-Some Title` → ISBN `Some Title`, 書名 `Subcat`
    Positional,

    /// 内容を検証する新規則（デフォルト）
    ///
    /// 最後の部分が10桁または13桁の数字のときだけISBNとみなします。
    ///
    /// - ISBNの場合: 部分が3つ以上あれば最後から2番目が書名、なければ空
    /// - ISBNでない場合: ISBNは空。部分が2つ以上あれば最後の部分が書名、
    ///   1つだけなら元の`malzemeAdi`全体が書名
    ///
    /// 例: `Category-Subcat-Some Title` → ISBN 空, 書名 `Some Title`
    #[default]
    ContentValidated,
}

/// シート選択方式
///
/// 入力ワークブックのどのシートを読むかを指定します。CSV入力では無視されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    Index(usize),

    /// シート名指定
    Name(String),
}

/// 入力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum InputFormat {
    /// 先頭バイトから判定する（デフォルト）
    ///
    /// ZIPシグネチャ（XLSX/XLSB/ODS）またはOLEシグネチャ（XLS）であれば
    /// スプレッドシート、それ以外はCSVとして扱います。
    #[default]
    Auto,

    /// calamineが読めるスプレッドシート（XLSX, XLS, XLSB, ODS）
    Spreadsheet,

    /// 1行目をヘッダーとするCSV
    Csv,
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// XLSX形式（デフォルト）
    ///
    /// 1枚のワークシートに、太字のヘッダー行とデータ行を出力します。
    #[default]
    Xlsx,

    /// CSV形式
    ///
    /// ```csv
    /// ISBN,Eser Adı,Yazar,Yayınevi,Yayın Yılı,Baskı,Demirbaş No,Barkod,Fiyat
    /// 9786050837933,Kelebek Zihinli Çocuk,,,,,D-1,8690001,12.50
    /// ```
    Csv,

    /// JSON形式（見出しをキーとするオブジェクトの配列）
    Json,

    /// Markdownテーブル（プレビュー用）
    Markdown,
}

impl OutputFormat {
    /// 出力ファイルの既定拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ParsePolicy::default(), ParsePolicy::ContentValidated);
        assert_eq!(SheetSelector::default(), SheetSelector::First);
        assert_eq!(InputFormat::default(), InputFormat::Auto);
        assert_eq!(OutputFormat::default(), OutputFormat::Xlsx);
    }

    #[test]
    fn test_output_extensions() {
        assert_eq!(OutputFormat::Xlsx.extension(), "xlsx");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Markdown.extension(), "md");
    }
}
