//! Composite Field Parser
//!
//! `malzemeAdi`（カテゴリ-サブカテゴリ-書名-ISBN）からISBNと書名を取り出す。
//! 書名自体に含まれる`-`はエスケープされないため、ハイフンを含む書名は誤って
//! 分割されます。これは位置による規則の既知の制約です。

use crate::api::ParsePolicy;

/// 区切り文字
const DELIMITER: char = '-';

/// 複合フィールドの解析結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositeName {
    pub isbn: String,
    pub title: String,
}

impl CompositeName {
    fn new(isbn: &str, title: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
        }
    }
}

/// `-`で分割し、各部分の前後の空白を除去する
///
/// 空文字列は`[""]`になります。
pub fn split_parts(raw: &str) -> Vec<&str> {
    raw.split(DELIMITER).map(str::trim).collect()
}

/// 前後の空白を除いて、ちょうど10桁または13桁の数字であればISBNとみなす
///
/// チェックディジットは検証しません。ISBN-10の末尾`X`も受け付けません。
pub fn is_isbn(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    matches!(trimmed.len(), 10 | 13) && trimmed.bytes().all(|b| b.is_ascii_digit())
}

impl ParsePolicy {
    /// 規則に従って`malzemeAdi`からISBNと書名を取り出す
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use varlik_katalog::ParsePolicy;
    ///
    /// let parsed = ParsePolicy::ContentValidated
    ///     .extract("KARMA DİĞER KİTAPLAR-.MARKASIZ-Kelebek Zihinli Çocuk-9786050837933");
    /// assert_eq!(parsed.isbn, "9786050837933");
    /// assert_eq!(parsed.title, "Kelebek Zihinli Çocuk");
    /// ```
    pub fn extract(self, raw: &str) -> CompositeName {
        let parts = split_parts(raw);
        match self {
            ParsePolicy::Positional => extract_positional(&parts),
            ParsePolicy::ContentValidated => extract_content_validated(raw, &parts),
        }
    }
}

fn extract_positional(parts: &[&str]) -> CompositeName {
    match parts {
        [.., title, isbn] => CompositeName::new(isbn, title),
        _ => CompositeName::default(),
    }
}

fn extract_content_validated(raw: &str, parts: &[&str]) -> CompositeName {
    let last = parts.last().copied().unwrap_or_default();

    if is_isbn(last) {
        let title = match parts {
            [_, .., title, _] => *title,
            _ => "",
        };
        CompositeName::new(last, title)
    } else if parts.len() >= 2 {
        CompositeName::new("", last)
    } else {
        CompositeName::new("", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "KARMA DİĞER KİTAPLAR-.MARKASIZ-Kelebek Zihinli Çocuk-9786050837933";

    #[test]
    fn test_split_parts_trims() {
        assert_eq!(split_parts(" A - B -C "), vec!["A", "B", "C"]);
        assert_eq!(split_parts(""), vec![""]);
        assert_eq!(split_parts("A--B"), vec!["A", "", "B"]);
    }

    #[test]
    fn test_is_isbn() {
        assert!(is_isbn("9786050837933"));
        assert!(is_isbn("0306406152"));
        assert!(is_isbn(" 9786050837933 "));
        assert!(!is_isbn("030640615X"));
        assert!(!is_isbn("978605083793"));
        assert!(!is_isbn("978-6050837933"));
        assert!(!is_isbn("٩٧٨٦٠٥٠٨٣٧٩٣٣"));
        assert!(!is_isbn(""));
    }

    #[test]
    fn test_content_validated_full_name() {
        let parsed = ParsePolicy::ContentValidated.extract(FULL);
        assert_eq!(parsed.isbn, "9786050837933");
        assert_eq!(parsed.title, "Kelebek Zihinli Çocuk");
    }

    #[test]
    fn test_content_validated_non_isbn_last_segment() {
        let parsed = ParsePolicy::ContentValidated.extract("Category-Subcat-Some Title");
        assert_eq!(parsed, CompositeName::new("", "Some Title"));
    }

    #[test]
    fn test_content_validated_single_segment_keeps_original() {
        let parsed = ParsePolicy::ContentValidated.extract("Tek Parça Başlık");
        assert_eq!(parsed, CompositeName::new("", "Tek Parça Başlık"));

        // 元の文字列をそのまま使う（trimしない）
        let parsed = ParsePolicy::ContentValidated.extract("  Boşluklu ");
        assert_eq!(parsed.title, "  Boşluklu ");
    }

    #[test]
    fn test_content_validated_isbn_with_two_parts_has_no_title() {
        let parsed = ParsePolicy::ContentValidated.extract("Başlık-9786050837933");
        assert_eq!(parsed, CompositeName::new("9786050837933", ""));
    }

    #[test]
    fn test_content_validated_isbn_only() {
        let parsed = ParsePolicy::ContentValidated.extract("9786050837933");
        assert_eq!(parsed, CompositeName::new("9786050837933", ""));
    }

    #[test]
    fn test_content_validated_empty() {
        assert_eq!(ParsePolicy::ContentValidated.extract(""), CompositeName::default());
    }

    #[test]
    fn test_content_validated_trailing_delimiter() {
        let parsed = ParsePolicy::ContentValidated.extract("Kategori-Başlık-");
        assert_eq!(parsed, CompositeName::new("", ""));
    }

    #[test]
    fn test_positional_full_name() {
        let parsed = ParsePolicy::Positional.extract(FULL);
        assert_eq!(parsed.isbn, "9786050837933");
        assert_eq!(parsed.title, "Kelebek Zihinli Çocuk");
    }

    #[test]
    fn test_positional_ignores_content() {
        let parsed = ParsePolicy::Positional.extract("Category-Subcat-Some Title");
        assert_eq!(parsed, CompositeName::new("Some Title", "Subcat"));
    }

    #[test]
    fn test_positional_two_parts() {
        let parsed = ParsePolicy::Positional.extract("Başlık - 9786050837933");
        assert_eq!(parsed, CompositeName::new("9786050837933", "Başlık"));
    }

    #[test]
    fn test_positional_single_segment_is_empty() {
        assert_eq!(ParsePolicy::Positional.extract("Tek Parça"), CompositeName::default());
        assert_eq!(ParsePolicy::Positional.extract(""), CompositeName::default());
    }

    #[test]
    fn test_hyphenated_title_is_split() {
        let parsed = ParsePolicy::ContentValidated.extract("Roman-Yerli-Anna-Karenina-9789750719387");
        assert_eq!(parsed.isbn, "9789750719387");
        assert_eq!(parsed.title, "Karenina");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_extracted_values_are_trimmed_parts(raw in "[ a-zA-Z0-9çğış-]{0,40}") {
                let parts = split_parts(&raw);
                for policy in [ParsePolicy::Positional, ParsePolicy::ContentValidated] {
                    let parsed = policy.extract(&raw);
                    prop_assert!(parsed.isbn.is_empty() || parts.contains(&parsed.isbn.as_str()));
                    prop_assert!(
                        parsed.title.is_empty()
                            || parts.contains(&parsed.title.as_str())
                            || parsed.title == raw
                    );
                }
            }

            #[test]
            fn test_content_validated_isbn_is_always_digits(raw in "[ a-z0-9-]{0,40}") {
                let parsed = ParsePolicy::ContentValidated.extract(&raw);
                prop_assert!(parsed.isbn.is_empty() || is_isbn(&parsed.isbn));
            }
        }
    }
}
