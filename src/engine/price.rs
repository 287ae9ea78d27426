//! Price Normalizer
//!
//! `,`を小数点とする単価文字列を、小数点以下2桁の正規形に変換する。

/// 値がない場合の既定入力
pub const DEFAULT_PRICE_INPUT: &str = "0";

/// 解析できなかった場合の出力
pub const FALLBACK_PRICE: &str = "0.00";

/// 単価文字列を数値として解析する
///
/// 前後の空白を除き、最初の`,`を`.`に置き換えてから、先頭の数値部分
/// （符号、整数部、小数部、指数部）を読み取ります。`"12,50 TL"`は`12.5`に
/// なります。数値部分がない場合や、結果が有限でない場合は`None`です。
///
/// 桁区切りの`.`は扱いません（`"1.234,56"`は`1.234`と解釈されます）。
pub fn parse_price(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    let prefix = numeric_prefix(&normalized);
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// 単価を小数点以下2桁の文字列に正規化する
///
/// 空文字列は`"0"`として扱い、解析できない値は`"0.00"`になります。
///
/// # 使用例
///
/// ```rust
/// use varlik_katalog::normalize_price;
///
/// assert_eq!(normalize_price("1234,56"), "1234.56");
/// assert_eq!(normalize_price("12.50"), "12.50");
/// assert_eq!(normalize_price("abc"), "0.00");
/// assert_eq!(normalize_price(""), "0.00");
/// ```
pub fn normalize_price(raw: &str) -> String {
    let raw = if raw.is_empty() { DEFAULT_PRICE_INPUT } else { raw };
    match parse_price(raw).map(format_two_decimals) {
        // -0.001 などは "-0.00" に丸められるため符号を落とす
        Some(formatted) if formatted == "-0.00" => FALLBACK_PRICE.to_string(),
        Some(formatted) => formatted,
        None => FALLBACK_PRICE.to_string(),
    }
}

/// 小数点以下2桁の文字列にする
///
/// ちょうど中間の値は絶対値の大きい方に丸めます（`2.125` → `2.13`、
/// `-0.125` → `-0.13`）。それ以外は最も近い値になります。
fn format_two_decimals(value: f64) -> String {
    // 2桁目で中間になる値は m/8（mは奇数）のみで、小数点以下3桁で正確に表せる
    let eighths = value.abs() * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;
    if !is_tie {
        return format!("{:.2}", value);
    }

    let exact = format!("{:.3}", value);
    increment_last_digit(&exact[..exact.len() - 1])
}

/// 10進数文字列の最下位桁を絶対値方向に1つ繰り上げる（`"-9.99"` → `"-10.00"`）
fn increment_last_digit(number: &str) -> String {
    let (sign, magnitude) = match number.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("", number),
    };

    let mut digits = magnitude.as_bytes().to_vec();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        match *digit {
            b'.' => {}
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                carry = false;
            }
        }
    }

    let mut result = String::from(sign);
    if carry {
        result.push('1');
    }
    result.extend(digits.iter().map(|&b| char::from(b)));
    result
}

/// 先頭から10進数として読める最長の部分を返す
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = digits_from(pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = digits_from(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    &s[..pos]
}
