// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 韩语播放量文本解析
//!
//! 输入形如 `조회수 1.6억회`：前缀 `조회수`、数字、可选的数量级后缀（억/만/천）、后缀 `회`。

/// Checked in this order; a count carries at most one of them.
const MAGNITUDES: [(&str, u64); 3] = [("억", 100_000_000), ("만", 10_000), ("천", 1_000)];

const DECORATIONS: [&str; 2] = ["조회수", "회"];

/// 将播放量文本转换为整数
///
/// 无法解析的文本（空串、`조회수 없음` 等）返回 0，从不报错。
///
/// ```
/// use tubecrawl::scrape::view_count::parse_view_count;
///
/// assert_eq!(parse_view_count("조회수 1.6억회"), 160_000_000);
/// assert_eq!(parse_view_count("조회수 329회"), 329);
/// assert_eq!(parse_view_count("조회수 없음"), 0);
/// ```
pub fn parse_view_count(text: &str) -> u64 {
    let mut cleaned = text.to_string();
    for decoration in DECORATIONS {
        cleaned = cleaned.replace(decoration, "");
    }
    let cleaned: String = cleaned
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let (number, factor) = MAGNITUDES
        .iter()
        .find(|(suffix, _)| cleaned.contains(suffix))
        .map(|(suffix, factor)| (cleaned.replace(suffix, ""), *factor))
        .unwrap_or((cleaned, 1));

    scale_decimal(&number, factor).unwrap_or(0)
}

/// Multiplies a plain decimal string by `factor`, truncating toward zero.
///
/// Integer arithmetic keeps `1.6 * 10^8` exact where `f64` would not.
fn scale_decimal(number: &str, factor: u64) -> Option<u64> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    // Digits past 10^-18 cannot change the result for any factor we use
    let frac_part = &frac_part[..frac_part.len().min(18)];

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };
    let frac_value: u128 = if frac_part.is_empty() {
        0
    } else {
        frac_part.parse().ok()?
    };
    let denominator = 10u128.checked_pow(frac_part.len() as u32)?;

    let factor = u128::from(factor);
    let total = int_value
        .checked_mul(factor)?
        .checked_add(frac_value * factor / denominator)?;
    u64::try_from(total).ok()
}
