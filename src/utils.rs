use rust_decimal::{Decimal, RoundingStrategy};

/// Форматирует число: пробел как разделитель тысяч, не больше двух знаков после точки.
/// С `plus_sign` положительные значения получают префикс "+".
pub fn format_decimal(value: Decimal, plus_sign: bool) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };
    let mut result = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        result.push('-');
    } else if plus_sign && value > Decimal::ZERO {
        result.push('+');
    }
    result.push_str(&group_thousands(int_part));
    if let Some(f) = frac_part {
        result.push('.');
        result.push_str(f);
    }
    result
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

/// Первое слово текста без ведущего "/" и без суффикса "@имябота"
pub fn command_token(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let first = first.strip_prefix('/').unwrap_or(first);
    let first = first.split('@').next().unwrap_or(first);
    if first.is_empty() {
        None
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_decimal_groups_and_rounds() {
        assert_eq!(format_decimal(dec("1234567.891"), false), "1 234 567.89");
        assert_eq!(format_decimal(dec("999.999"), false), "1 000");
        assert_eq!(format_decimal(dec("0.5"), false), "0.5");
        assert_eq!(format_decimal(dec("2.00"), false), "2");
        assert_eq!(format_decimal(dec("100"), false), "100");
        assert_eq!(format_decimal(dec("0.125"), false), "0.13");
    }

    #[test]
    fn test_format_decimal_signs() {
        assert_eq!(format_decimal(dec("-1234.5"), false), "-1 234.5");
        assert_eq!(format_decimal(dec("-1234.5"), true), "-1 234.5");
        assert_eq!(format_decimal(dec("3.14159"), true), "+3.14");
        assert_eq!(format_decimal(dec("3.14159"), false), "3.14");
        assert_eq!(format_decimal(Decimal::ZERO, true), "0");
        assert_eq!(format_decimal(dec("-0.001"), true), "0");
    }

    #[test]
    fn test_command_token() {
        assert_eq!(command_token("/ledger"), Some("ledger"));
        assert_eq!(command_token("/ledger@MenuBot extra"), Some("ledger"));
        assert_eq!(command_token("  prices  now"), Some("prices"));
        assert_eq!(command_token("/"), None);
        assert_eq!(command_token("   "), None);
    }
}
