//! Display formatting for table cells.
//!
//! Every formatter is total over `Option<f64>`: a missing or non-finite
//! value renders as the empty string. Rounding is half away from zero.

fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

/// Inserts `,` every three digits of a plain digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fixed one-decimal with thousands separators, e.g. `-1,234.5`.
fn grouped_one_decimal(x: f64) -> String {
    let rounded = round_to(x, 1);
    let body = format!("{:.1}", rounded.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "0"));
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

pub fn fmt_price_or_change(x: Option<f64>) -> String {
    match x {
        Some(v) if v.is_finite() => grouped_one_decimal(v),
        _ => String::new(),
    }
}

pub fn fmt_percent(x: Option<f64>) -> String {
    match x {
        Some(v) if v.is_finite() => format!("{:+.1}%", round_to(v, 1)),
        _ => String::new(),
    }
}

pub fn fmt_integer_krw(x: Option<f64>) -> String {
    match x {
        Some(v) if v.is_finite() => {
            let rounded = v.round();
            let digits = format!("{:.0}", rounded.abs());
            let sign = if rounded < 0.0 { "-" } else { "" };
            format!("{sign}{}", group_thousands(&digits))
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percent_examples() {
        assert_eq!(fmt_percent(None), "");
        assert_eq!(fmt_percent(Some(3.14)), "+3.1%");
        assert_eq!(fmt_percent(Some(-0.05)), "-0.1%");
        assert_eq!(fmt_percent(Some(0.05)), "+0.1%");
        assert_eq!(fmt_percent(Some(10.0)), "+10.0%");
        assert_eq!(fmt_percent(Some(0.0)), "+0.0%");
    }

    #[test]
    fn krw_examples() {
        assert_eq!(fmt_integer_krw(Some(1_234_567.8)), "1,234,568");
        assert_eq!(fmt_integer_krw(Some(999.4)), "999");
        assert_eq!(fmt_integer_krw(Some(999.5)), "1,000");
        assert_eq!(fmt_integer_krw(Some(-1500.0)), "-1,500");
        assert_eq!(fmt_integer_krw(None), "");
    }

    #[test]
    fn price_examples() {
        assert_eq!(fmt_price_or_change(Some(110.0)), "110.0");
        assert_eq!(fmt_price_or_change(Some(5_432.16)), "5,432.2");
        assert_eq!(fmt_price_or_change(Some(-1_234.56)), "-1,234.6");
        assert_eq!(fmt_price_or_change(Some(1_000_000.0)), "1,000,000.0");
        assert_eq!(fmt_price_or_change(Some(0.04)), "0.0");
        assert_eq!(fmt_price_or_change(None), "");
    }

    #[test]
    fn non_finite_renders_empty() {
        assert_eq!(fmt_price_or_change(Some(f64::NAN)), "");
        assert_eq!(fmt_percent(Some(f64::INFINITY)), "");
        assert_eq!(fmt_integer_krw(Some(f64::NEG_INFINITY)), "");
    }

    #[test]
    fn group_thousands_boundaries() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }

    proptest! {
        #[test]
        fn percent_is_signed_with_suffix(v in -1e6f64..1e6) {
            let s = fmt_percent(Some(v));
            prop_assert!(s.starts_with('+') || s.starts_with('-'));
            prop_assert!(s.ends_with('%'));
        }

        #[test]
        fn price_has_one_decimal(v in -1e9f64..1e9) {
            let s = fmt_price_or_change(Some(v));
            let (_, frac) = s.split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 1);
            prop_assert!(!s.starts_with('+'));
        }
    }
}
