//! Display helpers for money and dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Placeholder shown for a missing date.
const EMPTY_DATE: &str = "-";

/// Format as US dollars: `1234.5` → `"$1,234.50"`.
///
/// Not-a-number formats as an empty string. Without trailing zeros the
/// fraction is trimmed (`"$1,234.5"`, `"$1,234"`), never past two digits.
///
/// Rounding works on the shortest decimal form of the number and sends
/// half-cents away from zero, so `1.005` is `"$1.01"` and `-0.125` is
/// `"-$0.13"`. Any negative amount keeps its sign even when it rounds to
/// zero (`-0.001` is `"-$0.00"`).
pub fn money_format(number: f64, show_trailing_zeros: bool) -> String {
    if number.is_nan() {
        return String::new();
    }
    if number.is_infinite() {
        let sign = if number.is_sign_negative() { "-" } else { "" };
        return format!("{sign}$∞");
    }

    let (whole, cents) = round_to_cents(number.abs());
    let fraction = if show_trailing_zeros {
        cents.as_str()
    } else {
        cents.trim_end_matches('0')
    };

    let mut out = String::with_capacity(whole.len() + 8);
    if number < 0.0 {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(&whole));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Split a non-negative amount into whole dollars and two cent digits,
/// rounding half away from zero.
fn round_to_cents(amount: f64) -> (String, String) {
    // `Display` for f64 is the shortest round-trip form and never uses an exponent
    let shortest = amount.to_string();
    let (whole, fraction) = shortest.split_once('.').unwrap_or((&shortest, ""));
    let mut fraction = fraction.bytes();

    let mut digits: Vec<u8> = whole.bytes().collect();
    digits.push(fraction.next().unwrap_or(b'0'));
    digits.push(fraction.next().unwrap_or(b'0'));

    if fraction.next().is_some_and(|d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let cents = digits.split_off(digits.len() - 2);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&cents).into_owned(),
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a backend date in UTC.
///
/// `"dd-mm-yy"` renders `DD-MM-YYYY`; any other format renders `MM/DD/YYYY`.
/// Missing input renders `"-"`, unparseable input `"Invalid date"`.
pub fn format_date(date: Option<&str>, format: &str) -> String {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty() && *d != "Invalid date") else {
        return EMPTY_DATE.to_string();
    };
    let pattern = if format == "dd-mm-yy" {
        "%d-%m-%Y"
    } else {
        "%m/%d/%Y"
    };
    match parse_utc(raw) {
        Some(date) => date.format(pattern).to_string(),
        None => "Invalid date".to_string(),
    }
}

fn parse_utc(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
